//! Transformations over a loaded dataset: window normalization, filtering and
//! per-configuration aggregation.

pub mod aggregate;
pub mod filter;
pub mod normalize;

pub use aggregate::{Axes, SummaryRow, aggregate};
pub use normalize::normalize_windows;
