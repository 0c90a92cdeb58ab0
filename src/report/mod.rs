//! Plain-text reports produced alongside the charts.

pub mod missing;

pub use missing::MissingReport;
