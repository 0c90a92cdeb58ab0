//! Benchmark result files: typed rows, record parsing and directory loading.

pub mod loader;
pub mod parse;
pub mod row;

pub use loader::{load_results, load_windows};
pub use row::{Dataset, Observation, first_seen};
