//! Selection of sub-tables. Every filter returns a new dataset and leaves its
//! input untouched.

use crate::query::Family;
use crate::results::Dataset;

/// Rows whose label carries the family prefix (`NQ5` or `NQ8`).
pub fn by_query_family(ds: &Dataset, family: Family) -> Dataset {
    ds.select(|o| family.matches(&o.query_baseline))
}

pub fn by_process_count(ds: &Dataset, n: u32) -> Dataset {
    ds.select(|o| o.parallelism == n)
}

/// Same column as the process count; results files store dataflows there.
pub fn by_dataflow_count(ds: &Dataset, n: u32) -> Dataset {
    ds.select(|o| o.parallelism == n)
}

pub fn by_node_count(ds: &Dataset, n: u32) -> Dataset {
    ds.select(|o| o.node_count == Some(n))
}

pub fn by_throughput(ds: &Dataset, t: f64) -> Dataset {
    ds.select(|o| o.throughput == Some(t))
}

/// Rows whose label is not in `labels`.
pub fn excluding_baselines<S: AsRef<str>>(ds: &Dataset, labels: &[S]) -> Dataset {
    ds.select(|o| !labels.iter().any(|l| l.as_ref() == o.query_baseline))
}
