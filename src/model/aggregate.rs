use crate::model::filter::{by_dataflow_count, by_node_count, by_throughput};
use crate::results::Dataset;

/// Average latency of one (baseline, dataflows, nodes, throughput) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub query_baseline: String,
    pub dataflow_count: u32,
    pub node_count: u32,
    pub throughput: u64,
    /// None if no observation survived the outlier filter.
    pub avg_latency: Option<f64>,
}

impl SummaryRow {
    pub fn is_missing(&self) -> bool {
        self.avg_latency.is_none()
    }
}

/// Distinct values spanning the combinations to summarize.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Axes {
    pub baselines: Vec<String>,
    pub dataflow_counts: Vec<u32>,
    pub node_counts: Vec<u32>,
    pub throughputs: Vec<f64>,
}

impl Axes {
    /// Every distinct value found in `ds`, in first-appearance order.
    pub fn of(ds: &Dataset) -> Self {
        Self {
            baselines: ds.baselines(),
            dataflow_counts: ds.parallelisms(),
            node_counts: ds.node_counts(),
            throughputs: ds.throughputs(),
        }
    }

    /// Restrict the node axis to a single node count.
    pub fn with_node_count(mut self, node_count: u32) -> Self {
        self.node_counts = vec![node_count];
        self
    }

    pub fn combinations(&self) -> usize {
        self.baselines.len() * self.dataflow_counts.len() * self.node_counts.len() * self.throughputs.len()
    }
}

/// One summary row per combination of the cross-product of `axes`.
///
/// Combinations that never ran are included too; they come out missing,
/// which is what lets the report name them.
pub fn aggregate(ds: &Dataset, axes: &Axes, outlier_threshold: f64) -> Vec<SummaryRow> {
    let mut out = Vec::with_capacity(axes.combinations());

    for baseline in &axes.baselines {
        let by_baseline = ds.select(|o| &o.query_baseline == baseline);
        for &dataflow in &axes.dataflow_counts {
            let by_dataflow = by_dataflow_count(&by_baseline, dataflow);
            for &node in &axes.node_counts {
                let by_node = by_node_count(&by_dataflow, node);
                for &throughput in &axes.throughputs {
                    let cell = by_throughput(&by_node, throughput);
                    out.push(SummaryRow {
                        query_baseline: baseline.clone(),
                        dataflow_count: dataflow,
                        node_count: node,
                        throughput: throughput as u64,
                        avg_latency: mean_latency(&cell, outlier_threshold),
                    });
                }
            }
        }
    }

    out
}

/// Mean latency of the rows strictly below `outlier_threshold`.
fn mean_latency(ds: &Dataset, outlier_threshold: f64) -> Option<f64> {
    let kept: Vec<f64> = ds
        .iter()
        .map(|o| o.latency)
        .filter(|l| *l < outlier_threshold)
        .collect();

    if kept.is_empty() {
        return None;
    }
    Some(kept.iter().sum::<f64>() / kept.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OUTLIER_THRESHOLD_SECS;
    use crate::results::Observation;
    use crate::results::row::obs;
    use pretty_assertions::assert_eq;

    fn tagged(qb: &str, dataflows: u32, nodes: u32, throughput: f64, latency: f64) -> Observation {
        Observation {
            throughput: Some(throughput),
            node_count: Some(nodes),
            ..obs(qb, dataflows, 0, latency)
        }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn outliers_are_discarded() {
        let ds = Dataset::new(vec![
            tagged("NQ8 (sort)", 4, 2, 1000.0, 0.1),
            tagged("NQ8 (sort)", 4, 2, 1000.0, 0.2),
            tagged("NQ8 (sort)", 4, 2, 1000.0, 7.0),
        ]);
        let rows = aggregate(&ds, &Axes::of(&ds), OUTLIER_THRESHOLD_SECS);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].query_baseline, "NQ8 (sort)");
        assert_eq!((rows[0].dataflow_count, rows[0].node_count, rows[0].throughput), (4, 2, 1000));
        assert!(close(rows[0].avg_latency.unwrap(), 0.15));
    }

    #[test]
    fn threshold_itself_is_an_outlier() {
        let ds = Dataset::new(vec![
            tagged("NQ5 (count)", 1, 1, 1000.0, 5.0),
            tagged("NQ5 (count)", 1, 1, 1000.0, 1.0),
        ]);
        let rows = aggregate(&ds, &Axes::of(&ds), OUTLIER_THRESHOLD_SECS);
        assert_eq!(rows[0].avg_latency, Some(1.0));
    }

    #[test]
    fn only_outliers_means_missing() {
        let ds = Dataset::new(vec![tagged("NQ5 (count)", 1, 1, 1000.0, 9.5)]);
        let rows = aggregate(&ds, &Axes::of(&ds), OUTLIER_THRESHOLD_SECS);
        assert!(rows[0].is_missing());
    }

    #[test]
    fn cross_product_includes_combinations_never_run() {
        let ds = Dataset::new(vec![
            tagged("NQ8 (sort)", 4, 2, 1000.0, 0.1),
            tagged("NQ8 (count)", 2, 2, 2000.0, 0.3),
        ]);
        let axes = Axes::of(&ds);
        assert_eq!(axes.combinations(), 8);

        let rows = aggregate(&ds, &axes, OUTLIER_THRESHOLD_SECS);
        assert_eq!(rows.len(), 8);
        assert_eq!(rows.iter().filter(|r| !r.is_missing()).count(), 2);

        let gap = rows
            .iter()
            .find(|r| r.query_baseline == "NQ8 (sort)" && r.dataflow_count == 4 && r.throughput == 2000)
            .unwrap();
        assert_eq!(gap.avg_latency, None);
    }

    #[test]
    fn node_axis_can_be_pinned() {
        let ds = Dataset::new(vec![
            tagged("NQ5 (sort)", 1, 1, 1000.0, 0.1),
            tagged("NQ5 (sort)", 1, 2, 1000.0, 0.4),
        ]);
        let rows = aggregate(&ds, &Axes::of(&ds).with_node_count(2), OUTLIER_THRESHOLD_SECS);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].node_count, 2);
        assert_eq!(rows[0].avg_latency, Some(0.4));
    }

    #[test]
    fn throughput_is_truncated() {
        let ds = Dataset::new(vec![tagged("NQ5 (sort)", 1, 1, 1500.7, 0.1)]);
        let rows = aggregate(&ds, &Axes::of(&ds), OUTLIER_THRESHOLD_SECS);
        assert_eq!(rows[0].throughput, 1500);
    }

    #[test]
    fn empty_dataset_has_no_rows() {
        let ds = Dataset::default();
        assert!(aggregate(&ds, &Axes::of(&ds), OUTLIER_THRESHOLD_SECS).is_empty());
    }
}
