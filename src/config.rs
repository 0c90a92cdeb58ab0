//! Named constants and command-line defaults.

/// Latencies at or above this many seconds are discarded as noise before averaging.
/// Messages are delivered in order, so real latencies stay well below it.
pub const OUTLIER_THRESHOLD_SECS: f64 = 5.0;

/// First node count probed when scanning a results directory.
pub const FIRST_NODE_COUNT: u32 = 1;

/// Node counts are probed as `FIRST_NODE_COUNT * NODE_COUNT_GROWTH^k`.
pub const NODE_COUNT_GROWTH: u32 = 2;

/// Default input of the `windows` command.
pub const DEFAULT_WINDOWS_INPUT: &str = "10000.csv";

/// Default image base name of the `windows` command.
pub const DEFAULT_WINDOWS_IMAGE: &str = "latency.png";

/// Default results directory of the `nodes` command.
pub const DEFAULT_RESULTS_DIR: &str = "default";

/// Output directory for the per-node charts, relative to the working directory.
pub const GRAPHS_DIR: &str = "graphs";

/// Report of experiment cells without usable data, relative to the working directory.
pub const MISSING_REPORT: &str = "missing.txt";

/// Pixel size of every chart.
pub const CHART_SIZE: (u32, u32) = (800, 600);

/// Results file name for a given node count.
pub fn results_file_name(node_count: u32) -> String {
    format!("results-{}.csv", node_count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn results_file_name_encodes_node_count() {
        assert_eq!(results_file_name(8), "results-8.csv");
    }
}
