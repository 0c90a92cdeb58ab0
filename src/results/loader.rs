use crate::Result;
use crate::config::{FIRST_NODE_COUNT, NODE_COUNT_GROWTH, results_file_name};
use crate::results::parse::{Layout, parse_file};
use crate::results::row::Dataset;

use std::path::Path;

/// Load every `results-<n>.csv` of a results directory, tagging rows with `n`.
///
/// Node counts are probed as 1, 2, 4, 8, ... and probing stops at the first
/// missing file: with `results-4.csv` absent, `results-8.csv` is never read.
/// A directory without any results file yields an empty dataset.
pub fn load_results(dir: &Path) -> Result<Dataset> {
    let mut rows = Vec::new();
    let mut node_count = FIRST_NODE_COUNT;

    loop {
        let path = dir.join(results_file_name(node_count));
        if !path.is_file() {
            log::debug!("no {}, node scan stops at {}", path.display(), node_count);
            break;
        }

        let mut parsed = parse_file(&path, Layout::Results)?;
        log::info!("loaded {} rows from {}", parsed.len(), path.display());
        for row in &mut parsed {
            row.node_count = Some(node_count);
        }
        rows.extend(parsed);

        node_count = match node_count.checked_mul(NODE_COUNT_GROWTH) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(Dataset::new(rows))
}

/// Load a single per-window latency log.
pub fn load_windows(path: &Path) -> Result<Dataset> {
    let ds = Dataset::new(parse_file(path, Layout::Windows)?);
    log::info!("loaded {} rows from {}", ds.len(), path.display());
    Ok(ds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write(dir: &Path, name: &str, body: &str) {
        fs::write(dir.join(name), body).unwrap();
    }

    #[test]
    fn stops_at_first_gap() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "results-1.csv", "NQ5 (count),1,0,0.1,0.1,1000\n");
        write(dir.path(), "results-2.csv", "NQ5 (count),1,0,0.2,0.2,1000\nNQ5 (sort),2,1,0.3,0.3,2000\n");
        // Malformed on purpose: reading it would fail the load.
        write(dir.path(), "results-8.csv", "garbage\n");

        let ds = load_results(dir.path()).unwrap();
        assert_eq!(ds.node_counts(), vec![1, 2]);
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn rows_are_tagged_in_discovery_order() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "results-1.csv", "NQ8 (count),1,0,0.1,0.1,1000\n");
        write(dir.path(), "results-2.csv", "NQ8 (count),1,0,0.2,0.2,1000\n");
        write(dir.path(), "results-4.csv", "NQ8 (count),1,0,0.4,0.4,1000\n");

        let ds = load_results(dir.path()).unwrap();
        let tagged: Vec<(Option<u32>, f64)> = ds.iter().map(|o| (o.node_count, o.latency)).collect();
        assert_eq!(tagged, vec![(Some(1), 0.1), (Some(2), 0.2), (Some(4), 0.4)]);
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let ds = load_results(dir.path()).unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn parse_error_aborts_the_load() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "results-1.csv", "NQ8 (count),1,0,fast,0.1,1000\n");
        assert!(load_results(dir.path()).is_err());
    }

    #[test]
    fn loads_window_log() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "10000.csv", "NQ5 (count),1,5,0.02,0.02\n");
        let ds = load_windows(&dir.path().join("10000.csv")).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.rows[0].node_count, None);
    }

    #[test]
    fn missing_window_log_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_windows(&dir.path().join("nope.csv")).is_err());
    }
}
