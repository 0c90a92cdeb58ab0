use crate::Result;
use crate::diagnostics;
use crate::results::row::Observation;

use anyhow::{Context, bail};
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::Path;

/// Column layout of a headerless result file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// query_baseline, process_count, window_id, latency, avg_latency
    Windows,
    /// query_baseline, dataflow_count, window_id, latency, avg_latency, throughput
    Results,
}

impl Layout {
    pub fn field_count(self) -> usize {
        match self {
            Layout::Windows => 5,
            Layout::Results => 6,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WindowRecord(String, u32, i64, f64, f64);

#[derive(Debug, Deserialize)]
struct ResultRecord(String, u32, i64, f64, f64, f64);

/// Parse a headerless CSV result file.
///
/// Any malformed record fails the whole file; no rows are skipped.
///
/// Example (results layout):
/// NQ8 (sort),4,12,0.031,0.029,1000
pub fn parse_file(path: &Path, layout: Layout) -> Result<Vec<Observation>> {
    let file = File::open(path)
        .with_context(|| diagnostics::error_message(format!("open {}", path.display())))?;
    parse_reader(file, &path.display().to_string(), layout)
}

/// Parse records from any reader. `source` only names the input in errors.
pub fn parse_reader<R: io::Read>(rdr: R, source: &str, layout: Layout) -> Result<Vec<Observation>> {
    // Field counts are checked per record below, so the reader itself stays flexible.
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(rdr);

    let mut out = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            diagnostics::error_message(format!("read error in {} at record {}", source, idx + 1))
        })?;
        let lno = record.position().map(|p| p.line()).unwrap_or(idx as u64 + 1);

        if record.len() != layout.field_count() {
            bail!(
                "{}",
                diagnostics::error_message(format!(
                    "parse error at {}:{}: expected {} fields, found {}",
                    source,
                    lno,
                    layout.field_count(),
                    record.len()
                ))
            );
        }

        let parse_err =
            || diagnostics::error_message(format!("parse error at {}:{}: bad numeric field", source, lno));

        let observation = match layout {
            Layout::Windows => {
                let WindowRecord(query_baseline, parallelism, window_id, latency, avg_latency) =
                    record.deserialize::<WindowRecord>(None).with_context(parse_err)?;
                Observation {
                    query_baseline,
                    parallelism,
                    window_id,
                    latency,
                    avg_latency,
                    throughput: None,
                    node_count: None,
                }
            }
            Layout::Results => {
                let ResultRecord(query_baseline, parallelism, window_id, latency, avg_latency, throughput) =
                    record.deserialize::<ResultRecord>(None).with_context(parse_err)?;
                // Throughput is a grouping key; NaN would never compare equal to itself.
                if !throughput.is_finite() {
                    bail!(
                        "{}",
                        diagnostics::error_message(format!(
                            "parse error at {}:{}: throughput must be finite, found {}",
                            source, lno, throughput
                        ))
                    );
                }
                Observation {
                    query_baseline,
                    parallelism,
                    window_id,
                    latency,
                    avg_latency,
                    throughput: Some(throughput),
                    node_count: None,
                }
            }
        };
        out.push(observation);
    }

    Ok(out)
}
