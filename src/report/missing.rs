//! Report of experiment cells that produced no usable latency.
//!
//! Line format: `<code> <node_count> <dataflow_count> <throughput>`, e.g.
//! `NQ8WS 2 4 1000`.

use crate::Result;
use crate::diagnostics;
use crate::model::SummaryRow;
use crate::query::short_code;

use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct MissingReport {
    path: PathBuf,
    written: usize,
}

impl MissingReport {
    /// Create or truncate the report. Call once per run, before any append.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        File::create(&path).with_context(|| {
            diagnostics::error_message(format!("truncate report {}", path.display()))
        })?;
        Ok(Self { path, written: 0 })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lines appended since the report was created.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Append one line for a missing row. Fails on a label without short code.
    pub fn append(&mut self, row: &SummaryRow) -> Result<()> {
        let line = format_line(row)?;

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)
            .with_context(|| {
                diagnostics::error_message(format!("open report {}", self.path.display()))
            })?;
        writeln!(file, "{}", line).with_context(|| {
            diagnostics::error_message(format!("write report {}", self.path.display()))
        })?;

        self.written += 1;
        Ok(())
    }

    /// Append every missing row of `rows`; complete rows are ignored.
    pub fn append_missing<'a>(&mut self, rows: impl IntoIterator<Item = &'a SummaryRow>) -> Result<usize> {
        let mut appended = 0;
        for row in rows.into_iter().filter(|r| r.is_missing()) {
            self.append(row)?;
            appended += 1;
        }
        Ok(appended)
    }
}

fn format_line(row: &SummaryRow) -> Result<String> {
    Ok(format!(
        "{} {} {} {}",
        short_code(&row.query_baseline)?,
        row.node_count,
        row.dataflow_count,
        row.throughput
    ))
}
