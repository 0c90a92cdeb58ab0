//! The two runs: per-window charts of a single log, and per-node charts of a
//! results directory together with the missing-cell report.

use crate::Result;
use crate::config::OUTLIER_THRESHOLD_SECS;
use crate::diagnostics;
use crate::model::filter::{by_node_count, by_process_count, by_query_family, excluding_baselines};
use crate::model::{Axes, SummaryRow, aggregate, normalize_windows};
use crate::query::Family;
use crate::render::{self, AxisLabels};
use crate::report::MissingReport;
use crate::results::{Dataset, first_seen, load_results, load_windows};

use anyhow::Context;
use std::fs;
use std::path::{Path, PathBuf};

/// Settings of a `windows` run.
#[derive(Debug, Clone)]
pub struct WindowsRun {
    pub input: PathBuf,
    /// Base image name; the family (and process count) is inserted before the extension.
    pub image: PathBuf,
}

/// Settings of a `nodes` run.
#[derive(Debug, Clone)]
pub struct NodesRun {
    pub results_dir: PathBuf,
    pub graphs_dir: PathBuf,
    pub report: PathBuf,
    pub outlier_threshold: f64,
}

impl NodesRun {
    pub fn new(results_dir: PathBuf, graphs_dir: PathBuf, report: PathBuf) -> Self {
        Self {
            results_dir,
            graphs_dir,
            report,
            outlier_threshold: OUTLIER_THRESHOLD_SECS,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub charts: Vec<PathBuf>,
    pub missing_cells: usize,
}

pub fn run_windows(cfg: &WindowsRun) -> Result<RunSummary> {
    let mut ds = load_windows(&cfg.input)?;
    let series = normalize_windows(&mut ds);
    log::debug!("normalized {} series", series);

    let mut summary = RunSummary::default();
    for family in Family::ALL {
        for nproc in ds.parallelisms() {
            let view = excluding_baselines(&by_process_count(&ds, nproc), &family.other().baseline_labels());
            if view.is_empty() {
                diagnostics::warn(format!("no {} rows with {} processes", family, nproc));
                continue;
            }
            log_running_averages(&view, nproc);

            let path = window_image_name(&cfg.image, family, nproc);
            let labels = AxisLabels {
                caption: format!("{} latency, {} processes", family, nproc),
                x: "window_id".to_string(),
                y: "latency".to_string(),
            };
            if render::render_window_chart(&path, &labels, &render::window_series(&view))? {
                println!("Wrote {}", path.display());
                summary.charts.push(path);
            }
        }
    }

    log::info!("{} window charts written", summary.charts.len());
    Ok(summary)
}

pub fn run_nodes(cfg: &NodesRun) -> Result<RunSummary> {
    let ds = load_results(&cfg.results_dir)?;
    if ds.is_empty() {
        diagnostics::warn(format!("no results files found in {}", cfg.results_dir.display()));
    }

    // Once per run, shared by both families.
    let mut report = MissingReport::create(&cfg.report)?;
    fs::create_dir_all(&cfg.graphs_dir).with_context(|| {
        diagnostics::error_message(format!("create {}", cfg.graphs_dir.display()))
    })?;

    let mut summary = RunSummary::default();
    for family in Family::ALL {
        let view = by_query_family(&ds, family);
        render_family(cfg, &view, family, &mut report, &mut summary)?;
    }

    summary.missing_cells = report.written();
    log::info!(
        "{} node charts written, {} missing cells reported in {}",
        summary.charts.len(),
        summary.missing_cells,
        report.path().display()
    );
    Ok(summary)
}

/// One chart per (node count, dataflow count) cell of a family. A cell with any
/// missing combination is reported instead of drawn.
fn render_family(
    cfg: &NodesRun,
    view: &Dataset,
    family: Family,
    report: &mut MissingReport,
    summary: &mut RunSummary,
) -> Result<()> {
    let axes = Axes::of(view);

    for &node_count in &axes.node_counts {
        let rows = aggregate(
            &by_node_count(view, node_count),
            &axes.clone().with_node_count(node_count),
            cfg.outlier_threshold,
        );

        for dataflow in first_seen(rows.iter().map(|r| r.dataflow_count)) {
            let cell: Vec<SummaryRow> = rows.iter().filter(|r| r.dataflow_count == dataflow).cloned().collect();

            if cell.iter().any(SummaryRow::is_missing) {
                let n = report.append_missing(&cell)?;
                log::debug!("{} {}-{}: {} missing combinations", family, node_count, dataflow, n);
                continue;
            }

            let path = cfg
                .graphs_dir
                .join(format!("{}-{}-{}.png", node_count, dataflow, family.suffix()));
            let labels = AxisLabels {
                caption: format!("{}, {} nodes", family, node_count),
                x: "Throughput (events / sec)".to_string(),
                y: format!("Average latency ({} dataflows, sec)", dataflow),
            };
            if render::render_throughput_chart(&path, &labels, &render::throughput_series(&cell))? {
                println!("Wrote {}", path.display());
                summary.charts.push(path);
            }
        }
    }

    Ok(())
}

/// Running average the benchmark reported at the last window of each series.
fn log_running_averages(view: &Dataset, nproc: u32) {
    for label in view.baselines() {
        let last = view
            .iter()
            .filter(|o| o.query_baseline == label)
            .max_by_key(|o| o.window_id);
        if let Some(o) = last {
            log::debug!(
                "{} with {} processes: running average {:.4}s at window {}",
                label,
                nproc,
                o.avg_latency,
                o.window_id
            );
        }
    }
}

/// `latency.png` -> `latency-NQ5.png` for one process, `latency-NQ5-4.png` for four.
pub fn window_image_name(base: &Path, family: Family, nproc: u32) -> PathBuf {
    let stem = base.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let tag = if nproc == 1 {
        format!("{}-{}", stem, family)
    } else {
        format!("{}-{}-{}", stem, family, nproc)
    };

    let name = match base.extension() {
        Some(ext) => format!("{}.{}", tag, ext.to_string_lossy()),
        None => tag,
    };
    base.with_file_name(name)
}
