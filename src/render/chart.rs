use crate::Result;
use crate::config::CHART_SIZE;
use crate::diagnostics;
use crate::model::SummaryRow;
use crate::results::{Dataset, first_seen};

use anyhow::anyhow;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Range;
use std::path::Path;

/// Lines with point markers, one palette color per series, plus a legend.
macro_rules! draw_lines {
    ($chart:expr, $series:expr, $path:expr) => {
        for (idx, s) in $series.iter().enumerate() {
            let color = Palette99::pick(idx).mix(0.9);
            $chart
                .draw_series(LineSeries::new(s.points.iter().copied(), color.stroke_width(2)))
                .map_err(chart_error($path))?
                .label(s.label.clone())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
            $chart
                .draw_series(s.points.iter().map(|&(x, y)| Circle::new((x, y), 3, color.filled())))
                .map_err(chart_error($path))?;
        }
        $chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(chart_error($path))?;
    };
}

/// One line of a chart: points of a single query baseline, sorted by x.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone)]
pub struct AxisLabels {
    pub caption: String,
    pub x: String,
    pub y: String,
}

/// Latency per window, one series per label.
///
/// Several rows on the same window are averaged into one point.
pub fn window_series(ds: &Dataset) -> Vec<Series> {
    ds.baselines()
        .into_iter()
        .map(|label| {
            let mut by_window: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
            for o in ds.iter().filter(|o| o.query_baseline == label) {
                let acc = by_window.entry(o.window_id).or_insert((0.0, 0));
                acc.0 += o.latency;
                acc.1 += 1;
            }
            let points = by_window
                .into_iter()
                .map(|(w, (sum, n))| (w as f64, sum / n as f64))
                .collect();
            Series { label, points }
        })
        .collect()
}

/// Average latency per throughput, one series per label. Missing rows are left out.
pub fn throughput_series(rows: &[SummaryRow]) -> Vec<Series> {
    first_seen(rows.iter().map(|r| r.query_baseline.as_str()))
        .into_iter()
        .map(|label| {
            let mut points: Vec<(f64, f64)> = rows
                .iter()
                .filter(|r| r.query_baseline == label)
                .filter_map(|r| r.avg_latency.map(|avg| (r.throughput as f64, avg)))
                .collect();
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            Series {
                label: label.to_string(),
                points,
            }
        })
        .collect()
}

/// Window chart: linear window axis, log latency axis.
///
/// Returns false (and writes nothing) when no point can be drawn.
pub fn render_window_chart(path: &Path, labels: &AxisLabels, series: &[Series]) -> Result<bool> {
    let series = drop_non_positive(series, |&(_, y)| y > 0.0, path);
    let (Some(x), Some(y)) = (
        linear_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.0))),
        log_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1))),
    ) else {
        diagnostics::warn(format!("nothing to draw in {}", path.display()));
        return Ok(false);
    };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error(path))?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&labels.caption, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x, y.log_scale())
        .map_err(chart_error(path))?;

    chart
        .configure_mesh()
        .x_desc(labels.x.as_str())
        .y_desc(labels.y.as_str())
        .draw()
        .map_err(chart_error(path))?;

    draw_lines!(chart, series, path);

    root.present().map_err(chart_error(path))?;
    Ok(true)
}

/// Throughput chart: log throughput axis, log latency axis.
///
/// Returns false (and writes nothing) when no point can be drawn.
pub fn render_throughput_chart(path: &Path, labels: &AxisLabels, series: &[Series]) -> Result<bool> {
    let series = drop_non_positive(series, |&(x, y)| x > 0.0 && y > 0.0, path);
    let (Some(x), Some(y)) = (
        log_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.0))),
        log_range(series.iter().flat_map(|s| s.points.iter().map(|p| p.1))),
    ) else {
        diagnostics::warn(format!("nothing to draw in {}", path.display()));
        return Ok(false);
    };

    let root = BitMapBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(chart_error(path))?;
    let mut chart = ChartBuilder::on(&root)
        .caption(&labels.caption, ("sans-serif", 20).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x.log_scale(), y.log_scale())
        .map_err(chart_error(path))?;

    chart
        .configure_mesh()
        .x_desc(labels.x.as_str())
        .y_desc(labels.y.as_str())
        .draw()
        .map_err(chart_error(path))?;

    draw_lines!(chart, series, path);

    root.present().map_err(chart_error(path))?;
    Ok(true)
}

fn chart_error<E: fmt::Display>(path: &Path) -> impl Fn(E) -> anyhow::Error + '_ {
    move |e| {
        anyhow!(diagnostics::error_message(format!(
            "draw chart {}: {}",
            path.display(),
            e
        )))
    }
}

/// Copy of `series` without the points a log axis cannot show.
fn drop_non_positive(series: &[Series], keep: impl Fn(&(f64, f64)) -> bool, path: &Path) -> Vec<Series> {
    series
        .iter()
        .map(|s| {
            let points: Vec<(f64, f64)> = s.points.iter().copied().filter(|p| keep(p)).collect();
            if points.len() != s.points.len() {
                diagnostics::warn(format!(
                    "{}: dropped {} non-positive points of {} from log axis",
                    path.display(),
                    s.points.len() - points.len(),
                    s.label
                ));
            }
            Series {
                label: s.label.clone(),
                points,
            }
        })
        .collect()
}

fn bounds(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values.fold(None, |acc, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })
}

fn linear_range(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    let (lo, hi) = bounds(values)?;
    if lo == hi {
        return Some(lo - 1.0..hi + 1.0);
    }
    Some(lo..hi)
}

/// Positive range with some headroom; a single value is widened by a factor 2.
fn log_range(values: impl Iterator<Item = f64>) -> Option<Range<f64>> {
    let (lo, hi) = bounds(values.filter(|v| *v > 0.0))?;
    if lo == hi {
        return Some(lo / 2.0..hi * 2.0);
    }
    Some(lo * 0.8..hi * 1.25)
}
