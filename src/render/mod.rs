//! Chart rendering (PNG via plotters).

pub mod chart;

pub use chart::{AxisLabels, render_throughput_chart, render_window_chart, throughput_series, window_series};
