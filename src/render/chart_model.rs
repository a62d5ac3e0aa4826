//! Backend-independent description of the comparison chart
//!
//! Turns a [`ComparisonResult`] into drawable layers: empirical CDF step paths
//! (or histogram bars), percentile markers and the display window. Everything
//! here is a deterministic transform of the sorted data.

use crate::config::{ChartKind, DisplayRange};
use crate::core::comparator::{ComparisonResult, SeriesOutcome};
use crate::utils::helpers::format_rank;

/// Number of histogram bins shared by both series
pub const HISTOGRAM_BINS: usize = 50;

/// Plain RGB triple; the backend maps it to its own color type
pub type Rgb = (u8, u8, u8);

pub const SERIES_A_COLOR: Rgb = (0, 0, 255);
pub const SERIES_B_COLOR: Rgb = (255, 0, 0);

/// Which side of its anchor point a marker label is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelAnchor {
    Left,
    Right,
}

/// How the Y axis values are to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YAxis {
    /// Cumulative fraction in `[0, 1]`, labeled as percent
    Fraction,
    /// Sample count per bin
    Count,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayerShape {
    /// Polyline vertices of a step function
    Steps(Vec<(f64, f64)>),
    Bars(Vec<HistogramBin>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeriesLayer {
    pub name: String,
    pub color: Rgb,
    pub shape: LayerShape,
}

/// Vertical line at a percentile value with its label
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileMarker {
    pub x: f64,
    pub label_y: f64,
    pub label: String,
    pub color: Rgb,
    pub anchor: LabelAnchor,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartModel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_window: DisplayRange,
    pub y_window: DisplayRange,
    pub y_axis: YAxis,
    pub width: u32,
    pub height: u32,
    pub layers: Vec<SeriesLayer>,
    pub markers: Vec<PercentileMarker>,
}

/// `(value, fraction of samples <= value)` for every distinct value
pub fn empirical_cdf(sorted: &[f64]) -> Vec<(f64, f64)> {
    let total = sorted.len() as f64;
    let mut points: Vec<(f64, f64)> = Vec::new();
    for (index, &value) in sorted.iter().enumerate() {
        let fraction = (index + 1) as f64 / total;
        match points.last_mut() {
            Some(last) if last.0 == value => last.1 = fraction,
            _ => points.push((value, fraction)),
        }
    }
    points
}

/// Vertices of the step function through `cdf`, starting at zero
pub fn step_path(cdf: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut path = Vec::with_capacity(cdf.len() * 2);
    let mut previous = 0.0;
    for &(x, fraction) in cdf {
        path.push((x, previous));
        path.push((x, fraction));
        previous = fraction;
    }
    path
}

/// Equal-width bins over `[lower, upper]`
///
/// A zero-width span collapses into one bin holding every value.
pub fn histogram(sorted: &[f64], lower: f64, upper: f64, bins: usize) -> Vec<HistogramBin> {
    let span = upper - lower;
    if bins == 0 || span <= 0.0 {
        return vec![HistogramBin {
            start: lower,
            end: upper,
            count: sorted.len(),
        }];
    }

    let width = span / bins as f64;
    let mut counts = vec![0usize; bins];
    for &value in sorted {
        let index = (((value - lower) / width).floor().max(0.0) as usize).min(bins - 1);
        counts[index] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: lower + i as f64 * width,
            end: lower + (i + 1) as f64 * width,
            count,
        })
        .collect()
}

/// Default X window: the data extent, widened when degenerate
fn auto_x_window(result: &ComparisonResult) -> DisplayRange {
    let (lo, hi) = result.value_extent();
    if lo < hi {
        DisplayRange { lower: lo, upper: hi }
    } else {
        let pad = (lo.abs() * 0.05).max(1.0);
        DisplayRange {
            lower: lo - pad,
            upper: hi + pad,
        }
    }
}

/// Marker label, e.g. `E_P99.9:1234.5`
pub fn marker_label(tag: &str, rank: f64, value: f64) -> String {
    format!("{}_P{}:{:.1}", tag, format_rank(rank), value)
}

fn markers_for(
    outcome: &SeriesOutcome,
    color: Rgb,
    anchor: LabelAnchor,
    y_scale: f64,
    x_window: &DisplayRange,
    y_window: &DisplayRange,
) -> Vec<PercentileMarker> {
    outcome
        .percentiles
        .values
        .iter()
        .map(|p| PercentileMarker {
            x: p.value,
            label_y: p.rank / 100.0 * y_scale,
            label: marker_label(&outcome.source.tag, p.rank, p.value),
            color,
            anchor,
        })
        .filter(|m| x_window.contains(m.x) && y_window.contains(m.label_y))
        .collect()
}

fn clamp_point((x, y): (f64, f64), x_window: &DisplayRange, y_window: &DisplayRange) -> (f64, f64) {
    (
        x.clamp(x_window.lower, x_window.upper),
        y.clamp(y_window.lower, y_window.upper),
    )
}

impl ChartModel {
    /// Build the chart for a finished comparison
    ///
    /// Display ranges only change the window; every retained sample still
    /// contributes to the drawn distribution.
    pub fn from_result(result: &ComparisonResult) -> Self {
        let chart = &result.chart;
        let x_window = chart.display_x_range.unwrap_or_else(|| auto_x_window(result));
        let styles = [
            (SERIES_A_COLOR, LabelAnchor::Right),
            (SERIES_B_COLOR, LabelAnchor::Left),
        ];

        let (y_axis, layers, y_max) = match chart.kind {
            ChartKind::Cdf => {
                let layers = result
                    .both()
                    .iter()
                    .zip(styles)
                    .map(|(outcome, (color, _))| SeriesLayer {
                        name: outcome.source.name.clone(),
                        color,
                        shape: LayerShape::Steps(step_path(&empirical_cdf(&outcome.sorted))),
                    })
                    .collect::<Vec<_>>();
                (YAxis::Fraction, layers, 1.0)
            }
            ChartKind::Histogram => {
                let (lo, hi) = result.value_extent();
                let layers = result
                    .both()
                    .iter()
                    .zip(styles)
                    .map(|(outcome, (color, _))| SeriesLayer {
                        name: outcome.source.name.clone(),
                        color,
                        shape: LayerShape::Bars(histogram(&outcome.sorted, lo, hi, HISTOGRAM_BINS)),
                    })
                    .collect::<Vec<_>>();
                let tallest = layers
                    .iter()
                    .filter_map(|layer| match &layer.shape {
                        LayerShape::Bars(bins) => bins.iter().map(|b| b.count).max(),
                        LayerShape::Steps(_) => None,
                    })
                    .max()
                    .unwrap_or(1)
                    .max(1);
                (YAxis::Count, layers, tallest as f64 * 1.05)
            }
        };

        let y_window = chart.display_y_range.unwrap_or(DisplayRange {
            lower: 0.0,
            upper: y_max,
        });

        let layers = layers
            .into_iter()
            .map(|layer| SeriesLayer {
                shape: match layer.shape {
                    LayerShape::Steps(points) => LayerShape::Steps(
                        points
                            .into_iter()
                            .map(|p| clamp_point(p, &x_window, &y_window))
                            .collect(),
                    ),
                    bars => bars,
                },
                ..layer
            })
            .collect();

        let markers = result
            .both()
            .iter()
            .zip(styles)
            .flat_map(|(outcome, (color, anchor))| {
                markers_for(outcome, color, anchor, y_max, &x_window, &y_window)
            })
            .collect();

        Self {
            title: chart.title.clone(),
            x_label: chart.x_label.clone(),
            y_label: chart.y_label.clone(),
            x_window,
            y_window,
            y_axis,
            width: chart.width,
            height: chart.height,
            layers,
            markers,
        }
    }
}
