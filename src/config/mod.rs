//! Run configuration
//!
//! Everything that stays constant across one comparison run lives in
//! [`ComparisonConfig`]. It can be loaded from a JSON settings file and is then
//! overridden by command line flags.

pub mod bounds;

pub use bounds::{Bounds, CountingRange, DisplayRange};

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Percentile ranks reported when none are requested
pub const DEFAULT_PERCENTILES: [f64; 4] = [90.0, 95.0, 99.0, 99.9];

// ============================================================================
// CONFIGURATION STRUCTURES
// ============================================================================

/// One input log and how to label it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSource {
    #[serde(rename = "Name")]
    pub name: String,
    /// Short prefix used in percentile marker labels
    #[serde(rename = "Tag")]
    pub tag: String,
    #[serde(rename = "Path")]
    pub path: PathBuf,
}

impl SeriesSource {
    pub fn new(name: impl Into<String>, tag: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            path: path.into(),
        }
    }
}

/// Kind of chart drawn for the comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Overlaid empirical CDFs
    #[default]
    Cdf,
    /// Overlaid frequency histograms
    Histogram,
}

/// Rendering-only settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "XLabel")]
    pub x_label: String,
    #[serde(rename = "YLabel")]
    pub y_label: String,
    #[serde(rename = "DisplayXRange", deserialize_with = "validate_optional_bounds")]
    pub display_x_range: Option<DisplayRange>,
    #[serde(rename = "DisplayYRange", deserialize_with = "validate_optional_bounds")]
    pub display_y_range: Option<DisplayRange>,
    #[serde(rename = "OutputPath")]
    pub output_path: PathBuf,
    #[serde(rename = "Width", deserialize_with = "validate_positive_u32")]
    pub width: u32,
    #[serde(rename = "Height", deserialize_with = "validate_positive_u32")]
    pub height: u32,
    #[serde(rename = "Kind")]
    pub kind: ChartKind,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            title: "Latency Distribution: Epoll vs. io_uring".to_string(),
            x_label: "Latency (nanoseconds)".to_string(),
            y_label: "Cumulative Probability (%)".to_string(),
            display_x_range: None,
            display_y_range: None,
            output_path: PathBuf::from("latency_cdf_comparison.png"),
            width: 1200,
            height: 700,
            kind: ChartKind::Cdf,
        }
    }
}

/// Full configuration of one comparison run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComparisonConfig {
    #[serde(rename = "SeriesA")]
    pub series_a: SeriesSource,
    #[serde(rename = "SeriesB")]
    pub series_b: SeriesSource,
    /// Applied identically to both series; `None` keeps every sample.
    #[serde(rename = "CountingRange", deserialize_with = "validate_optional_bounds")]
    pub counting_range: Option<CountingRange>,
    #[serde(rename = "Percentiles", deserialize_with = "validate_percentile_ranks")]
    pub percentiles: Vec<f64>,
    #[serde(rename = "Chart")]
    pub chart: ChartSettings,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            series_a: SeriesSource::new("Epoll", "E", "latencies_epoll.txt"),
            series_b: SeriesSource::new("io_uring", "IOU", "latencies_io_uring.txt"),
            counting_range: None,
            percentiles: DEFAULT_PERCENTILES.to_vec(),
            chart: ChartSettings::default(),
        }
    }
}

impl ComparisonConfig {
    /// Load a JSON settings file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ReportError::InvalidConfig(format!(
                "cannot read settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        let config: ComparisonConfig = serde_json::from_str(&content).map_err(|e| {
            ReportError::InvalidConfig(format!(
                "cannot parse settings file {}: {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Check every invariant a run relies on
    pub fn validate(&self) -> Result<()> {
        for source in [&self.series_a, &self.series_b] {
            if source.name.trim().is_empty() {
                return Err(ReportError::InvalidConfig(
                    "series names must not be empty".to_string(),
                ));
            }
        }
        if self.series_a.name == self.series_b.name {
            return Err(ReportError::InvalidConfig(format!(
                "both series are named '{}'",
                self.series_a.name
            )));
        }
        check_percentile_ranks(&self.percentiles).map_err(ReportError::InvalidConfig)?;

        let ranges = [
            ("counting range", self.counting_range),
            ("display X range", self.chart.display_x_range),
            ("display Y range", self.chart.display_y_range),
        ];
        for (what, range) in ranges {
            if let Some(range) = range {
                range
                    .check()
                    .map_err(|e| ReportError::InvalidConfig(format!("{}: {}", what, e)))?;
            }
        }
        for range in [self.chart.display_x_range, self.chart.display_y_range]
            .into_iter()
            .flatten()
        {
            if range.lower == range.upper {
                return Err(ReportError::InvalidConfig(format!(
                    "display range [{}, {}] has zero width",
                    range.lower, range.upper
                )));
            }
        }
        if self.chart.width == 0 || self.chart.height == 0 {
            return Err(ReportError::InvalidConfig(format!(
                "chart size must be positive, got {}x{}",
                self.chart.width, self.chart.height
            )));
        }
        Ok(())
    }
}

fn check_percentile_ranks(ranks: &[f64]) -> core::result::Result<(), String> {
    if ranks.is_empty() {
        return Err("at least one percentile rank is required".to_string());
    }
    match ranks.iter().find(|&&p| !(p > 0.0 && p < 100.0)) {
        Some(bad) => Err(format!(
            "percentile rank {} is outside the open interval (0, 100)",
            bad
        )),
        None => Ok(()),
    }
}

fn validate_percentile_ranks<'de, D>(deserializer: D) -> core::result::Result<Vec<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let ranks = Vec::<f64>::deserialize(deserializer)?;
    check_percentile_ranks(&ranks).map_err(serde::de::Error::custom)?;
    Ok(ranks)
}

fn validate_optional_bounds<'de, D>(deserializer: D) -> core::result::Result<Option<Bounds>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<Bounds>::deserialize(deserializer)?;
    if let Some(bounds) = &value {
        bounds.check().map_err(serde::de::Error::custom)?;
    }
    Ok(value)
}

fn validate_positive_u32<'de, D>(deserializer: D) -> core::result::Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = u32::deserialize(deserializer)?;
    if value > 0 {
        Ok(value)
    } else {
        Err(serde::de::Error::custom("Value must be positive"))
    }
}
