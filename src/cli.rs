//! Command line interface

use crate::config::{Bounds, ChartKind, ComparisonConfig};
use crate::core::RunOptions;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

fn parse_bounds(s: &str) -> core::result::Result<Bounds, String> {
    s.parse()
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "latency-cdf-report",
    version,
    about = "Compare two latency logs as empirical CDFs with percentile markers"
)]
pub struct Cli {
    /// JSON settings file; flags below override its values
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Latency log of the first series (one value in ns per line)
    #[arg(long)]
    pub series_a: Option<PathBuf>,

    /// Display name of the first series
    #[arg(long)]
    pub name_a: Option<String>,

    /// Marker label prefix of the first series
    #[arg(long)]
    pub tag_a: Option<String>,

    /// Latency log of the second series
    #[arg(long)]
    pub series_b: Option<PathBuf>,

    /// Display name of the second series
    #[arg(long)]
    pub name_b: Option<String>,

    /// Marker label prefix of the second series
    #[arg(long)]
    pub tag_b: Option<String>,

    /// Only count samples inside LO:HI (inclusive), for both series
    #[arg(long, value_parser = parse_bounds, value_name = "LO:HI")]
    pub count_range: Option<Bounds>,

    /// Visible X window, LO:HI
    #[arg(long, value_parser = parse_bounds, value_name = "LO:HI")]
    pub x_range: Option<Bounds>,

    /// Visible Y window, LO:HI
    #[arg(long, value_parser = parse_bounds, value_name = "LO:HI")]
    pub y_range: Option<Bounds>,

    #[arg(long)]
    pub x_label: Option<String>,

    #[arg(long)]
    pub y_label: Option<String>,

    #[arg(long)]
    pub title: Option<String>,

    /// Output image path
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Percentile ranks to report, comma separated
    #[arg(long, value_delimiter = ',')]
    pub percentiles: Option<Vec<f64>>,

    #[arg(long, value_enum)]
    pub chart: Option<ChartKind>,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Also write the percentiles to this CSV file
    #[arg(long)]
    pub export_csv: Option<PathBuf>,

    /// Suppress everything except warnings and errors
    #[arg(long, short)]
    pub quiet: bool,
}

impl Cli {
    /// Resolve the run configuration: defaults, then settings file, then flags
    pub fn into_config(self) -> Result<(ComparisonConfig, RunOptions)> {
        let mut config = match &self.settings {
            Some(path) => ComparisonConfig::load(path)?,
            None => ComparisonConfig::default(),
        };

        if let Some(path) = self.series_a {
            config.series_a.path = path;
        }
        if let Some(name) = self.name_a {
            config.series_a.name = name;
        }
        if let Some(tag) = self.tag_a {
            config.series_a.tag = tag;
        }
        if let Some(path) = self.series_b {
            config.series_b.path = path;
        }
        if let Some(name) = self.name_b {
            config.series_b.name = name;
        }
        if let Some(tag) = self.tag_b {
            config.series_b.tag = tag;
        }
        if self.count_range.is_some() {
            config.counting_range = self.count_range;
        }
        if self.x_range.is_some() {
            config.chart.display_x_range = self.x_range;
        }
        if self.y_range.is_some() {
            config.chart.display_y_range = self.y_range;
        }
        if let Some(label) = self.x_label {
            config.chart.x_label = label;
        }
        if let Some(label) = self.y_label {
            config.chart.y_label = label;
        }
        if let Some(title) = self.title {
            config.chart.title = title;
        }
        if let Some(output) = self.output {
            config.chart.output_path = output;
        }
        if let Some(ranks) = self.percentiles {
            config.percentiles = ranks;
        }
        if let Some(kind) = self.chart {
            config.chart.kind = kind;
        }
        if let Some(width) = self.width {
            config.chart.width = width;
        }
        if let Some(height) = self.height {
            config.chart.height = height;
        }

        config.validate()?;
        let options = RunOptions {
            export_csv: self.export_csv,
            quiet: self.quiet,
        };
        Ok((config, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("latency-cdf-report").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn no_flags_gives_defaults() {
        let (config, options) = parse(&[]).into_config().unwrap();
        assert_eq!(config, ComparisonConfig::default());
        assert!(!options.quiet);
        assert!(options.export_csv.is_none());
    }

    #[test]
    fn flags_override_defaults() {
        let cli = parse(&[
            "--series-a",
            "a.txt",
            "--name-a",
            "TCP",
            "--series-b",
            "b.txt",
            "--name-b",
            "UDP",
            "--count-range",
            "100:2000",
            "--x-range",
            "0:500",
            "--percentiles",
            "50,99",
            "--chart",
            "histogram",
            "--output",
            "cmp.png",
            "--export-csv",
            "p.csv",
            "--quiet",
        ]);
        let (config, options) = cli.into_config().unwrap();

        assert_eq!(config.series_a.path, PathBuf::from("a.txt"));
        assert_eq!(config.series_a.name, "TCP");
        assert_eq!(config.series_b.name, "UDP");
        assert_eq!(config.counting_range, Some(Bounds { lower: 100.0, upper: 2000.0 }));
        assert_eq!(config.chart.display_x_range, Some(Bounds { lower: 0.0, upper: 500.0 }));
        assert_eq!(config.chart.display_y_range, None);
        assert_eq!(config.percentiles, vec![50.0, 99.0]);
        assert_eq!(config.chart.kind, ChartKind::Histogram);
        assert_eq!(config.chart.output_path, PathBuf::from("cmp.png"));
        assert_eq!(options.export_csv, Some(PathBuf::from("p.csv")));
        assert!(options.quiet);
    }

    #[test]
    fn malformed_range_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["latency-cdf-report", "--count-range", "2000:100"]);
        assert!(result.is_err());
    }

    #[test]
    fn out_of_range_percentile_is_invalid_config() {
        let err = parse(&["--percentiles", "90,100"]).into_config().unwrap_err();
        assert!(matches!(err, ReportError::InvalidConfig(_)));
    }

    #[test]
    fn flags_win_over_settings_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "Chart": {{ "Title": "From file", "XLabel": "ns" }}, "Percentiles": [50] }}"#
        )
        .unwrap();
        let settings = file.path().to_str().unwrap().to_string();

        let (config, _) = parse(&["--settings", &settings, "--title", "From flag"])
            .into_config()
            .unwrap();
        assert_eq!(config.chart.title, "From flag");
        assert_eq!(config.chart.x_label, "ns");
        assert_eq!(config.percentiles, vec![50.0]);
    }
}
