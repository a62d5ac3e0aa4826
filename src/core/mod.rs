//! Report run orchestration
//!
//! One run reads both series, computes the comparison, prints diagnostics,
//! renders the chart and optionally exports the percentiles. Any fatal error
//! leaves no artifact behind: a failed export also removes the chart.

pub mod comparator;

use crate::config::ComparisonConfig;
use crate::error::Result;
use crate::render::{render_comparison, ChartBackend, PlottersBackend};
use crate::ui::console;
use crate::utils::export::export_percentiles_csv;
use comparator::{ComparisonResult, DistributionComparator};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Options that shape a run without changing its results
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Also write the percentiles as CSV
    pub export_csv: Option<PathBuf>,
    /// Only warnings and fatal errors are printed
    pub quiet: bool,
}

/// Paths written by a successful run
#[derive(Debug, Clone, PartialEq)]
pub struct RunArtifacts {
    pub chart: PathBuf,
    pub csv: Option<PathBuf>,
}

fn spinner(quiet: bool, message: &'static str) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// Read, compare and print; nothing is written
pub fn compare(config: &ComparisonConfig, options: &RunOptions) -> Result<ComparisonResult> {
    config.validate()?;

    let bar = spinner(options.quiet, "Reading latency samples...");
    let outcome = DistributionComparator::new(config)
        .run_with(|series| bar.suspend(|| console::warn_malformed_lines(series)));
    bar.finish_and_clear();
    let result = outcome?;

    if !options.quiet {
        console::print_report(&result);
    }
    Ok(result)
}

/// Full run with the PNG backend
pub fn run_report(config: &ComparisonConfig, options: &RunOptions) -> Result<RunArtifacts> {
    run_report_with(config, options, &PlottersBackend)
}

/// Full run with a caller-supplied chart backend
pub fn run_report_with(
    config: &ComparisonConfig,
    options: &RunOptions,
    backend: &dyn ChartBackend,
) -> Result<RunArtifacts> {
    if !options.quiet {
        console::print_title(&config.chart.title);
    }
    let result = compare(config, options)?;

    let bar = spinner(options.quiet, "Rendering chart...");
    let rendered = render_comparison(&result, backend);
    bar.finish_and_clear();
    let chart = rendered?;
    if !options.quiet {
        console::print_written("Chart", &chart);
    }

    let csv = match &options.export_csv {
        Some(path) => {
            if let Err(e) = export_percentiles_csv(&result, path) {
                let _ = fs::remove_file(&chart);
                return Err(e);
            }
            if !options.quiet {
                console::print_written("Percentiles", path);
            }
            Some(path.clone())
        }
        None => None,
    };

    Ok(RunArtifacts { chart, csv })
}
