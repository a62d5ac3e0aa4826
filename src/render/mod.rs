//! Comparison renderer
//!
//! Maps a [`ComparisonResult`] to a [`ChartModel`] and hands it to a
//! [`ChartBackend`]. The image is drawn to a sibling scratch file and moved into
//! place only once drawing succeeded, so a failed run never leaves a partial
//! artifact at the output path.

pub mod chart_model;
pub mod plotters_backend;

pub use chart_model::ChartModel;
pub use plotters_backend::PlottersBackend;

use crate::core::comparator::ComparisonResult;
use crate::error::{ReportError, Result};
use crate::utils::helpers::scratch_path;
use std::fs;
use std::path::{Path, PathBuf};

/// Capability to turn a chart description into an image file
pub trait ChartBackend {
    fn draw(&self, chart: &ChartModel, output: &Path) -> core::result::Result<(), String>;
}

/// Render the comparison and write it to the configured output path
pub fn render_comparison(result: &ComparisonResult, backend: &dyn ChartBackend) -> Result<PathBuf> {
    let output = result.chart.output_path.clone();
    let failure = |reason: String| ReportError::RenderFailure {
        path: output.clone(),
        reason,
    };

    if output.file_name().is_none() {
        return Err(failure("output path has no file name".to_string()));
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(failure(format!(
                "directory {} does not exist",
                parent.display()
            )));
        }
    }

    let model = ChartModel::from_result(result);
    let scratch = scratch_path(&output);
    if let Err(reason) = backend.draw(&model, &scratch) {
        let _ = fs::remove_file(&scratch);
        return Err(failure(reason));
    }
    if let Err(e) = fs::rename(&scratch, &output) {
        let _ = fs::remove_file(&scratch);
        return Err(failure(e.to_string()));
    }
    Ok(output)
}
