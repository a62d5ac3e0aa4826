//! CSV export of the computed percentiles
//!
//! Rows go to a scratch file that is renamed over the destination once every
//! row is written, so a failed export never leaves a truncated CSV behind.

use crate::core::comparator::ComparisonResult;
use crate::error::{ReportError, Result};
use crate::utils::helpers::{format_rank, scratch_path};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One exported row: a percentile of one series plus its counters
#[derive(Debug, Serialize)]
struct PercentileRow<'a> {
    series: &'a str,
    rank: String,
    value_ns: f64,
    raw_count: usize,
    malformed_count: usize,
    discarded_count: usize,
}

fn write_rows(result: &ComparisonResult, path: &Path) -> core::result::Result<(), String> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| e.to_string())?;
    for outcome in result.both() {
        for p in &outcome.percentiles.values {
            writer
                .serialize(PercentileRow {
                    series: &outcome.source.name,
                    rank: format_rank(p.rank),
                    value_ns: p.value,
                    raw_count: outcome.raw_count,
                    malformed_count: outcome.malformed_count,
                    discarded_count: outcome.filtered.discarded_count,
                })
                .map_err(|e| e.to_string())?;
        }
    }
    writer.flush().map_err(|e| e.to_string())
}

/// Write every (series, rank) pair of `result` to `path`
pub fn export_percentiles_csv(result: &ComparisonResult, path: &Path) -> Result<()> {
    let failure = |reason: String| ReportError::ExportFailure {
        path: path.to_path_buf(),
        reason,
    };

    let scratch = scratch_path(path);
    if let Err(reason) = write_rows(result, &scratch) {
        let _ = fs::remove_file(&scratch);
        return Err(failure(reason));
    }
    if let Err(e) = fs::rename(&scratch, path) {
        let _ = fs::remove_file(&scratch);
        return Err(failure(e.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComparisonConfig;
    use crate::core::comparator::DistributionComparator;
    use crate::stats::LatencySeries;

    #[test]
    fn writes_header_and_one_row_per_rank() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("percentiles.csv");
        let config = ComparisonConfig::default();
        let result = DistributionComparator::new(&config)
            .compare(
                LatencySeries::new("Epoll", (1..=10).map(f64::from).collect()),
                LatencySeries::new("io_uring", vec![3.0, 4.0]),
            )
            .unwrap();

        export_percentiles_csv(&result, &path).unwrap();

        assert!(!scratch_path(&path).exists());
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "series,rank,value_ns,raw_count,malformed_count,discarded_count"
        );
        assert_eq!(lines.len(), 1 + 2 * 4);
        assert!(lines[1].starts_with("Epoll,90,9.1"));
        assert!(lines[8].starts_with("io_uring,99.9,"));
    }

    #[test]
    fn unwritable_path_is_export_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing/percentiles.csv");
        let config = ComparisonConfig::default();
        let result = DistributionComparator::new(&config)
            .compare(
                LatencySeries::new("Epoll", vec![1.0]),
                LatencySeries::new("io_uring", vec![2.0]),
            )
            .unwrap();

        let err = export_percentiles_csv(&result, &path).unwrap_err();
        assert!(matches!(err, ReportError::ExportFailure { .. }));
    }

    #[test]
    fn failed_rename_leaves_no_scratch_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the destination makes the final rename fail.
        let path = dir.path().join("percentiles.csv");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), b"x").unwrap();
        let config = ComparisonConfig::default();
        let result = DistributionComparator::new(&config)
            .compare(
                LatencySeries::new("Epoll", vec![1.0]),
                LatencySeries::new("io_uring", vec![2.0]),
            )
            .unwrap();

        let err = export_percentiles_csv(&result, &path).unwrap_err();
        assert!(matches!(err, ReportError::ExportFailure { .. }));
        assert!(!scratch_path(&path).exists());
        assert!(path.join("keep").exists());
    }
}
