//! Fatal error kinds for a report run
//!
//! Malformed sample lines are not represented here: they are recovered by the
//! reader and surface as [`crate::stats::MalformedSample`] records instead.

use crate::config::CountingRange;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a series cannot be used for statistics
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InsufficientData {
    /// The source parsed to zero samples.
    #[error("series '{series}' has no valid samples ({malformed_count} malformed lines)")]
    EmptySource {
        series: String,
        malformed_count: usize,
    },
    /// Samples exist but none fall inside the counting range.
    #[error(
        "series '{series}' has no samples inside counting range [{}, {}] ({discarded_count} discarded)",
        range.lower,
        range.upper
    )]
    EmptyAfterFilter {
        series: String,
        discarded_count: usize,
        range: CountingRange,
    },
}

/// Errors that terminate a report run
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("cannot open source for series '{series}' at {}: {source}", path.display())]
    SourceUnavailable {
        series: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("insufficient data: {0}")]
    InsufficientData(#[from] InsufficientData),

    #[error("failed to render chart to {}: {reason}", path.display())]
    RenderFailure { path: PathBuf, reason: String },

    #[error("failed to export percentiles to {}: {reason}", path.display())]
    ExportFailure { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ReportError {
    /// Process exit code, distinct per error kind
    pub fn exit_code(&self) -> i32 {
        match self {
            ReportError::SourceUnavailable { .. } => 2,
            ReportError::InsufficientData(_) => 3,
            ReportError::RenderFailure { .. } => 4,
            ReportError::ExportFailure { .. } => 5,
            ReportError::InvalidConfig(_) => 64,
        }
    }
}

pub type Result<T> = core::result::Result<T, ReportError>;
