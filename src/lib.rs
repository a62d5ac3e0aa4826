//! Latency Distribution Comparison Library
//!
//! Reads two latency logs, filters them to an optional shared counting range,
//! computes interpolated percentiles and renders their empirical CDFs.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod render;
pub mod stats;
pub mod ui;
pub mod utils;

pub use crate::core::{run_report, RunOptions};
pub use error::{ReportError, Result};

/// Library version
pub const VERSION: &str = "0.1.0";
