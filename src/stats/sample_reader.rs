//! Sample reader for newline-delimited latency logs
//!
//! Each line holds one latency in nanoseconds. Lines that fail to parse are
//! skipped and recorded on the series; they never abort the read. Printing the
//! warnings is left to the caller.

use crate::error::{ReportError, Result};
use crate::stats::latency_series::{LatencySeries, MalformedReason, MalformedSample};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// Parse one trimmed line into a sample
pub fn parse_sample(text: &str) -> core::result::Result<f64, MalformedReason> {
    if text.is_empty() {
        return Err(MalformedReason::Empty);
    }
    let value: f64 = text.parse().map_err(|_| MalformedReason::NotANumber)?;
    if !value.is_finite() {
        return Err(MalformedReason::NotFinite);
    }
    if value < 0.0 {
        return Err(MalformedReason::Negative);
    }
    Ok(value)
}

/// Read a series from any line source
///
/// Invalid UTF-8 on a line makes only that line malformed. An I/O error while
/// reading is returned as-is.
pub fn read_series<R: BufRead>(name: &str, mut reader: R) -> io::Result<LatencySeries> {
    let mut series = LatencySeries::new(name, Vec::new());
    let mut buf = Vec::new();
    let mut line_number = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let text = String::from_utf8_lossy(&buf);
        let trimmed = text.trim();
        match parse_sample(trimmed) {
            Ok(value) => series.raw_samples.push(value),
            Err(reason) => {
                series.malformed.push(MalformedSample {
                    line_number,
                    content: trimmed.to_string(),
                    reason,
                });
            }
        }
    }

    Ok(series)
}

/// Read a series from a file
///
/// The file is closed as soon as its content is consumed. Failing to open or
/// read it is [`ReportError::SourceUnavailable`].
pub fn read_series_file(name: &str, path: &Path) -> Result<LatencySeries> {
    let unavailable = |source: io::Error| ReportError::SourceUnavailable {
        series: name.to_string(),
        path: path.to_path_buf(),
        source,
    };
    let file = File::open(path).map_err(unavailable)?;
    read_series(name, BufReader::new(file)).map_err(unavailable)
}
