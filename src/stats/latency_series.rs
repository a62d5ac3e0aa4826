//! Latency series as read from one input log
//!
//! This module holds the raw samples of one measured subsystem together with
//! the lines that could not be parsed.

/// A line that could not be turned into a sample
#[derive(Debug, Clone, PartialEq)]
pub struct MalformedSample {
    /// 1-based line number in the source
    pub line_number: usize,
    pub content: String,
    pub reason: MalformedReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedReason {
    Empty,
    NotANumber,
    NotFinite,
    Negative,
}

impl std::fmt::Display for MalformedReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MalformedReason::Empty => "blank line",
            MalformedReason::NotANumber => "not a number",
            MalformedReason::NotFinite => "not a finite number",
            MalformedReason::Negative => "negative latency",
        };
        f.write_str(text)
    }
}

/// Samples of one named series, in file order
#[derive(Debug, Clone, PartialEq)]
pub struct LatencySeries {
    pub name: String,
    /// Nanoseconds, insertion order equals file order
    pub raw_samples: Vec<f64>,
    pub malformed: Vec<MalformedSample>,
}

impl LatencySeries {
    pub fn new(name: impl Into<String>, raw_samples: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            raw_samples,
            malformed: Vec::new(),
        }
    }

    #[inline]
    pub fn raw_count(&self) -> usize {
        self.raw_samples.len()
    }

    #[inline]
    pub fn malformed_count(&self) -> usize {
        self.malformed.len()
    }

    /// Lines consumed from the source, parsed or not
    pub fn total_lines(&self) -> usize {
        self.raw_count() + self.malformed_count()
    }
}
