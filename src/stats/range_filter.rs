//! Counting-range filter
//!
//! Selects the samples inside an optional closed interval. Selection keeps the
//! original order and never duplicates a value.

use crate::config::CountingRange;
use crate::stats::latency_series::LatencySeries;

/// Samples of one series that take part in the statistics
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSeries {
    /// Name of the [`LatencySeries`] these values came from
    pub source_name: String,
    pub values: Vec<f64>,
    pub discarded_count: usize,
    pub range: Option<CountingRange>,
}

/// Keep the values with `lower <= v <= upper`, or all of them without a range
pub fn filter_values(values: &[f64], range: Option<&CountingRange>) -> Vec<f64> {
    match range {
        Some(range) => values.iter().copied().filter(|&v| range.contains(v)).collect(),
        None => values.to_vec(),
    }
}

impl FilteredSeries {
    pub fn from_series(series: &LatencySeries, range: Option<CountingRange>) -> Self {
        let values = filter_values(&series.raw_samples, range.as_ref());
        Self {
            source_name: series.name.clone(),
            discarded_count: series.raw_count() - values.len(),
            values,
            range,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Copy of the values in ascending order
    pub fn sorted_values(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        sorted
    }
}
