//! Percentile calculation with linear interpolation between order statistics
//!
//! For `n` sorted values and rank `p`, the fractional position is
//! `r = p / 100 * (n - 1)`; the result interpolates between `sorted[floor(r)]`
//! and `sorted[ceil(r)]`.

/// Value at one requested rank
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PercentileValue {
    pub rank: f64,
    pub value: f64,
}

/// Percentiles of one series
#[derive(Debug, Clone, PartialEq)]
pub struct PercentileReport {
    pub series_name: String,
    /// Ordered by rank, ascending
    pub values: Vec<PercentileValue>,
}

/// Interpolated percentile of ascending `sorted` data
///
/// Ranks outside `[0, 100]` are clamped. Returns `None` for empty input.
pub fn percentile_of_sorted(sorted: &[f64], rank: f64) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let r = (rank.clamp(0.0, 100.0) / 100.0) * last as f64;
    let lo = (r.floor() as usize).min(last);
    let hi = (r.ceil() as usize).min(last);

    let low = sorted[lo];
    if lo == hi {
        return Some(low);
    }
    let high = sorted[hi];
    // Rounding may step past `high`; clamping keeps ranks monotone across segments.
    let value = low + (r - lo as f64) * (high - low);
    Some(value.clamp(low, high))
}

impl PercentileReport {
    /// Compute the given ranks over ascending `sorted` data
    ///
    /// `None` when `sorted` is empty.
    pub fn from_sorted(series_name: &str, sorted: &[f64], ranks: &[f64]) -> Option<Self> {
        let mut ranks = ranks.to_vec();
        ranks.sort_by(|a, b| a.total_cmp(b));
        ranks.dedup();

        let values = ranks
            .into_iter()
            .map(|rank| {
                percentile_of_sorted(sorted, rank).map(|value| PercentileValue { rank, value })
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Self {
            series_name: series_name.to_string(),
            values,
        })
    }

    /// Compute the given ranks over unsorted values
    pub fn compute(series_name: &str, values: &[f64], ranks: &[f64]) -> Option<Self> {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Self::from_sorted(series_name, &sorted, ranks)
    }

    /// Value reported for `rank`, if it was requested
    pub fn get(&self, rank: f64) -> Option<f64> {
        self.values
            .iter()
            .find(|p| p.rank == rank)
            .map(|p| p.value)
    }
}
