//! Distribution comparator
//!
//! Reads both series, applies the shared counting range, computes percentiles
//! and assembles a [`ComparisonResult`]. Nothing here touches rendering.

use crate::config::{ChartSettings, ComparisonConfig, CountingRange, SeriesSource};
use crate::error::{InsufficientData, Result};
use crate::stats::{read_series_file, FilteredSeries, LatencySeries, PercentileReport};

/// Everything computed for one side of the comparison
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesOutcome {
    pub source: SeriesSource,
    pub raw_count: usize,
    pub malformed_count: usize,
    pub filtered: FilteredSeries,
    /// `filtered.values` in ascending order
    pub sorted: Vec<f64>,
    pub percentiles: PercentileReport,
}

/// Aggregated result of one comparison run
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonResult {
    pub series_a: SeriesOutcome,
    pub series_b: SeriesOutcome,
    pub counting_range: Option<CountingRange>,
    pub chart: ChartSettings,
}

impl ComparisonResult {
    pub fn both(&self) -> [&SeriesOutcome; 2] {
        [&self.series_a, &self.series_b]
    }

    /// Smallest and largest retained value across both series
    pub fn value_extent(&self) -> (f64, f64) {
        self.both()
            .iter()
            .filter_map(|s| Some((*s.sorted.first()?, *s.sorted.last()?)))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (min, max)| {
                (lo.min(min), hi.max(max))
            })
    }
}

/// Compares two latency series under one configuration
pub struct DistributionComparator<'a> {
    config: &'a ComparisonConfig,
}

impl<'a> DistributionComparator<'a> {
    pub fn new(config: &'a ComparisonConfig) -> Self {
        Self { config }
    }

    /// Read both sources from disk and compare them
    ///
    /// Stops at the first source that cannot be opened.
    pub fn run(&self) -> Result<ComparisonResult> {
        self.run_with(|_| {})
    }

    /// Like [`run`](Self::run), calling `on_read` with each series as soon as
    /// it is read, so its malformed lines can be reported even if the other
    /// source then fails
    pub fn run_with<F>(&self, mut on_read: F) -> Result<ComparisonResult>
    where
        F: FnMut(&LatencySeries),
    {
        let a = read_series_file(&self.config.series_a.name, &self.config.series_a.path)?;
        on_read(&a);
        let b = read_series_file(&self.config.series_b.name, &self.config.series_b.path)?;
        on_read(&b);
        self.compare(a, b)
    }

    /// Compare two already read series
    pub fn compare(&self, a: LatencySeries, b: LatencySeries) -> Result<ComparisonResult> {
        for series in [&a, &b] {
            if series.raw_count() == 0 {
                return Err(InsufficientData::EmptySource {
                    series: series.name.clone(),
                    malformed_count: series.malformed_count(),
                }
                .into());
            }
        }

        let range = self.config.counting_range;
        let filtered_a = FilteredSeries::from_series(&a, range);
        let filtered_b = FilteredSeries::from_series(&b, range);
        if let Some(range) = range {
            for filtered in [&filtered_a, &filtered_b] {
                if filtered.is_empty() {
                    return Err(InsufficientData::EmptyAfterFilter {
                        series: filtered.source_name.clone(),
                        discarded_count: filtered.discarded_count,
                        range,
                    }
                    .into());
                }
            }
        }

        Ok(ComparisonResult {
            series_a: self.outcome(&self.config.series_a, &a, filtered_a)?,
            series_b: self.outcome(&self.config.series_b, &b, filtered_b)?,
            counting_range: range,
            chart: self.config.chart.clone(),
        })
    }

    fn outcome(
        &self,
        source: &SeriesSource,
        series: &LatencySeries,
        filtered: FilteredSeries,
    ) -> Result<SeriesOutcome> {
        let sorted = filtered.sorted_values();
        let percentiles =
            PercentileReport::from_sorted(&series.name, &sorted, &self.config.percentiles)
                .ok_or_else(|| InsufficientData::EmptySource {
                    series: series.name.clone(),
                    malformed_count: series.malformed_count(),
                })?;

        Ok(SeriesOutcome {
            source: source.clone(),
            raw_count: series.raw_count(),
            malformed_count: series.malformed_count(),
            filtered,
            sorted,
            percentiles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Bounds;
    use crate::error::ReportError;

    fn series(name: &str, values: &[f64]) -> LatencySeries {
        LatencySeries::new(name, values.to_vec())
    }

    fn one_to_ten(name: &str) -> LatencySeries {
        series(name, &(1..=10).map(f64::from).collect::<Vec<_>>())
    }

    #[test]
    fn first_series_is_reported_before_second_source_fails() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("epoll.txt");
        std::fs::write(&a, "1\nbad\n3\n").unwrap();
        let mut config = ComparisonConfig::default();
        config.series_a.path = a;
        config.series_b.path = dir.path().join("missing.txt");

        let mut seen = Vec::new();
        let err = DistributionComparator::new(&config)
            .run_with(|series| seen.push((series.name.clone(), series.malformed_count())))
            .unwrap_err();

        assert!(matches!(err, ReportError::SourceUnavailable { .. }));
        assert_eq!(seen, vec![("Epoll".to_string(), 1)]);
    }

    #[test]
    fn compares_two_series_with_default_ranks() {
        let config = ComparisonConfig::default();
        let result = DistributionComparator::new(&config)
            .compare(one_to_ten("Epoll"), series("io_uring", &[5.0, 6.0, 7.0]))
            .unwrap();

        assert_eq!(result.series_a.raw_count, 10);
        assert_eq!(result.series_a.percentiles.values.len(), 4);
        assert!((result.series_a.percentiles.get(90.0).unwrap() - 9.1).abs() < 1e-9);
        assert_eq!(result.series_b.sorted, vec![5.0, 6.0, 7.0]);
        assert_eq!(result.value_extent(), (1.0, 10.0));
        assert_eq!(result.chart, config.chart);
    }

    #[test]
    fn same_range_is_applied_to_both() {
        let mut config = ComparisonConfig::default();
        config.counting_range = Some(Bounds::new(3.0, 8.0).unwrap());
        let result = DistributionComparator::new(&config)
            .compare(one_to_ten("Epoll"), one_to_ten("io_uring"))
            .unwrap();

        for outcome in result.both() {
            assert_eq!(outcome.filtered.values, vec![3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
            assert_eq!(outcome.filtered.discarded_count, 4);
            assert_eq!(outcome.filtered.range, config.counting_range);
        }
    }

    #[test]
    fn empty_source_names_the_series() {
        let config = ComparisonConfig::default();
        let err = DistributionComparator::new(&config)
            .compare(one_to_ten("Epoll"), series("io_uring", &[]))
            .unwrap_err();
        match err {
            ReportError::InsufficientData(InsufficientData::EmptySource { series, .. }) => {
                assert_eq!(series, "io_uring")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn nothing_in_range_is_post_filter_failure() {
        let mut config = ComparisonConfig::default();
        let range = Bounds::new(1000.0, 2000.0).unwrap();
        config.counting_range = Some(range);
        let err = DistributionComparator::new(&config)
            .compare(one_to_ten("Epoll"), series("io_uring", &[1500.0]))
            .unwrap_err();
        match err {
            ReportError::InsufficientData(InsufficientData::EmptyAfterFilter {
                series,
                discarded_count,
                range: r,
            }) => {
                assert_eq!(series, "Epoll");
                assert_eq!(discarded_count, 10);
                assert_eq!(r, range);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
