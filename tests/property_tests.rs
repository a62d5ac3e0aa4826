//! Property tests for the statistics pipeline.
//!
//! 1. Line accounting: parsed + malformed equals lines read
//! 2. Filter idempotence: filtering twice with one range changes nothing
//! 3. Percentile monotonicity: higher rank never gives a lower value
//! 4. Constant series: every percentile equals the constant

use latency_cdf_report::config::Bounds;
use latency_cdf_report::stats::{
    filter_values, percentile_of_sorted, read_series, FilteredSeries, LatencySeries,
};
use proptest::prelude::*;
use std::io::Cursor;

// ── Strategies (proptest) ────────────────────────────────────────────

fn arb_latency() -> impl Strategy<Value = f64> {
    (0.0..1.0e7_f64).prop_map(|v| (v * 10.0).round() / 10.0)
}

fn arb_line() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_latency().prop_map(|v| v.to_string()),
        Just(String::new()),
        Just("abc".to_string()),
        Just("  42  ".to_string()),
        Just("NaN".to_string()),
        Just("-5".to_string()),
    ]
}

fn arb_bounds() -> impl Strategy<Value = Bounds> {
    (arb_latency(), arb_latency()).prop_map(|(a, b)| Bounds {
        lower: a.min(b),
        upper: a.max(b),
    })
}

proptest! {
    #[test]
    fn parsed_plus_malformed_equals_lines(lines in prop::collection::vec(arb_line(), 0..200)) {
        let input: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let series = read_series("a", Cursor::new(input)).unwrap();
        prop_assert_eq!(series.raw_count() + series.malformed_count(), lines.len());
    }

    #[test]
    fn filtering_is_idempotent(
        values in prop::collection::vec(arb_latency(), 0..300),
        range in arb_bounds(),
    ) {
        let once = filter_values(&values, Some(&range));
        let twice = filter_values(&once, Some(&range));
        prop_assert_eq!(&once, &twice);

        let series = LatencySeries::new("a", values.clone());
        let filtered = FilteredSeries::from_series(&series, Some(range));
        let again =
            FilteredSeries::from_series(&LatencySeries::new("a", filtered.values.clone()), Some(range));
        prop_assert_eq!(&again.values, &filtered.values);
        prop_assert_eq!(again.discarded_count, 0);
        prop_assert_eq!(filtered.discarded_count + filtered.len(), values.len());
    }

    #[test]
    fn percentiles_are_monotone(
        mut values in prop::collection::vec(arb_latency(), 1..300),
        mut ranks in prop::collection::vec(0.001..99.999_f64, 2..12),
    ) {
        values.sort_by(|a, b| a.total_cmp(b));
        ranks.sort_by(|a, b| a.total_cmp(b));
        let results: Vec<f64> = ranks
            .iter()
            .map(|&p| percentile_of_sorted(&values, p).unwrap())
            .collect();
        for pair in results.windows(2) {
            prop_assert!(pair[0] <= pair[1], "{} > {}", pair[0], pair[1]);
        }
        prop_assert!(results[0] >= values[0]);
        prop_assert!(*results.last().unwrap() <= *values.last().unwrap());
    }

    #[test]
    fn constant_series_has_constant_percentiles(
        value in arb_latency(),
        n in 1usize..200,
        rank in 0.001..99.999_f64,
    ) {
        let values = vec![value; n];
        prop_assert_eq!(percentile_of_sorted(&values, rank), Some(value));
    }
}
