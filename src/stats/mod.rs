pub mod latency_series;
pub mod percentiles;
pub mod range_filter;
pub mod sample_reader;

pub use latency_series::{LatencySeries, MalformedReason, MalformedSample};
pub use percentiles::{percentile_of_sorted, PercentileReport, PercentileValue};
pub use range_filter::{filter_values, FilteredSeries};
pub use sample_reader::{read_series, read_series_file};
