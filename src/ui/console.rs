//! Console diagnostics
//!
//! Warnings and fatal errors go to stderr, the report itself to stdout.

use crate::core::comparator::ComparisonResult;
use crate::error::ReportError;
use crate::stats::{LatencySeries, MalformedSample};
use crate::utils::helpers::{format_ns, format_rank};
use colored::*;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::path::Path;

const SEPARATOR_WIDTH: usize = 60;

/// Non-fatal warning for a line that was skipped
pub fn warn_malformed(series: &str, sample: &MalformedSample) {
    eprintln!(
        "{} {} line {}: {} ('{}')",
        "⚠ Warning:".bold().yellow(),
        series,
        sample.line_number,
        sample.reason,
        sample.content
    );
}

/// One warning per skipped line of `series`
pub fn warn_malformed_lines(series: &LatencySeries) {
    for sample in &series.malformed {
        warn_malformed(&series.name, sample);
    }
}

pub fn print_fatal(error: &ReportError) {
    eprintln!("{} {}", "❌ Error:".bold().red(), error.to_string().red());
}

pub fn print_title(title: &str) {
    let separator = "=".repeat(SEPARATOR_WIDTH);
    println!("\n{}", separator);
    println!("{:^60}", title.bold().cyan());
    println!("{}\n", separator);
}

fn section(name: &str) {
    println!("{}", name.bold().yellow());
    println!("{}", "━".repeat(name.chars().count()));
}

/// Per-series counters: parsed, malformed, discarded, retained
pub fn series_table(result: &ComparisonResult) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Series", "Source", "Parsed", "Malformed", "Discarded", "Retained"]);
    for outcome in result.both() {
        table.add_row(vec![
            Cell::new(&outcome.source.name),
            Cell::new(outcome.source.path.display()),
            Cell::new(outcome.raw_count).set_alignment(CellAlignment::Right),
            Cell::new(outcome.malformed_count).set_alignment(CellAlignment::Right),
            Cell::new(outcome.filtered.discarded_count).set_alignment(CellAlignment::Right),
            Cell::new(outcome.filtered.len()).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// One row per rank, one column per series
pub fn percentile_table(result: &ComparisonResult) -> Table {
    let [a, b] = result.both();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "Percentile".to_string(),
            a.source.name.clone(),
            b.source.name.clone(),
        ]);
    for (pa, pb) in a.percentiles.values.iter().zip(&b.percentiles.values) {
        table.add_row(vec![
            Cell::new(format!("P{}", format_rank(pa.rank))),
            Cell::new(format_ns(pa.value)).set_alignment(CellAlignment::Right),
            Cell::new(format_ns(pb.value)).set_alignment(CellAlignment::Right),
        ]);
    }
    table
}

/// Print counters and percentiles of a finished comparison
pub fn print_report(result: &ComparisonResult) {
    section("Samples");
    match result.counting_range {
        Some(range) => println!(
            "▸ Counting range: [{}, {}] (applied to both series)",
            range.lower, range.upper
        ),
        None => println!("▸ Counting range: none"),
    }
    println!("{}\n", series_table(result));

    section("Percentiles");
    let [a, b] = result.both();
    for (pa, pb) in a.percentiles.values.iter().zip(&b.percentiles.values) {
        println!(
            "P{} Latency - {}: {:.2} ns, {}: {:.2} ns",
            format_rank(pa.rank),
            a.source.name,
            pa.value,
            b.source.name,
            pb.value
        );
    }
    println!("{}\n", percentile_table(result));
}

pub fn print_written(what: &str, path: &Path) {
    println!("{} {} written to {}", "✓".bold().green(), what, path.display());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComparisonConfig;
    use crate::core::comparator::DistributionComparator;
    use crate::stats::LatencySeries;

    fn result() -> ComparisonResult {
        let config = ComparisonConfig::default();
        DistributionComparator::new(&config)
            .compare(
                LatencySeries::new("Epoll", (1..=10).map(f64::from).collect()),
                LatencySeries::new("io_uring", vec![100.0, 200.0]),
            )
            .unwrap()
    }

    #[test]
    fn percentile_table_has_row_per_rank() {
        let rendered = percentile_table(&result()).to_string();
        assert!(rendered.contains("Epoll"));
        assert!(rendered.contains("io_uring"));
        assert!(rendered.contains("P99.9"));
        assert!(rendered.contains("9.10 ns"));
    }

    #[test]
    fn series_table_shows_counters() {
        let rendered = series_table(&result()).to_string();
        assert!(rendered.contains("Retained"));
        assert!(rendered.contains("10"));
    }
}
