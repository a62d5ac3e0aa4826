//! Helpers shared by console output, chart labels and exports

use std::path::{Path, PathBuf};

/// Percentile rank without a trailing `.0` (`90`, `99.9`)
pub fn format_rank(rank: f64) -> String {
    if rank.fract() == 0.0 {
        format!("{:.0}", rank)
    } else {
        format!("{}", rank)
    }
}

/// Latency value with two decimals and unit
pub fn format_ns(value: f64) -> String {
    format!("{:.2} ns", value)
}

/// Scratch path next to `output`, keeping its extension so writers that pick
/// a format from it behave the same
pub fn scratch_path(output: &Path) -> PathBuf {
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "artifact".to_string());
    let name = match output.extension() {
        Some(ext) => format!(".{}.partial.{}", stem, ext.to_string_lossy()),
        None => format!(".{}.partial", stem),
    };
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scratch_path_keeps_extension() {
        assert_eq!(
            scratch_path(Path::new("out/latency.png")),
            PathBuf::from("out/.latency.partial.png")
        );
        assert_eq!(scratch_path(Path::new("chart")), PathBuf::from(".chart.partial"));
    }

    #[test]
    fn ranks_drop_integral_fraction() {
        assert_eq!(format_rank(90.0), "90");
        assert_eq!(format_rank(99.9), "99.9");
        assert_eq!(format_rank(99.99), "99.99");
    }

    #[test]
    fn nanoseconds_have_two_decimals() {
        assert_eq!(format_ns(9.1), "9.10 ns");
        assert_eq!(format_ns(1234.567), "1234.57 ns");
    }
}
