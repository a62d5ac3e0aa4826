//! Closed numeric intervals used for counting and display windows

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Inclusive interval `[lower, upper]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    #[serde(rename = "Lower")]
    pub lower: f64,
    #[serde(rename = "Upper")]
    pub upper: f64,
}

/// Interval deciding which samples enter the statistics.
pub type CountingRange = Bounds;

/// Interval affecting only the rendered window.
pub type DisplayRange = Bounds;

impl Bounds {
    pub fn new(lower: f64, upper: f64) -> Result<Self, String> {
        let bounds = Self { lower, upper };
        bounds.check()?;
        Ok(bounds)
    }

    /// Both ends finite and ordered
    pub fn check(&self) -> Result<(), String> {
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(format!(
                "range bounds must be finite, got [{}, {}]",
                self.lower, self.upper
            ));
        }
        if self.lower > self.upper {
            return Err(format!(
                "range lower bound {} exceeds upper bound {}",
                self.lower, self.upper
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }
}

impl FromStr for Bounds {
    type Err = String;

    /// Accepts `LO:HI` or `LO,HI`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lo, hi) = s
            .split_once(':')
            .or_else(|| s.split_once(','))
            .ok_or_else(|| format!("expected LO:HI, got '{}'", s))?;
        let lower = lo
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid lower bound '{}': {}", lo.trim(), e))?;
        let upper = hi
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid upper bound '{}': {}", hi.trim(), e))?;
        Bounds::new(lower, upper)
    }
}
