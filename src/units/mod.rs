//! Time unit normalization
//!
//! All time-valued inputs (tmax and the half-lives) are normalized to
//! seconds once at startup, so the monitor loop can work directly against
//! elapsed seconds without carrying the unit around.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Unit in which every time-valued parameter is given.
///
/// Parsed from the `--unit` flag; defaults to hours when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TimeUnit {
    #[default]
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    /// Number of seconds in one of this unit.
    pub fn factor(&self) -> f64 {
        match self {
            TimeUnit::Hours => 3600.0,
            TimeUnit::Minutes => 60.0,
            TimeUnit::Seconds => 1.0,
        }
    }

    /// Convert a magnitude in this unit to seconds.
    pub fn to_seconds(&self, magnitude: f64) -> f64 {
        magnitude * self.factor()
    }
}

impl FromStr for TimeUnit {
    type Err = MonitorError;

    /// Accepts the full word or its first letter, case-insensitive.
    ///
    /// Any other token is rejected with [`MonitorError::InvalidUnit`]
    /// rather than silently falling through to a wrong unit.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "m" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "s" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            other => Err(MonitorError::InvalidUnit(other.to_string())),
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeUnit::Hours => write!(f, "hours"),
            TimeUnit::Minutes => write!(f, "minutes"),
            TimeUnit::Seconds => write!(f, "seconds"),
        }
    }
}
