//! Resolved runtime configuration
//!
//! [`Settings`] is assembled exactly once at startup, from CLI flags plus
//! interactive prompts for anything missing, and is immutable from the
//! monitor loop's point of view. Time-valued parameters are normalized to
//! seconds on construction.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;
use crate::model::Mode;
use crate::units::TimeUnit;

/// Default poll period of the monitor loop.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Largest supported display precision, in decimal digits.
pub const MAX_PRECISION: u8 = 6;

/// Complete monitor configuration.
///
/// Time-valued fields (`tmax`, the half-lives) are stored in seconds; the
/// unit they were entered in is kept for display purposes only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Selected concentration model.
    pub mode: Mode,
    /// Amount administered at time zero (unit-agnostic).
    pub dose: f64,
    /// Time of peak concentration, in seconds.
    pub tmax: f64,
    /// Absorption half-life, in seconds. Consumed only by the exponential
    /// model; zero otherwise.
    pub absorption_half_life: f64,
    /// Elimination half-life, in seconds.
    pub half_life: f64,
    /// Decimal places kept (floored) when rendering concentrations.
    pub precision: u8,
    /// Unit the time-valued inputs were entered in.
    pub unit: TimeUnit,
    /// Poll period of the monitor loop.
    pub poll_interval: Duration,
}

impl Settings {
    /// Assemble settings from parameters given in `unit`, normalizing the
    /// time-valued ones to seconds.
    ///
    /// Precision and poll interval start at their defaults; set them with
    /// [`Settings::with_precision`] and [`Settings::with_poll_interval`].
    /// Call [`Settings::validate`] before handing the result to the loop.
    pub fn new(
        mode: Mode,
        dose: f64,
        tmax: f64,
        absorption_half_life: f64,
        half_life: f64,
        unit: TimeUnit,
    ) -> Self {
        Settings {
            mode,
            dose,
            tmax: unit.to_seconds(tmax),
            absorption_half_life: unit.to_seconds(absorption_half_life),
            half_life: unit.to_seconds(half_life),
            precision: 0,
            unit,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Set the display precision (0 to 6 decimals).
    pub fn with_precision(mut self, precision: u8) -> Self {
        self.precision = precision;
        self
    }

    /// Set the poll period of the monitor loop.
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Check every parameter once, before the loop starts.
    ///
    /// The loop body is pure arithmetic; anything this accepts cannot fail
    /// later. The absorption half-life is only required (and only checked)
    /// in the mode that consumes it.
    pub fn validate(&self) -> Result<(), MonitorError> {
        check_positive("dose", self.dose)?;
        check_positive("tmax", self.tmax)?;
        check_positive("half-life", self.half_life)?;
        if self.mode.uses_absorption_half_life() {
            check_positive("absorption half-life", self.absorption_half_life)?;
        }
        if self.precision > MAX_PRECISION {
            return Err(MonitorError::InvalidPrecision(self.precision));
        }
        if self.poll_interval.is_zero() {
            return Err(MonitorError::InvalidInterval(0.0));
        }
        Ok(())
    }
}

fn check_positive(param: &'static str, value: f64) -> Result<(), MonitorError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MonitorError::NonPositive { param, value })
    }
}

/// Parse a poll period from a number of seconds, rejecting non-positive
/// and non-finite values before the `Duration` conversion can panic.
pub fn poll_interval_from_secs(secs: f64) -> Result<Duration, MonitorError> {
    if secs.is_finite() && secs > 0.0 {
        Ok(Duration::from_secs_f64(secs))
    } else {
        Err(MonitorError::InvalidInterval(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn base() -> Settings {
        Settings::new(Mode::Exponential, 100.0, 1.0, 0.5, 6.0, TimeUnit::Hours)
    }

    #[test]
    fn times_are_normalized_to_seconds() {
        let settings = base();
        assert_relative_eq!(settings.tmax, 3600.0);
        assert_relative_eq!(settings.absorption_half_life, 1800.0);
        assert_relative_eq!(settings.half_life, 21600.0);
        assert_relative_eq!(settings.dose, 100.0); // dose is unit-agnostic
    }

    #[test]
    fn valid_settings_pass() {
        assert!(base().validate().is_ok());
        assert!(base().with_precision(6).validate().is_ok());
    }

    #[test]
    fn rejects_non_positive_parameters() {
        let zero_dose = Settings::new(Mode::Exponential, 0.0, 1.0, 0.5, 6.0, TimeUnit::Hours);
        assert!(matches!(
            zero_dose.validate(),
            Err(MonitorError::NonPositive { param: "dose", .. })
        ));

        let negative_tmax =
            Settings::new(Mode::Exponential, 100.0, -1.0, 0.5, 6.0, TimeUnit::Hours);
        assert!(negative_tmax.validate().is_err());

        let nan_half_life =
            Settings::new(Mode::Exponential, 100.0, 1.0, 0.5, f64::NAN, TimeUnit::Hours);
        assert!(nan_half_life.validate().is_err());
    }

    #[test]
    fn absorption_half_life_only_required_by_exponential() {
        let linear = Settings::new(Mode::Linear, 100.0, 1.0, 0.0, 6.0, TimeUnit::Hours);
        assert!(linear.validate().is_ok());

        let probability = Settings::new(Mode::Probability, 100.0, 1.0, 0.0, 6.0, TimeUnit::Hours);
        assert!(probability.validate().is_ok());

        let exponential =
            Settings::new(Mode::Exponential, 100.0, 1.0, 0.0, 6.0, TimeUnit::Hours);
        assert!(exponential.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_precision() {
        assert!(matches!(
            base().with_precision(7).validate(),
            Err(MonitorError::InvalidPrecision(7))
        ));
    }

    #[test]
    fn poll_interval_must_be_positive_and_finite() {
        assert!(poll_interval_from_secs(0.25).is_ok());
        assert!(poll_interval_from_secs(0.0).is_err());
        assert!(poll_interval_from_secs(-1.0).is_err());
        assert!(poll_interval_from_secs(f64::NAN).is_err());
        assert!(poll_interval_from_secs(f64::INFINITY).is_err());
    }
}
