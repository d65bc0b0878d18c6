//! Closed-form concentration models
//!
//! Three stateless formula families, each consumed twice (once per phase):
//!
//! | Mode | Absorption phase | Elimination phase |
//! |------|------------------|-------------------|
//! | Exponential | `dose * (1 - 0.5^(t/t12a))` | `dose * 0.5^(t'/t12)` |
//! | Linear | `(t/tmax) * dose` | `dose - dose * t' * ke` |
//! | Probability | `(t/tmax) * dose` (display only) | `floor(100 * 0.5^(t'/t12))` % |
//!
//! where `t` is seconds since the dose, `t'` is seconds since the peak and
//! `ke = ln(2) / t12`. The exponential family models first-order kinetics;
//! linear mode is the zero-order approximation; probability mode reframes
//! elimination as the percentage of the original dose statistically
//! remaining, discarding dose magnitude.
//!
//! All functions here are pure; phase bookkeeping lives in
//! [`crate::monitor::MonitorState`].

use std::f64::consts::LN_2;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MonitorError;

/// Which formula family drives the monitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// First-order absorption and elimination (the default).
    #[default]
    Exponential,
    /// Zero-order absorption and elimination via the elimination constant.
    Linear,
    /// Percentage of the dose statistically remaining after the peak.
    Probability,
}

impl Mode {
    /// Resolve the mode from the two CLI switches.
    ///
    /// `--linear` and `--probability` represent elimination differently and
    /// are mutually exclusive by construction; both set is an error before
    /// any prompt or computation.
    pub fn from_flags(linear: bool, probability: bool) -> Result<Self, MonitorError> {
        match (linear, probability) {
            (true, true) => Err(MonitorError::ConflictingModes),
            (true, false) => Ok(Mode::Linear),
            (false, true) => Ok(Mode::Probability),
            (false, false) => Ok(Mode::Exponential),
        }
    }

    /// Whether this mode consumes the absorption half-life.
    ///
    /// Only the exponential family does; the other modes never prompt for
    /// it and leave it at zero.
    pub fn uses_absorption_half_life(&self) -> bool {
        matches!(self, Mode::Exponential)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Exponential => write!(f, "exponential"),
            Mode::Linear => write!(f, "linear"),
            Mode::Probability => write!(f, "probability"),
        }
    }
}

/// Phase of the monitor relative to the concentration peak.
///
/// The transition is one-way: once eliminating, a run never absorbs again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Absorbing,
    Eliminating,
}

/// One rendered sample of the monitor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reading {
    /// Instantaneous concentration, in the dose's unit.
    Concentration(f64),
    /// Percent of the original dose statistically remaining.
    Probability(u64),
}

/// Rate constant from a half-life: `ln(2) / t12`.
///
/// Serves as ka or ke depending on which half-life is passed.
#[inline]
pub fn elimination_constant(half_life: f64) -> f64 {
    LN_2 / half_life
}

/// First-order uptake: `dose * (1 - 0.5^(t/t12a))`.
///
/// Zero at `t = 0`, asymptotically approaches `dose`.
#[inline]
pub fn exponential_absorption(dose: f64, t_since_dose: f64, absorption_half_life: f64) -> f64 {
    dose * (1.0 - 0.5_f64.powf(t_since_dose / absorption_half_life))
}

/// First-order decay from the peak: `dose * 0.5^(t'/t12)`.
#[inline]
pub fn exponential_elimination(dose: f64, t_since_peak: f64, half_life: f64) -> f64 {
    dose * 0.5_f64.powf(t_since_peak / half_life)
}

/// Zero-order uptake: a straight line from 0 at dose time to `dose` at tmax.
#[inline]
pub fn linear_absorption(dose: f64, t_since_dose: f64, tmax: f64) -> f64 {
    t_since_dose / tmax * dose
}

/// Zero-order decay: `dose - dose * t' * ke`.
///
/// Crosses zero exactly at `t' = 1/ke = t12/ln(2)` and keeps falling; the
/// caller decides whether negative values are meaningful to show.
#[inline]
pub fn linear_elimination(dose: f64, t_since_peak: f64, half_life: f64) -> f64 {
    let ke = elimination_constant(half_life);
    dose - dose * t_since_peak * ke
}

/// Percent of the original dose statistically remaining, floored to an
/// integer: `floor(100 * 0.5^(t'/t12))`. No dose term.
#[inline]
pub fn remaining_probability(t_since_peak: f64, half_life: f64) -> u64 {
    (0.5_f64.powf(t_since_peak / half_life) * 100.0).floor() as u64
}
