//! Monitor loop: phase state machine and terminal render loop
//!
//! [`MonitorState`] is the pure core: fed an elapsed time per tick, it
//! applies the one-way absorption→elimination transition and dispatches
//! the phase/mode formula into a [`Reading`]. [`run`] drives it against
//! wall-clock time, re-reading elapsed time each tick (self-correcting
//! against scheduling jitter, no drift accumulation), rendering each
//! reading in place on a single terminal line, and checking cancellation
//! every tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

use crate::display::format_reading;
use crate::error::MonitorError;
use crate::model::{
    exponential_absorption, exponential_elimination, linear_absorption, linear_elimination,
    remaining_probability, Mode, Phase, Reading,
};
use crate::settings::Settings;

/// Phase bookkeeping plus formula dispatch for one run.
///
/// The transition guard fires when elapsed time since the dose reaches
/// tmax; the elapsed value at that tick is snapshotted once and becomes
/// the zero-point for elimination-phase arithmetic. The transition is
/// irreversible: later ticks never revert to absorption, even if handed
/// a smaller elapsed time.
#[derive(Debug, Clone)]
pub struct MonitorState {
    mode: Mode,
    dose: f64,
    tmax: f64,
    absorption_half_life: f64,
    half_life: f64,
    phase: Phase,
    elimination_origin: Duration,
}

impl MonitorState {
    pub fn new(settings: &Settings) -> Self {
        MonitorState {
            mode: settings.mode,
            dose: settings.dose,
            tmax: settings.tmax,
            absorption_half_life: settings.absorption_half_life,
            half_life: settings.half_life,
            phase: Phase::Absorbing,
            elimination_origin: Duration::ZERO,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance to `elapsed` (time since the dose) and produce the reading
    /// for this tick.
    ///
    /// On the transition tick the elimination formula runs with a
    /// time-since-peak of zero, so the rendered value is the peak itself.
    pub fn tick(&mut self, elapsed: Duration) -> Reading {
        let t_since_dose = elapsed.as_secs_f64();

        if self.phase == Phase::Absorbing && t_since_dose >= self.tmax {
            self.phase = Phase::Eliminating;
            self.elimination_origin = elapsed;
            debug!(
                elapsed_s = t_since_dose,
                "peak reached, switching to elimination"
            );
        }

        match self.phase {
            Phase::Absorbing => Reading::Concentration(match self.mode {
                Mode::Exponential => {
                    exponential_absorption(self.dose, t_since_dose, self.absorption_half_life)
                }
                Mode::Linear | Mode::Probability => {
                    linear_absorption(self.dose, t_since_dose, self.tmax)
                }
            }),
            Phase::Eliminating => {
                let t_since_peak = elapsed
                    .saturating_sub(self.elimination_origin)
                    .as_secs_f64();
                match self.mode {
                    Mode::Exponential => Reading::Concentration(exponential_elimination(
                        self.dose,
                        t_since_peak,
                        self.half_life,
                    )),
                    Mode::Linear => Reading::Concentration(linear_elimination(
                        self.dose,
                        t_since_peak,
                        self.half_life,
                    )),
                    Mode::Probability => {
                        Reading::Probability(remaining_probability(t_since_peak, self.half_life))
                    }
                }
            }
        }
    }
}

/// Drive the state machine against wall-clock time until `running` is
/// cleared.
///
/// Sleeps a fixed period per tick and re-reads monotonic elapsed time, so
/// the loop never accumulates its own scheduling error. The status line is
/// overwritten in place; on cancellation it is left intact rather than
/// cleared, and the function returns cleanly.
pub async fn run(settings: &Settings, running: Arc<AtomicBool>) -> Result<(), MonitorError> {
    let mut state = MonitorState::new(settings);

    let line = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
    line.set_style(ProgressStyle::with_template("{msg}")?);

    let start = Instant::now();
    while running.load(Ordering::Relaxed) {
        tokio::time::sleep(settings.poll_interval).await;
        let reading = state.tick(start.elapsed());
        line.set_message(format_reading(&reading, settings.precision));
    }

    // Keep the last value on screen instead of erasing the line.
    line.abandon();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::TimeUnit;
    use approx::assert_relative_eq;

    fn seconds(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn exponential_settings() -> Settings {
        // dose 100, tmax 60s, t12a 30s, t12 120s
        Settings::new(Mode::Exponential, 100.0, 60.0, 30.0, 120.0, TimeUnit::Seconds)
    }

    fn concentration(reading: Reading) -> f64 {
        match reading {
            Reading::Concentration(c) => c,
            Reading::Probability(p) => panic!("expected concentration, got {p}%"),
        }
    }

    #[test]
    fn starts_absorbing() {
        let state = MonitorState::new(&exponential_settings());
        assert_eq!(state.phase(), Phase::Absorbing);
    }

    #[test]
    fn transition_fires_at_tmax_and_is_irreversible() {
        let mut state = MonitorState::new(&exponential_settings());

        state.tick(seconds(59.9));
        assert_eq!(state.phase(), Phase::Absorbing);

        state.tick(seconds(60.0));
        assert_eq!(state.phase(), Phase::Eliminating);

        // Even a tick with a smaller elapsed time never reverts.
        state.tick(seconds(10.0));
        assert_eq!(state.phase(), Phase::Eliminating);
        state.tick(seconds(240.0));
        assert_eq!(state.phase(), Phase::Eliminating);
    }

    #[test]
    fn transition_tick_reads_the_peak() {
        let mut state = MonitorState::new(&exponential_settings());
        let reading = state.tick(seconds(60.0));
        // Elimination formula with zero time since peak: the dose itself.
        assert_relative_eq!(concentration(reading), 100.0);
    }

    #[test]
    fn elimination_origin_is_snapshotted_once() {
        let mut state = MonitorState::new(&exponential_settings());
        // Transition fires late (e.g. a delayed tick at 70s, not 60s).
        state.tick(seconds(70.0));
        // One half-life after the snapshot, not after nominal tmax.
        let reading = state.tick(seconds(70.0 + 120.0));
        assert_relative_eq!(concentration(reading), 50.0);
    }

    #[test]
    fn exponential_run_through_both_phases() {
        let mut state = MonitorState::new(&exponential_settings());

        assert_relative_eq!(concentration(state.tick(seconds(0.0))), 0.0);
        // One absorption half-life: half the dose absorbed.
        assert_relative_eq!(concentration(state.tick(seconds(30.0))), 50.0);
        // Peak.
        assert_relative_eq!(concentration(state.tick(seconds(60.0))), 100.0);
        // One elimination half-life past the peak.
        assert_relative_eq!(concentration(state.tick(seconds(180.0))), 50.0);
    }

    #[test]
    fn linear_mode_ramps_then_declines() {
        let settings =
            Settings::new(Mode::Linear, 100.0, 60.0, 0.0, 120.0, TimeUnit::Seconds);
        let mut state = MonitorState::new(&settings);

        assert_relative_eq!(concentration(state.tick(seconds(30.0))), 50.0);
        assert_relative_eq!(concentration(state.tick(seconds(60.0))), 100.0);

        // Linear elimination hits zero at t12/ln(2) past the peak.
        let t_zero = 120.0 / std::f64::consts::LN_2;
        let reading = state.tick(seconds(60.0 + t_zero));
        assert_relative_eq!(concentration(reading), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn probability_mode_switches_label_after_peak() {
        let settings =
            Settings::new(Mode::Probability, 100.0, 60.0, 0.0, 120.0, TimeUnit::Seconds);
        let mut state = MonitorState::new(&settings);

        // Absorption still displays a linear concentration ramp.
        assert_relative_eq!(concentration(state.tick(seconds(30.0))), 50.0);

        // Past the peak: floored percentage, no dose term.
        assert_eq!(state.tick(seconds(60.0)), Reading::Probability(100));
        assert_eq!(state.tick(seconds(180.0)), Reading::Probability(50));
        assert_eq!(state.tick(seconds(300.0)), Reading::Probability(25));
    }
}
