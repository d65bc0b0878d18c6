//! # pkwatch
//!
//! Live terminal monitor for single-dose pharmacokinetic concentration
//! estimates.
//!
//! Given a dose, a time of peak concentration (tmax) and one or two
//! half-lives, the monitor polls elapsed time at a fixed interval and
//! prints a continuously updated estimate of the concentration remaining
//! in the body, switching from the absorption formula to the elimination
//! formula once tmax has passed.
//!
//! Three formula families are supported, selected by mutually exclusive
//! flags: first-order exponential kinetics (the default), a zero-order
//! linear approximation, and a probability mode that reports the percent
//! of the dose statistically remaining.
//!
//! The crate splits into a pure core and thin glue:
//! - [`model`]: the closed-form formulas plus [`Mode`](model::Mode) and
//!   [`Phase`](model::Phase)
//! - [`monitor`]: the phase state machine and the render loop
//! - [`units`], [`display`], [`settings`], [`input`]: normalization,
//!   formatting, configuration, and interactive prompts
//! - [`error`]: the crate-wide error taxonomy

pub mod display;
pub mod error;
pub mod input;
pub mod model;
pub mod monitor;
pub mod settings;
pub mod units;

pub use error::MonitorError;
pub use model::{Mode, Phase, Reading};
pub use monitor::MonitorState;
pub use settings::Settings;
pub use units::TimeUnit;

pub mod prelude {
    pub use crate::display::{format_reading, truncate};
    pub use crate::error::MonitorError;
    pub use crate::model::{
        elimination_constant, exponential_absorption, exponential_elimination, linear_absorption,
        linear_elimination, remaining_probability, Mode, Phase, Reading,
    };
    pub use crate::monitor::MonitorState;
    pub use crate::settings::{Settings, DEFAULT_POLL_INTERVAL};
    pub use crate::units::TimeUnit;
}
