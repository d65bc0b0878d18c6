use thiserror::Error;

/// Errors surfaced during startup validation and input resolution.
///
/// Every failure mode in this crate occurs before the first tick of the
/// monitor loop; the loop body itself is pure arithmetic.
#[derive(Error, Debug)]
pub enum MonitorError {
    /// Both `--probability` and `--linear` were requested
    #[error("probability and linear modes cannot be active simultaneously")]
    ConflictingModes,

    /// Unit token outside hours/minutes/seconds
    #[error("invalid time unit '{0}', expected (h)ours, (m)inutes or (s)econds")]
    InvalidUnit(String),

    /// Interactive input that could not be parsed as a positive number
    #[error("no valid value given for {field}")]
    InvalidInput { field: String },

    /// Model parameter outside its valid domain
    #[error("{param} must be a positive, finite number (got {value})")]
    NonPositive { param: &'static str, value: f64 },

    /// Display precision outside the supported range
    #[error("precision must be between 0 and 6 decimals (got {0})")]
    InvalidPrecision(u8),

    /// Poll period outside its valid domain
    #[error("poll interval must be a positive, finite number of seconds (got {0})")]
    InvalidInterval(f64),

    /// Terminal renderer rejected the status line template
    #[error("terminal template error: {0}")]
    Template(#[from] indicatif::style::TemplateError),

    /// Prompt I/O failed (e.g. stdin closed)
    #[error("failed to read interactive input: {0}")]
    Io(#[from] std::io::Error),
}
