//! Interactive prompts for missing parameters
//!
//! Any model parameter not supplied on the command line is asked for on
//! the terminal before the loop starts. Invalid entries re-prompt with a
//! short message; after a few failed attempts the prompt gives up with an
//! error instead of looping forever. The reader/writer seam keeps the
//! parsing logic testable without a real terminal.

use std::io::{self, BufRead, Write};

use crate::error::MonitorError;

/// Failed attempts tolerated before a prompt gives up.
const MAX_ATTEMPTS: usize = 3;

/// Use the flag value if present, otherwise prompt for it on the terminal.
pub fn resolve(value: Option<f64>, label: &str) -> Result<f64, MonitorError> {
    match value {
        Some(v) => Ok(v),
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            read_value(&mut stdin.lock(), &mut stdout.lock(), label)
        }
    }
}

/// Prompt `label` on `output` and read a positive, finite number from
/// `input`, re-prompting up to [`MAX_ATTEMPTS`] times.
///
/// EOF on `input` (closed stdin) fails immediately.
pub fn read_value<R, W>(input: &mut R, output: &mut W, label: &str) -> Result<f64, MonitorError>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    for _ in 0..MAX_ATTEMPTS {
        write!(output, "{label}: ")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        match line.trim().parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => return Ok(value),
            _ => writeln!(output, "expected a positive number")?,
        }
    }
    Err(MonitorError::InvalidInput {
        field: label.to_string(),
    })
}
