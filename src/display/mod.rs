//! Terminal value formatting
//!
//! Concentrations are truncated (floored), never rounded, before display:
//! a reading of 1.999 at precision 0 shows as 1, not 2. Probability-mode
//! percentages are already integers and bypass truncation entirely.

use crate::model::Reading;

/// Truncate `value` to `precision` decimal digits by flooring after
/// scaling. Precision 0 truncates to an integer.
pub fn truncate(value: f64, precision: u8) -> f64 {
    let scale = 10f64.powi(i32::from(precision));
    (value * scale).floor() / scale
}

/// Render a reading as the status line shown in place on the terminal.
///
/// `precision` applies to concentration readings only.
pub fn format_reading(reading: &Reading, precision: u8) -> String {
    match reading {
        Reading::Concentration(value) => format!(
            "Concentration: {:.*}",
            usize::from(precision),
            truncate(*value, precision)
        ),
        Reading::Probability(percent) => {
            format!("Probability of chemical remaining: {percent}%")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn truncates_not_rounds() {
        assert_relative_eq!(truncate(1.23456789, 2), 1.23);
        assert_relative_eq!(truncate(1.999, 0), 1.0);
        assert_relative_eq!(truncate(1.999, 2), 1.99);
        assert_relative_eq!(truncate(0.123456789, 6), 0.123456);
    }

    #[test]
    fn truncation_never_exceeds_input() {
        for p in 0..=6u8 {
            for x in [0.0, 0.1, 1.23456789, 99.999999, 1234.5] {
                assert!(truncate(x, p) <= x, "truncate({x}, {p}) > {x}");
            }
        }
    }

    #[test]
    fn precision_zero_is_integer() {
        assert_relative_eq!(truncate(7.99, 0), 7.0);
        assert_relative_eq!(truncate(7.01, 0), 7.0);
    }

    #[test]
    fn formats_concentration_with_fixed_decimals() {
        let reading = Reading::Concentration(1.23456789);
        assert_eq!(format_reading(&reading, 0), "Concentration: 1");
        assert_eq!(format_reading(&reading, 2), "Concentration: 1.23");
        assert_eq!(format_reading(&reading, 4), "Concentration: 1.2345");
    }

    #[test]
    fn formats_probability_as_integer_percent() {
        let reading = Reading::Probability(50);
        assert_eq!(
            format_reading(&reading, 4),
            "Probability of chemical remaining: 50%"
        );
    }
}
