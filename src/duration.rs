//! Duration text in the compact `1h30m`, `250ms`, `1.5s` notation.
//!
//! [`parse`] accepts a sequence of decimal numbers, each with an optional
//! fraction and a mandatory unit suffix. [`format`] renders the canonical
//! form that [`parse`] reads back.

use std::fmt::Write;
use std::time::Duration;

use thiserror::Error;

const NANOS_PER_SECOND: u128 = 1_000_000_000;

/// Error returned when duration text cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    /// The text does not follow the `<number><unit>...` grammar.
    #[error("invalid duration {0:?}")]
    Invalid(String),

    /// A number was not followed by a unit.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// The unit suffix is not one of `ns us µs μs ms s m h`.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit {
        /// The unrecognized suffix
        unit: String,
        /// The full input text
        input: String,
    },

    /// The total exceeds the representable range.
    #[error("duration {0:?} out of range")]
    Overflow(String),

    /// A leading `-` with a non-zero magnitude.
    #[error("negative duration {0:?} is not allowed")]
    Negative(String),
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(NANOS_PER_SECOND),
        "m" => Some(60 * NANOS_PER_SECOND),
        "h" => Some(3_600 * NANOS_PER_SECOND),
        _ => None,
    }
}

/// Splits the leading run of ASCII digits off `s`.
fn leading_digits(s: &str) -> (&str, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    s.split_at(end)
}

/// Parses duration text such as `300ms`, `1.5h` or `2h45m`.
///
/// A bare `0` (optionally signed) is zero. Negative values are rejected.
///
/// # Errors
///
/// Returns [`DurationError`] when the text is malformed, uses an unknown
/// unit, overflows `u64` nanoseconds or is negative.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use flagstack::duration;
///
/// assert_eq!(duration::parse("1m30s").unwrap(), Duration::from_secs(90));
/// assert_eq!(duration::parse("1.5ms").unwrap(), Duration::from_micros(1500));
/// ```
pub fn parse(input: &str) -> Result<Duration, DurationError> {
    let invalid = || DurationError::Invalid(input.to_string());

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let limit = u128::from(u64::MAX);
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let (int_part, after_int) = leading_digits(rest);
        rest = after_int;

        let mut frac_part = "";
        if let Some(after_dot) = rest.strip_prefix('.') {
            let (digits, after_frac) = leading_digits(after_dot);
            frac_part = digits;
            rest = after_frac;
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(invalid());
        }

        let unit_end = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_end == 0 {
            return Err(DurationError::MissingUnit(input.to_string()));
        }
        let (unit, after_unit) = rest.split_at(unit_end);
        rest = after_unit;

        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let whole = if int_part.is_empty() {
            0
        } else {
            int_part
                .parse::<u128>()
                .map_err(|_| DurationError::Overflow(input.to_string()))?
        };
        let mut value = whole
            .checked_mul(scale)
            .filter(|v| *v <= limit)
            .ok_or_else(|| DurationError::Overflow(input.to_string()))?;
        value += fraction_nanos(frac_part, scale);

        total += value;
        if total > limit {
            return Err(DurationError::Overflow(input.to_string()));
        }
    }

    if negative && total != 0 {
        return Err(DurationError::Negative(input.to_string()));
    }

    let secs = u64::try_from(total / NANOS_PER_SECOND)
        .map_err(|_| DurationError::Overflow(input.to_string()))?;
    // Always below one billion.
    #[allow(clippy::cast_possible_truncation)]
    let nanos = (total % NANOS_PER_SECOND) as u32;
    Ok(Duration::new(secs, nanos))
}

/// Nanoseconds contributed by the fractional digits of one component.
///
/// Digits beyond nanosecond resolution are truncated.
fn fraction_nanos(digits: &str, scale: u128) -> u128 {
    let mut numerator: u128 = 0;
    let mut denominator: u128 = 1;
    for digit in digits.bytes().take(18) {
        numerator = numerator * 10 + u128::from(digit - b'0');
        denominator *= 10;
    }
    numerator * scale / denominator
}

/// Renders a duration in the canonical `72h3m0.5s` form.
///
/// Durations under one second use the largest of `ns`, `µs` or `ms` that
/// keeps the integer part non-zero. Zero renders as `0s`.
#[must_use]
pub fn format(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < NANOS_PER_SECOND {
        let (unit, precision) = if nanos < 1_000 {
            ("ns", 0)
        } else if nanos < 1_000_000 {
            ("µs", 3)
        } else {
            ("ms", 6)
        };
        let (whole, fraction) = split_fraction(nanos, precision);
        return format!("{whole}{fraction}{unit}");
    }

    let (secs, fraction) = split_fraction(nanos, 9);
    let hours = secs / 3_600;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;

    let mut out = String::new();
    if hours > 0 {
        let _ = write!(out, "{hours}h");
    }
    if hours > 0 || minutes > 0 {
        let _ = write!(out, "{minutes}m");
    }
    let _ = write!(out, "{seconds}{fraction}s");
    out
}

/// Splits `value` at `precision` decimal places.
///
/// The fraction is returned with its leading dot and without trailing
/// zeros, or empty when it is zero.
fn split_fraction(value: u128, precision: u32) -> (u128, String) {
    let divisor = 10u128.pow(precision);
    let whole = value / divisor;
    let remainder = value % divisor;
    if remainder == 0 {
        return (whole, String::new());
    }

    let digits = format!("{remainder:0width$}", width = precision as usize);
    (whole, format!(".{}", digits.trim_end_matches('0')))
}
