//! Millisecond timestamps as they appear in stored records.
//!
//! Records travel as untyped JSON, so a timestamp may arrive as an integer,
//! a float, or a numeric string. [`parse_timestamp`] accepts all three with
//! integer-parse semantics and rejects everything else.

use serde_json::Value;

/// Milliseconds since the Unix epoch.
pub type Millis = i64;

pub const SECOND_MS: Millis = 1_000;
pub const MINUTE_MS: Millis = 60 * SECOND_MS;
pub const DAY_MS: Millis = 24 * 60 * MINUTE_MS;
/// A calendar-agnostic year of 365 days.
pub const YEAR_MS: Millis = 365 * DAY_MS;

/// Parses a record value as an integer timestamp.
///
/// - JSON integers are taken as-is.
/// - JSON floats are truncated toward zero.
/// - Strings are trimmed; a leading sign and digits are parsed and anything
///   after the integer part is ignored (`"1700000000000.9"` parses, `"abc"`
///   does not).
///
/// Returns `None` for booleans, arrays, objects, `null`, and non-finite numbers.
#[must_use]
pub fn parse_timestamp(value: &Value) -> Option<Millis> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(i)
            } else {
                n.as_f64()
                    .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                    .map(|f| f.trunc() as i64)
            }
        }
        Value::String(s) => parse_leading_integer(s.trim()),
        _ => None,
    }
}

fn parse_leading_integer(s: &str) -> Option<Millis> {
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
