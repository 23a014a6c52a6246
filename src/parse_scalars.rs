//! Conversions from raw scalar text to native values.
//!
//! Every function here is total: it returns `None` instead of failing, which
//! is what the typed accessors on [`Node`](crate::Node) hand back to callers.
//! Each conversion first checks the content against the same pattern the
//! resolver uses, so on plain text `as_i64` agrees with `resolved_tag() == Int`.

use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use regex::Regex;

use crate::resolver::{BOOL, FLOAT, INT, NULL, TIMESTAMP};

/// Parse a YAML 1.1 boolean.
///
/// Accepted TRUE literals: `true`, `yes`, `on` (lower, Capitalized, UPPER).
/// Accepted FALSE literals: `false`, `no`, `off` (lower, Capitalized, UPPER).
pub(crate) fn parse_yaml11_bool(s: &str) -> Option<bool> {
    if !BOOL.is_match(s) {
        return None;
    }
    match s.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" => Some(true),
        _ => Some(false),
    }
}

/// True when the scalar is one of the null spellings (including empty).
pub(crate) fn scalar_is_null(s: &str) -> bool {
    NULL.is_match(s)
}

fn parse_digits_u128(digits: &str, radix: u32) -> Option<u128> {
    let mut val: u128 = 0;
    let mut saw = false;
    for b in digits.bytes() {
        if b == b'_' {
            continue;
        }
        let d = (b as char).to_digit(radix)?;
        val = val.checked_mul(radix as u128)?;
        val = val.checked_add(d as u128)?;
        saw = true;
    }
    if saw { Some(val) } else { None }
}

/// Base-60 integer such as `190:20:30` (most significant group first).
fn parse_sexagesimal_u128(digits: &str) -> Option<u128> {
    let mut val: u128 = 0;
    for group in digits.split(':') {
        let part = parse_digits_u128(group, 10)?;
        val = val.checked_mul(60)?;
        val = val.checked_add(part)?;
    }
    Some(val)
}

fn split_sign(t: &str) -> (bool, &str) {
    match t.strip_prefix('+') {
        Some(r) => (false, r),
        None => match t.strip_prefix('-') {
            Some(r) => (true, r),
            None => (false, t),
        },
    }
}

/// Parse a YAML 1.1 integer into `i128`.
///
/// Forms: decimal, `0b` binary, `0o` or leading-zero octal, `0x` hex, and
/// sexagesimal `1:20:30`. Underscores are separators. Callers narrow the
/// result with `TryFrom`.
pub(crate) fn parse_int(s: &str) -> Option<i128> {
    if !INT.is_match(s) {
        return None;
    }
    let (neg, rest) = split_sign(s);

    let mag = if rest.contains(':') {
        parse_sexagesimal_u128(rest)?
    } else if let Some(r) = rest.strip_prefix("0x") {
        parse_digits_u128(r, 16)?
    } else if let Some(r) = rest.strip_prefix("0b") {
        parse_digits_u128(r, 2)?
    } else if let Some(r) = rest.strip_prefix("0o") {
        parse_digits_u128(r, 8)?
    } else if rest.len() > 1 && rest.starts_with('0') {
        parse_digits_u128(&rest[1..], 8)?
    } else {
        parse_digits_u128(rest, 10)?
    };

    if neg {
        // Magnitude of i128::MIN does not fit into i128.
        if mag == i128::MIN.unsigned_abs() {
            return Some(i128::MIN);
        }
        let mag_i128: i128 = mag.try_into().ok()?;
        mag_i128.checked_neg()
    } else {
        mag.try_into().ok()
    }
}

/// Parse a YAML 1.1 float.
///
/// Integer forms are accepted too (`"1"` reads as `1.0`, `"0x10"` as `16.0`),
/// as are sexagesimal floats (`190:20:30.15`) and `.inf` / `-.inf` / `.nan`.
pub(crate) fn parse_float(s: &str) -> Option<f64> {
    if let Some(i) = parse_int(s) {
        return Some(i as f64);
    }
    if !FLOAT.is_match(s) {
        return None;
    }
    let lower = s.to_ascii_lowercase();
    match lower.as_str() {
        ".nan" => return Some(f64::NAN),
        ".inf" | "+.inf" => return Some(f64::INFINITY),
        "-.inf" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    let (neg, rest) = split_sign(s);
    let cleaned: String = rest.chars().filter(|c| *c != '_').collect();
    let magnitude = if cleaned.contains(':') {
        let mut val = 0.0_f64;
        for group in cleaned.split(':') {
            val = val * 60.0 + group.parse::<f64>().ok()?;
        }
        val
    } else {
        cleaned.parse::<f64>().ok()?
    };
    Some(if neg { -magnitude } else { magnitude })
}

static TIMESTAMP_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{4})-([0-9]{1,2})-([0-9]{1,2})(?:(?:[Tt]|[ \t]+)([0-9]{1,2}):([0-9]{2}):([0-9]{2})(?:\.([0-9]*))?(?:[ \t]*(?:(Z)|([-+])([0-9]{1,2})(?::?([0-9]{2}))?))?)?$",
    )
    .expect("valid timestamp parts pattern")
});

/// Parse a YAML 1.1 timestamp into a UTC instant.
///
/// A missing time means midnight, a missing zone means UTC. Fractional
/// seconds keep up to nanosecond precision; further digits are truncated.
pub(crate) fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if !TIMESTAMP.is_match(s) {
        return None;
    }
    let caps = TIMESTAMP_PARTS.captures(s)?;
    let number = |idx: usize| -> Option<u32> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let year: i32 = caps.get(1)?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, number(2)?, number(3)?)?;

    let nanos = match caps.get(7) {
        Some(fraction) => {
            let digits: String = fraction
                .as_str()
                .chars()
                .chain(std::iter::repeat('0'))
                .take(9)
                .collect();
            digits.parse().ok()?
        }
        None => 0,
    };
    let naive = date.and_hms_nano_opt(number(4)?, number(5)?, number(6)?, nanos)?;

    let offset_seconds = match caps.get(9) {
        Some(sign) => {
            let seconds = (number(10)? * 3600 + number(11)? * 60) as i32;
            if sign.as_str() == "-" { -seconds } else { seconds }
        }
        None => 0,
    };
    let offset = FixedOffset::east_opt(offset_seconds)?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|at| at.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_bases() {
        assert_eq!(parse_int("0"), Some(0));
        assert_eq!(parse_int("-12_345"), Some(-12345));
        assert_eq!(parse_int("0b1010"), Some(10));
        assert_eq!(parse_int("014"), Some(12));
        assert_eq!(parse_int("0o14"), Some(12));
        assert_eq!(parse_int("0xC"), Some(12));
        assert_eq!(parse_int("190:20:30"), Some(685_230));
        assert_eq!(parse_int("09"), None);
        assert_eq!(parse_int("1.0"), None);
        assert_eq!(parse_int(""), None);
    }

    #[test]
    fn integer_extremes() {
        assert_eq!(parse_int("-170141183460469231731687303715884105728"), Some(i128::MIN));
        assert_eq!(parse_int("170141183460469231731687303715884105728"), None);
    }

    #[test]
    fn floats_and_specials() {
        assert_eq!(parse_float("1.0"), Some(1.0));
        assert_eq!(parse_float("1"), Some(1.0));
        assert_eq!(parse_float("-1.5e3"), Some(-1500.0));
        assert_eq!(parse_float("6.8523015e+5"), Some(685_230.15));
        let sexagesimal = parse_float("190:20:30.15").expect("sexagesimal float");
        assert!((sexagesimal - 685_230.15).abs() < 1e-6);
        assert_eq!(parse_float("-.inf"), Some(f64::NEG_INFINITY));
        assert_eq!(parse_float(".Inf"), Some(f64::INFINITY));
        assert!(parse_float(".NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_float("inf"), None);
        assert_eq!(parse_float("true"), None);
    }

    #[test]
    fn timestamp_fraction_is_padded_to_nanoseconds() {
        let at = parse_timestamp("2001-12-14t21:59:43.10-05:00").expect("timestamp");
        let expected = Utc.with_ymd_and_hms(2001, 12, 15, 2, 59, 43).unwrap()
            + chrono::Duration::milliseconds(100);
        assert_eq!(at, expected);
    }

    #[test]
    fn date_only_is_midnight_utc() {
        let at = parse_timestamp("2002-12-14").expect("date");
        assert_eq!(at, Utc.with_ymd_and_hms(2002, 12, 14, 0, 0, 0).unwrap());
        assert_eq!(parse_timestamp("2002-13-14"), None);
    }
}
