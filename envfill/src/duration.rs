//! Duration literals such as `300ms`, `1.5h` or `2h45m`

use crate::error::ConvertError;
use std::time::Duration;

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

fn unit(name: &str) -> Option<u64> {
    match name {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a sequence of decimal numbers, each with a unit suffix.
///
/// A leading `+` is accepted. `0` on its own needs no unit.
///
/// [`Duration`] is unsigned, so negative durations such as `-5s` or `-1.5h`
/// are rejected; a leading `-` is only accepted for a zero duration.
pub fn parse_duration(value: &str) -> Result<Duration, ConvertError> {
    let invalid = |reason| ConvertError::Duration {
        value: value.to_string(),
        reason,
    };

    let mut s = value;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    if s.is_empty() {
        return Err(invalid("empty duration"));
    }

    let mut total: u64 = 0;
    while !s.is_empty() {
        if !s.starts_with(|c: char| c == '.' || c.is_ascii_digit()) {
            return Err(invalid("expected a number"));
        }

        let (whole, rest) = leading_int(s).ok_or_else(|| invalid("number out of range"))?;
        let has_whole = rest.len() != s.len();
        s = rest;

        let mut fraction = 0;
        let mut scale = 1.0;
        let mut has_fraction = false;
        if let Some(rest) = s.strip_prefix('.') {
            let (f, sc, rest2) = leading_fraction(rest);
            has_fraction = rest2.len() != rest.len();
            fraction = f;
            scale = sc;
            s = rest2;
        }
        if !has_whole && !has_fraction {
            return Err(invalid("expected a number"));
        }

        let end = s
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(s.len());
        if end == 0 {
            return Err(invalid("missing unit"));
        }
        let multiplier = unit(&s[..end]).ok_or_else(|| invalid("unknown unit"))?;
        s = &s[end..];

        let mut amount = whole
            .checked_mul(multiplier)
            .ok_or_else(|| invalid("duration out of range"))?;
        if fraction > 0 {
            let extra = (fraction as f64 * (multiplier as f64 / scale)) as u64;
            amount = amount
                .checked_add(extra)
                .ok_or_else(|| invalid("duration out of range"))?;
        }
        total = total
            .checked_add(amount)
            .ok_or_else(|| invalid("duration out of range"))?;
    }

    if negative && total != 0 {
        return Err(invalid("negative duration"));
    }
    Ok(Duration::from_nanos(total))
}

// Consumes leading digits. `None` on overflow.
fn leading_int(s: &str) -> Option<(u64, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    for digit in s[..end].bytes() {
        value = value
            .checked_mul(10)?
            .checked_add(u64::from(digit - b'0'))?;
    }
    Some((value, &s[end..]))
}

// Consumes leading digits as a fraction. Digits past u64 precision are
// dropped but still consumed.
fn leading_fraction(s: &str) -> (u64, f64, &str) {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let mut value: u64 = 0;
    let mut scale = 1.0;
    let mut overflow = false;
    for digit in s[..end].bytes() {
        if overflow {
            continue;
        }
        match value
            .checked_mul(10)
            .and_then(|v| v.checked_add(u64::from(digit - b'0')))
        {
            Some(v) => {
                value = v;
                scale *= 10.0;
            }
            None => overflow = true,
        }
    }
    (value, scale, &s[end..])
}
