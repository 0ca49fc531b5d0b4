//! Lap time codec
//!
//! Lap times travel as [`TimeDelta`] values and all statistics run on `f64` seconds.
//! This module converts between the two and renders durations in the timing
//! provider's timedelta text form:
//!
//! ```text
//! 0 days 00:01:30.100000      90.1 s
//! 0 days 00:00:31.533333333   31.533333333 s
//! -1 days +23:59:59.300000    -0.7 s
//! ```

use chrono::TimeDelta;

const NANOS_PER_SECOND: i128 = 1_000_000_000;
const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SECOND;

/// Convert a duration to fractional seconds.
pub fn to_seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

/// Convert fractional seconds back to a duration, rounded to the nearest nanosecond.
///
/// Returns `None` for non-finite input or values outside the representable range.
pub fn from_seconds(seconds: f64) -> Option<TimeDelta> {
    if !seconds.is_finite() {
        return None;
    }
    let nanos = (seconds * 1e9).round();
    if nanos.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(TimeDelta::nanoseconds(nanos as i64))
}

fn total_nanos(delta: TimeDelta) -> i128 {
    i128::from(delta.num_seconds()) * NANOS_PER_SECOND + i128::from(delta.subsec_nanos())
}

/// Render a duration as `"D days HH:MM:SS[.ffffff|.fffffffff]"`.
///
/// Days are floored, so negative durations keep a positive clock part
/// (`-1 days +23:59:59.300000`). The fraction is omitted when zero, printed with
/// microsecond precision when that is exact, and with nanosecond precision otherwise.
pub fn format_timedelta(delta: TimeDelta) -> String {
    let total = total_nanos(delta);
    let days = total.div_euclid(NANOS_PER_DAY);
    let rem = total.rem_euclid(NANOS_PER_DAY);

    let whole_seconds = rem / NANOS_PER_SECOND;
    let frac = rem % NANOS_PER_SECOND;
    let hours = whole_seconds / 3600;
    let minutes = (whole_seconds % 3600) / 60;
    let seconds = whole_seconds % 60;

    let sign = if days < 0 { "+" } else { "" };
    let fraction = if frac == 0 {
        String::new()
    } else if frac % 1000 == 0 {
        format!(".{:06}", frac / 1000)
    } else {
        format!(".{:09}", frac)
    };

    format!("{days} days {sign}{hours:02}:{minutes:02}:{seconds:02}{fraction}")
}

/// Parse a lap time from text.
///
/// Accepts the timedelta form produced by [`format_timedelta`], clock forms
/// (`1:30.100`, `00:01:30.1`) with an optional leading `-`, and plain seconds (`90.1`).
/// Returns `None` when the text is not a duration.
pub fn parse_timedelta(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    if let Some(day_pos) = text.find("day") {
        let days: i64 = text[..day_pos].trim().parse().ok()?;
        let after = text[day_pos..].trim_start_matches("days").trim_start_matches("day").trim();
        let clock = after.strip_prefix('+').unwrap_or(after);
        let clock_nanos = if clock.is_empty() { 0 } else { parse_clock(clock)? };
        let total = i128::from(days) * NANOS_PER_DAY + clock_nanos;
        return Some(TimeDelta::nanoseconds(i64::try_from(total).ok()?));
    }

    if text.contains(':') {
        let (negative, clock) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let nanos = parse_clock(clock)?;
        let nanos = if negative { -nanos } else { nanos };
        return Some(TimeDelta::nanoseconds(i64::try_from(nanos).ok()?));
    }

    from_seconds(text.parse::<f64>().ok()?)
}

/// Parse `[[H:]M:]S[.fraction]` into nanoseconds.
fn parse_clock(clock: &str) -> Option<i128> {
    let parts: Vec<&str> = clock.split(':').collect();
    if parts.is_empty() || parts.len() > 3 {
        return None;
    }

    let (seconds_part, leading) = parts.split_last()?;
    let (whole, fraction) = match seconds_part.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (*seconds_part, ""),
    };

    let seconds: i128 = whole.parse::<u64>().ok()?.into();
    if !leading.is_empty() && seconds >= 60 {
        return None;
    }
    if !fraction.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let mut frac_digits: String = fraction.chars().take(9).collect();
    while frac_digits.len() < 9 {
        frac_digits.push('0');
    }
    let frac_nanos: i128 = frac_digits.parse::<u64>().ok()?.into();

    let mut total = seconds * NANOS_PER_SECOND + frac_nanos;
    let mut unit = 60 * NANOS_PER_SECOND;
    for (i, part) in leading.iter().rev().enumerate() {
        let value: i128 = part.parse::<u64>().ok()?.into();
        // minutes are bounded when hours are also given
        if i == 0 && leading.len() == 2 && value >= 60 {
            return None;
        }
        total += value * unit;
        unit *= 60;
    }
    Some(total)
}

/// Serde adapter rendering [`TimeDelta`] fields as timedelta text.
pub mod timedelta_text {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(delta: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_timedelta(*delta))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_timedelta(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid duration '{}'", text)))
    }
}
