// Xyna Engine — Time & Duration Parsing
// Turns relative ("in 10 minutes"), 12-hour ("5pm", "5:30 pm") and 24-hour
// ("17:30") phrases into concrete local timestamps, and duration phrases
// ("2 hours") into minutes. No match is a normal outcome and yields None.

use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use log::warn;
use regex::Regex;
use std::sync::LazyLock;

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("[timeparse] Failed to compile pattern '{}': {}", pattern, e);
            None
        }
    }
}

static INTEGER: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"\d+"));
static CLOCK_12H: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(\d{1,2})(?::(\d{2}))?\s*(am|pm)"));
static CLOCK_24H: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"(\d{1,2}):(\d{2})"));
static DURATION: LazyLock<Option<Regex>> =
    LazyLock::new(|| compile(r"(\d+)\s*(minute|hour|day)s?"));

/// Resolve a time phrase against the current local time.
pub fn parse_time(text: &str) -> Option<NaiveDateTime> {
    parse_time_at(text, Local::now().naive_local())
}

/// Resolve a time phrase against an explicit reference instant.
///
/// Exactly one branch is tried, chosen by the first condition that holds:
/// contains `in` → relative offset; contains `am`/`pm` → 12-hour clock on the
/// reference date; contains `:` → 24-hour clock on the reference date.
pub fn parse_time_at(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let lower = text.to_lowercase();

    if lower.contains("in") {
        return relative_offset(&lower, now);
    }
    if lower.contains("am") || lower.contains("pm") {
        return clock_12h(&lower, now);
    }
    if lower.contains(':') {
        return clock_24h(&lower, now);
    }
    None
}

fn relative_offset(lower: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let amount: i64 = INTEGER.as_ref()?.find(lower)?.as_str().parse().ok()?;
    let offset = if lower.contains("minute") {
        Duration::try_minutes(amount)?
    } else if lower.contains("hour") {
        Duration::try_hours(amount)?
    } else if lower.contains("day") {
        Duration::try_days(amount)?
    } else {
        return None;
    };
    now.checked_add_signed(offset)
}

fn clock_12h(lower: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = CLOCK_12H.as_ref()?.captures(lower)?;
    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if !(1..=12).contains(&hour) {
        return None;
    }
    let hour24 = match (&caps[3], hour) {
        ("am", 12) => 0,
        ("am", h) => h,
        ("pm", 12) => 12,
        (_, h) => h + 12,
    };
    let time = NaiveTime::from_hms_opt(hour24, minute, 0)?;
    Some(now.date().and_time(time))
}

fn clock_24h(lower: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let caps = CLOCK_24H.as_ref()?.captures(lower)?;
    let hour: u32 = caps[1].parse().ok()?;
    let minute: u32 = caps[2].parse().ok()?;
    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(now.date().and_time(time))
}

/// Minutes in the first `<n> minute|hour|day[s]` phrase of `text`.
pub fn parse_duration(text: &str) -> Option<u32> {
    let lower = text.to_lowercase();
    let caps = DURATION.as_ref()?.captures(&lower)?;
    let amount: u32 = caps[1].parse().ok()?;
    match &caps[2] {
        "minute" => Some(amount),
        "hour" => amount.checked_mul(60),
        "day" => amount.checked_mul(24 * 60),
        _ => None,
    }
}

/// ISO-8601 rendering used in intent payloads (`2026-10-16T17:00:00`).
pub fn to_iso(dt: &NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}
