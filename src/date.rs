//! Date formatting for post and project metadata.
//!
//! Inputs are front-matter style strings. Timestamps with an offset are formatted in their own
//! wall-clock time; nothing is converted to the host's zone.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse RFC 3339, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (`T` or space) or a bare `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.naive_local());
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

pub fn is_valid_date(input: &str) -> bool {
    parse_date(input).is_some()
}

fn format_with(input: &str, fmt: &str) -> String {
    parse_date(input)
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_default()
}

/// `"February 14, 2026"`; empty for missing or unparseable input.
pub fn format_date(input: &str) -> String {
    format_with(input, "%B %-d, %Y")
}

/// `"Feb 14"`
pub fn format_date_short(input: &str) -> String {
    format_with(input, "%b %-d")
}

/// `"February 14, 2026 at 2:30 PM"`
pub fn format_date_time(input: &str) -> String {
    format_with(input, "%B %-d, %Y at %-I:%M %p")
}

const INTERVALS: &[(&str, i64)] = &[
    ("year", 31_536_000),
    ("month", 2_592_000),
    ("week", 604_800),
    ("day", 86_400),
    ("hour", 3_600),
    ("minute", 60),
    ("second", 1),
];

/// `"3 days ago"` using the largest whole unit; `"Just now"` for zero or future times.
pub fn format_relative_time(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let diff = (now - then).num_seconds();
    for (unit, secs) in INTERVALS {
        let n = diff / secs;
        if n >= 1 {
            let plural = if n > 1 { "s" } else { "" };
            return format!("{n} {unit}{plural} ago");
        }
    }
    "Just now".to_owned()
}

const DAYS_PER_MONTH: f64 = 30.4375;

/// Humanized distance such as `"a few seconds ago"`, `"5 days ago"` or `"in 2 months"`.
///
/// Each unit is used while the rounded distance stays under its threshold: 44 seconds, 89
/// seconds, 44 minutes, 89 minutes, 21 hours, 35 hours, 25 days, 45 days, 10 months, 17 months,
/// then years.
pub fn format_from_now(then: NaiveDateTime, now: NaiveDateTime) -> String {
    let delta_ms = (now - then).num_milliseconds();
    let abs_secs = (delta_ms.unsigned_abs() as f64) / 1000.0;

    let secs = abs_secs.round();
    let mins = (abs_secs / 60.0).round();
    let hours = (abs_secs / 3_600.0).round();
    let days_f = abs_secs / 86_400.0;
    let days = days_f.round();
    let months = (days_f / DAYS_PER_MONTH).round();
    let years = (days_f / DAYS_PER_MONTH / 12.0).round();

    let counted = |n: f64, one: &str, many: &str| {
        if n <= 1.0 {
            one.to_owned()
        } else {
            format!("{} {many}", n as u64)
        }
    };

    let phrase = if secs <= 44.0 {
        "a few seconds".to_owned()
    } else if secs <= 89.0 {
        "a minute".to_owned()
    } else if mins <= 44.0 {
        counted(mins, "a minute", "minutes")
    } else if mins <= 89.0 {
        "an hour".to_owned()
    } else if hours <= 21.0 {
        counted(hours, "an hour", "hours")
    } else if hours <= 35.0 {
        "a day".to_owned()
    } else if days <= 25.0 {
        counted(days, "a day", "days")
    } else if days <= 45.0 {
        "a month".to_owned()
    } else if months <= 10.0 {
        counted(months, "a month", "months")
    } else if months <= 17.0 {
        "a year".to_owned()
    } else {
        counted(years, "a year", "years")
    };

    if delta_ms < 0 {
        format!("in {phrase}")
    } else {
        format!("{phrase} ago")
    }
}

/// [`format_from_now`] against the local clock; empty for unparseable input.
pub fn format_relative(input: &str) -> String {
    parse_date(input)
        .map(|then| format_from_now(then, Local::now().naive_local()))
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "../tests/unit/date.rs"]
mod tests;
