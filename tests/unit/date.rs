use chrono::TimeDelta;

use super::*;

fn at(s: &str) -> NaiveDateTime {
    parse_date(s).unwrap()
}

#[test]
fn parses_supported_shapes() {
    assert_eq!(at("2026-02-14"), at("2026-02-14T00:00:00"));
    assert_eq!(at("2026-02-14 14:30"), at("2026-02-14T14:30:00"));
    assert_eq!(at("2026-02-14T14:30:00+05:00"), at("2026-02-14T14:30:00"));
    assert_eq!(at("2026-02-14T14:30:00.250Z"), at("2026-02-14T14:30:00.250"));
    assert!(parse_date("").is_none());
    assert!(parse_date("yesterday").is_none());
    assert!(!is_valid_date("2026-13-01"));
    assert!(is_valid_date(" 2026-02-14 "));
}

#[test]
fn long_short_and_time_formats() {
    assert_eq!(format_date("2026-02-14"), "February 14, 2026");
    assert_eq!(format_date("2026-03-05T08:00:00Z"), "March 5, 2026");
    assert_eq!(format_date_short("2026-02-14"), "Feb 14");
    assert_eq!(
        format_date_time("2026-02-14T14:30:00"),
        "February 14, 2026 at 2:30 PM"
    );
    assert_eq!(
        format_date_time("2026-02-14T00:05:00"),
        "February 14, 2026 at 12:05 AM"
    );
}

#[test]
fn missing_or_invalid_input_formats_empty() {
    assert_eq!(format_date(""), "");
    assert_eq!(format_date_short("nope"), "");
    assert_eq!(format_date_time("2026-02-30"), "");
    assert_eq!(format_relative(""), "");
}

#[test]
fn relative_time_uses_largest_unit() {
    let now = at("2026-02-14T12:00:00");
    let ago = |d: TimeDelta| format_relative_time(now - d, now);

    assert_eq!(ago(TimeDelta::zero()), "Just now");
    assert_eq!(ago(TimeDelta::seconds(1)), "1 second ago");
    assert_eq!(ago(TimeDelta::seconds(59)), "59 seconds ago");
    assert_eq!(ago(TimeDelta::minutes(1)), "1 minute ago");
    assert_eq!(ago(TimeDelta::hours(5)), "5 hours ago");
    assert_eq!(ago(TimeDelta::days(2)), "2 days ago");
    assert_eq!(ago(TimeDelta::days(7)), "1 week ago");
    assert_eq!(ago(TimeDelta::days(30)), "1 month ago");
    assert_eq!(ago(TimeDelta::days(800)), "2 years ago");
    assert_eq!(format_relative_time(now + TimeDelta::hours(1), now), "Just now");
}

#[test]
fn from_now_thresholds() {
    let now = at("2026-02-14T12:00:00");
    let ago = |d: TimeDelta| format_from_now(now - d, now);

    assert_eq!(ago(TimeDelta::seconds(10)), "a few seconds ago");
    assert_eq!(ago(TimeDelta::seconds(60)), "a minute ago");
    assert_eq!(ago(TimeDelta::seconds(100)), "2 minutes ago");
    assert_eq!(ago(TimeDelta::minutes(30)), "30 minutes ago");
    assert_eq!(ago(TimeDelta::minutes(60)), "an hour ago");
    assert_eq!(ago(TimeDelta::hours(5)), "5 hours ago");
    assert_eq!(ago(TimeDelta::hours(30)), "a day ago");
    assert_eq!(ago(TimeDelta::days(3)), "3 days ago");
    assert_eq!(ago(TimeDelta::days(40)), "a month ago");
    assert_eq!(ago(TimeDelta::days(120)), "4 months ago");
    assert_eq!(ago(TimeDelta::days(400)), "a year ago");
    assert_eq!(ago(TimeDelta::days(1100)), "3 years ago");
}

#[test]
fn from_now_future_is_prefixed() {
    let now = at("2026-02-14T12:00:00");
    assert_eq!(format_from_now(now + TimeDelta::days(3), now), "in 3 days");
    assert_eq!(format_from_now(now + TimeDelta::seconds(5), now), "in a few seconds");
}
