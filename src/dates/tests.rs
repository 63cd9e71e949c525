// Dates module tests.

use chrono::{Duration, Months, TimeZone, Utc};

use super::*;

fn sample_date() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2000, 3, 4, 5, 6, 7).unwrap() + Duration::milliseconds(8)
}

#[test]
fn resolve_duration_maps_every_unit_code() {
    assert_eq!(
        resolve_duration(100, "ms"),
        Some(CalendarDuration::Milliseconds(100))
    );
    assert_eq!(resolve_duration(-10, "s"), Some(CalendarDuration::Seconds(-10)));
    assert_eq!(resolve_duration(1, "m"), Some(CalendarDuration::Minutes(1)));
    assert_eq!(resolve_duration(-1, "h"), Some(CalendarDuration::Hours(-1)));
    assert_eq!(resolve_duration(7, "d"), Some(CalendarDuration::Days(7)));
    assert_eq!(resolve_duration(4, "w"), Some(CalendarDuration::Weeks(4)));
    assert_eq!(resolve_duration(12, "M"), Some(CalendarDuration::Months(12)));
    assert_eq!(resolve_duration(4, "Q"), Some(CalendarDuration::Quarters(4)));
    assert_eq!(resolve_duration(0, "y"), Some(CalendarDuration::Years(0)));
}

#[test]
fn resolve_duration_rejects_unknown_codes() {
    assert_eq!(resolve_duration(5, "x"), None);
    assert_eq!(resolve_duration(5, ""), None);
    // Unit codes are case-sensitive: `MS` is not `ms`.
    assert_eq!(resolve_duration(5, "MS"), None);
    assert_eq!(resolve_duration(5, "q"), None);
}

#[test]
fn apply_offset_without_arguments_is_identity() {
    let date = sample_date();
    assert_eq!(apply_offset(date, None, None), date);
    assert_eq!(apply_offset(date, Some("10"), None), date);
    assert_eq!(apply_offset(date, None, Some("w")), date);
}

#[test]
fn apply_offset_shifts_weeks_and_years() {
    let date = sample_date();
    assert_eq!(
        apply_offset(date, Some("10"), Some("w")),
        date + Duration::weeks(10)
    );
    assert_eq!(
        apply_offset(date, Some("-2"), Some("y")),
        date - Months::new(24)
    );
}

#[test]
fn apply_offset_uses_calendar_month_arithmetic() {
    // One month after Jan 31 is the end of February, not 30/31 days later.
    let date = Utc.with_ymd_and_hms(2000, 1, 31, 0, 0, 0).unwrap();
    assert_eq!(
        apply_offset(date, Some("1"), Some("M")),
        Utc.with_ymd_and_hms(2000, 2, 29, 0, 0, 0).unwrap()
    );
    assert_eq!(
        apply_offset(date, Some("1"), Some("Q")),
        Utc.with_ymd_and_hms(2000, 4, 30, 0, 0, 0).unwrap()
    );
}

#[test]
fn apply_offset_ignores_unknown_units_and_bad_magnitudes() {
    let date = sample_date();
    assert_eq!(apply_offset(date, Some("10"), Some("x")), date);
    assert_eq!(apply_offset(date, Some("ten"), Some("w")), date);
    assert_eq!(apply_offset(date, Some("0"), Some("d")), date);
}

#[test]
fn format_date_rfc1123() {
    assert_eq!(
        format_date(&sample_date(), "rfc1123"),
        "Sat, 04 Mar 2000 05:06:07 GMT"
    );
}

#[test]
fn format_date_iso8601() {
    assert_eq!(
        format_date(&sample_date(), "iso8601"),
        "2000-03-04T05:06:07.008Z"
    );
}

#[test]
fn format_date_custom_pattern_strips_quotes() {
    let date = sample_date();
    assert_eq!(format_date(&date, "\"YYYY-MM-D\""), "2000-03-4");
    assert_eq!(format_date(&date, "'YYYY-MM-D'"), "2000-03-4");
    assert_eq!(format_date(&date, "YYYY-MM-D"), "2000-03-4");
}

#[test]
fn format_date_token_table() {
    let date = sample_date();
    assert_eq!(
        format_date(&date, "YYYY-MM-DD HH:mm:ss.SSS"),
        "2000-03-04 05:06:07.008"
    );
    assert_eq!(format_date(&date, "ddd D MMM YY h:m:s A"), "Sat 4 Mar 00 5:6:7 AM");
}

#[test]
fn format_date_unknown_pattern_echoes_verbatim() {
    let date = sample_date();
    assert_eq!(format_date(&date, "y"), "y");
    // Idempotent: formatting the echoed pattern again changes nothing.
    let once = format_date(&date, "not a pattern");
    let twice = format_date(&date, &once);
    assert_eq!(once, twice);
}
