//! Single-unit calendar durations and offset arithmetic.

use chrono::{DateTime, Duration, Months, TimeZone};

/// A calendar offset carrying exactly one unit magnitude.
///
/// The magnitude keeps the sign the user supplied, including negative and
/// zero offsets. Month-based variants (months, quarters, years) shift by
/// whole calendar months rather than a fixed number of days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarDuration {
    /// Offset in milliseconds (`ms`).
    Milliseconds(i64),
    /// Offset in seconds (`s`).
    Seconds(i64),
    /// Offset in minutes (`m`).
    Minutes(i64),
    /// Offset in hours (`h`).
    Hours(i64),
    /// Offset in days (`d`).
    Days(i64),
    /// Offset in weeks (`w`).
    Weeks(i64),
    /// Offset in calendar months (`M`).
    Months(i64),
    /// Offset in quarters, i.e. three calendar months (`Q`).
    Quarters(i64),
    /// Offset in calendar years (`y`).
    Years(i64),
}

/// Maps a unit code onto a calendar duration.
///
/// Recognized codes are `ms`, `s`, `m`, `h`, `d`, `w`, `M`, `Q` and `y`
/// (case-sensitive). Any other code resolves to `None` — absence, never an
/// error and never a zero-duration with an invalid unit.
pub fn resolve_duration(offset: i64, unit: &str) -> Option<CalendarDuration> {
    match unit {
        "ms" => Some(CalendarDuration::Milliseconds(offset)),
        "s" => Some(CalendarDuration::Seconds(offset)),
        "m" => Some(CalendarDuration::Minutes(offset)),
        "h" => Some(CalendarDuration::Hours(offset)),
        "d" => Some(CalendarDuration::Days(offset)),
        "w" => Some(CalendarDuration::Weeks(offset)),
        "M" => Some(CalendarDuration::Months(offset)),
        "Q" => Some(CalendarDuration::Quarters(offset)),
        "y" => Some(CalendarDuration::Years(offset)),
        _ => None,
    }
}

/// Shifts `date` by an offset magnitude and unit code.
///
/// If either argument is missing, the magnitude does not parse as a signed
/// integer, or the unit code is unrecognized, the date comes back
/// unchanged. Negative magnitudes produce a point in the past.
pub fn apply_offset<Tz: TimeZone>(
    date: DateTime<Tz>,
    offset: Option<&str>,
    unit: Option<&str>,
) -> DateTime<Tz> {
    let (Some(offset), Some(unit)) = (offset, unit) else {
        return date;
    };
    let Ok(magnitude) = offset.parse::<i64>() else {
        return date;
    };
    match resolve_duration(magnitude, unit) {
        Some(duration) => shift(date, duration),
        None => date,
    }
}

fn shift<Tz: TimeZone>(date: DateTime<Tz>, duration: CalendarDuration) -> DateTime<Tz> {
    let shifted = match duration {
        CalendarDuration::Milliseconds(n) => add_signed(&date, Duration::try_milliseconds(n)),
        CalendarDuration::Seconds(n) => add_signed(&date, Duration::try_seconds(n)),
        CalendarDuration::Minutes(n) => add_signed(&date, Duration::try_minutes(n)),
        CalendarDuration::Hours(n) => add_signed(&date, Duration::try_hours(n)),
        CalendarDuration::Days(n) => add_signed(&date, Duration::try_days(n)),
        CalendarDuration::Weeks(n) => add_signed(&date, Duration::try_weeks(n)),
        CalendarDuration::Months(n) => add_months(&date, n),
        CalendarDuration::Quarters(n) => add_months(&date, n.saturating_mul(3)),
        CalendarDuration::Years(n) => add_months(&date, n.saturating_mul(12)),
    };
    // Out-of-range arithmetic leaves the date untouched.
    shifted.unwrap_or(date)
}

fn add_signed<Tz: TimeZone>(date: &DateTime<Tz>, delta: Option<Duration>) -> Option<DateTime<Tz>> {
    date.clone().checked_add_signed(delta?)
}

fn add_months<Tz: TimeZone>(date: &DateTime<Tz>, months: i64) -> Option<DateTime<Tz>> {
    let magnitude = u32::try_from(months.unsigned_abs()).ok()?;
    if months >= 0 {
        date.clone().checked_add_months(Months::new(magnitude))
    } else {
        date.clone().checked_sub_months(Months::new(magnitude))
    }
}
