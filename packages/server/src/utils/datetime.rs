//! Wire codec for naive local date-times.
//!
//! Values are written as `yyyy-MM-dd HH:mm:ss`. Input accepts ISO-8601
//! (`2018-07-13T08:00:00`, optional fraction) as well as the output form.

use chrono::{Local, NaiveDate, NaiveDateTime};

pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const INPUT_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", WIRE_FORMAT];

/// Current wall-clock time, as stored in timestamp columns.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

pub fn parse(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();
    INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
}

/// Half-open range `[start, end)` covering a calendar year, month or day.
/// Returns `None` when the date does not exist.
pub fn year_range(year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
    let end = NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?;
    Some((start.and_hms_opt(0, 0, 0)?, end.and_hms_opt(0, 0, 0)?))
}

pub fn month_range(month: u32, year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let end = if month == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start.and_hms_opt(0, 0, 0)?, end.and_hms_opt(0, 0, 0)?))
}

pub fn day_range(day: u32, month: u32, year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = NaiveDate::from_ymd_opt(year, month, day)?;
    let end = start.succ_opt()?;
    Some((start.and_hms_opt(0, 0, 0)?, end.and_hms_opt(0, 0, 0)?))
}
