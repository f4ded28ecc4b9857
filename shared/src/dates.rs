//! Date normalization
//!
//! Dates reach this client in several textual shapes:
//!
//! - `2024-03-05` / `2024-03-05T14:30` from date and datetime-local inputs
//! - `2024-03-04T18:30:00.000Z` when the endpoint serialises a date cell
//! - `05/03/24 14:30:00` in sheet storage
//! - `05/03/1994` for dates of birth
//!
//! When the year is not first, day/month order is guessed: a first
//! component above 12 must be the day, a second component above 12 must be
//! the day, and anything else is read day-first and marked
//! [`DayMonthOrder::Ambiguous`]. `03/04/24` therefore always means 3 April.
//! Formatting helpers never fail; unparseable input comes back unchanged.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Storage format of date-time cells
pub const SHEET_DATETIME_FORMAT: &str = "%d/%m/%y %H:%M:%S";
/// Display format of date-only cells
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";
/// Format accepted by date inputs
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// How day and month were told apart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DayMonthOrder {
    /// Year first; order is unambiguous
    YearFirst,
    /// First component above 12
    DayFirst,
    /// Second component above 12
    MonthFirst,
    /// Both components 12 or below; read day-first
    Ambiguous,
}

/// Result of [`normalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NormalizedDate {
    pub datetime: NaiveDateTime,
    /// Input carried a time of day
    pub has_time: bool,
    pub order: DayMonthOrder,
}

impl NormalizedDate {
    pub fn date(&self) -> NaiveDate {
        self.datetime.date()
    }

    pub fn is_ambiguous(&self) -> bool {
        self.order == DayMonthOrder::Ambiguous
    }
}

/// Parse any of the supported shapes.
pub fn normalize(input: &str) -> Option<NormalizedDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    // Serialised date cells come back as UTC instants
    if let Ok(instant) = DateTime::parse_from_rfc3339(input) {
        return Some(NormalizedDate {
            datetime: instant.with_timezone(&Local).naive_local(),
            has_time: true,
            order: DayMonthOrder::YearFirst,
        });
    }

    let (date_part, time_part) = match input.split_once(['T', ' ']) {
        Some((date, time)) => (date, Some(time.trim())),
        None => (input, None),
    };

    let separator = if date_part.contains('/') {
        '/'
    } else if date_part.contains('-') {
        '-'
    } else {
        return None;
    };

    let parts: Vec<&str> = date_part.split(separator).map(str::trim).collect();
    let [first, second, third] = parts.as_slice() else {
        return None;
    };
    let (a, b, c) = (
        first.parse::<u32>().ok()?,
        second.parse::<u32>().ok()?,
        third.parse::<i32>().ok()?,
    );

    let (year, month, day, order) = if first.len() == 4 {
        (a as i32, b, c.try_into().ok()?, DayMonthOrder::YearFirst)
    } else {
        let year = if c < 100 { c + 2000 } else { c };
        if a > 12 {
            (year, b, a, DayMonthOrder::DayFirst)
        } else if b > 12 {
            (year, a, b, DayMonthOrder::MonthFirst)
        } else {
            (year, b, a, DayMonthOrder::Ambiguous)
        }
    };

    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let time = match time_part.filter(|t| !t.is_empty()) {
        Some(t) => Some(parse_time(t)?),
        None => None,
    };

    Some(NormalizedDate {
        datetime: date.and_time(time.unwrap_or(NaiveTime::MIN)),
        has_time: time.is_some(),
        order,
    })
}

fn parse_time(input: &str) -> Option<NaiveTime> {
    ["%H:%M:%S", "%H:%M:%S%.f", "%H:%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(input, fmt).ok())
}

/// Parse a date-time, defaulting to midnight for date-only input
pub fn parse_datetime(input: &str) -> Option<NaiveDateTime> {
    normalize(input).map(|n| n.datetime)
}

/// Parse the calendar day of any supported shape
pub fn parse_date(input: &str) -> Option<NaiveDate> {
    normalize(input).map(|n| n.date())
}

pub fn format_sheet_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(SHEET_DATETIME_FORMAT).to_string()
}

pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// `2024-03-05T14:30` → `05/03/24 14:30:00`; input returned unchanged on failure
pub fn to_sheet_datetime(input: &str) -> String {
    parse_datetime(input)
        .map(format_sheet_datetime)
        .unwrap_or_else(|| input.to_string())
}

/// Any supported shape → `dd/mm/yyyy`; input returned unchanged on failure
pub fn to_display_date(input: &str) -> String {
    parse_date(input)
        .map(format_display_date)
        .unwrap_or_else(|| input.to_string())
}

/// Any supported shape → `yyyy-mm-dd`; input returned unchanged on failure
pub fn to_iso_date(input: &str) -> String {
    parse_date(input)
        .map(|d| d.format(ISO_DATE_FORMAT).to_string())
        .unwrap_or_else(|| input.to_string())
}
