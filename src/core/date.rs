//! Calendar date parsing and ranges.
//!
//! Log keys are strict `yyyy-MM-dd` dates. User input on the command line is
//! a little friendlier: it also accepts relative words that point backwards
//! in time, since habits are logged after the fact.

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc, Weekday};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::HabitError;

/// Format used for every stored and displayed date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap_or_else(|e| panic!("Invalid date regex: {e}"))
});

static DAYS_AGO: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{1,4})\s+days?\s+ago$").unwrap_or_else(|e| panic!("Invalid offset regex: {e}"))
});

static SHORT_OFFSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^-(\d{1,4})d$").unwrap_or_else(|e| panic!("Invalid offset regex: {e}"))
});

static YEAR_MONTH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})$").unwrap_or_else(|e| panic!("Invalid month regex: {e}"))
});

/// First day of the displayed week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    /// Sunday-first weeks.
    #[default]
    Sunday,
    /// ISO weeks.
    Monday,
}

impl WeekStart {
    /// The weekday a week begins on.
    #[must_use]
    pub const fn weekday(self) -> Weekday {
        match self {
            Self::Sunday => Weekday::Sun,
            Self::Monday => Weekday::Mon,
        }
    }
}

/// Parse a strict, zero-padded `yyyy-MM-dd` date.
///
/// # Errors
///
/// Returns [`HabitError::InvalidDate`] for anything else, including dates
/// that are well-formed but do not exist (`2023-02-29`).
pub fn parse_date(input: &str) -> Result<NaiveDate, HabitError> {
    let input = input.trim();
    if !ISO_DATE.is_match(input) {
        return Err(HabitError::InvalidDate(input.to_string()));
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .map_err(|_| HabitError::InvalidDate(input.to_string()))
}

/// Format a date as `yyyy-MM-dd`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a habit start date from a stored record.
///
/// Accepts a plain date or a full RFC 3339 timestamp, which is truncated to
/// its UTC calendar date.
///
/// # Errors
///
/// Returns [`HabitError::InvalidDate`] if neither form parses.
pub fn parse_start_date(input: &str) -> Result<NaiveDate, HabitError> {
    if let Ok(date) = parse_date(input) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(input.trim())
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| HabitError::InvalidDate(input.to_string()))
}

/// Parse a date typed on the command line, relative to `today`.
///
/// Supports:
/// - `today`, `yesterday`
/// - `3 days ago`, `-3d`
/// - `monday`, `mon` (most recent such day, today included)
/// - `last monday` (most recent such day strictly before today)
/// - `2024-12-15`
///
/// # Errors
///
/// Returns [`HabitError::InvalidDate`] if the input matches none of these.
pub fn parse_date_input(input: &str, today: NaiveDate) -> Result<NaiveDate, HabitError> {
    let normalized = input.trim().to_lowercase();

    match normalized.as_str() {
        "today" => return Ok(today),
        "yesterday" => return Ok(today - Duration::days(1)),
        _ => {},
    }

    if let Some(caps) = DAYS_AGO
        .captures(&normalized)
        .or_else(|| SHORT_OFFSET.captures(&normalized))
    {
        let days: i64 = caps[1]
            .parse()
            .map_err(|_| HabitError::InvalidDate(input.to_string()))?;
        return Ok(today - Duration::days(days));
    }

    if let Some(date) = parse_weekday(&normalized, today) {
        return Ok(date);
    }

    parse_date(&normalized).map_err(|_| HabitError::InvalidDate(input.to_string()))
}

/// Parse weekday names, looking backwards from `today`.
fn parse_weekday(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    let (is_last, day_str) = input
        .strip_prefix("last ")
        .map_or((false, input), |rest| (true, rest));

    let target = weekday_from_name(day_str)?;
    let mut days_back = (i64::from(today.weekday().num_days_from_sunday())
        - i64::from(target.num_days_from_sunday())
        + 7)
        % 7;

    if is_last && days_back == 0 {
        days_back = 7;
    }

    Some(today - Duration::days(days_back))
}

/// Map an English weekday name or abbreviation to a [`Weekday`].
#[must_use]
pub fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name {
        "sunday" | "sun" => Some(Weekday::Sun),
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thur" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Parse a `yyyy-MM` month into its first day.
///
/// # Errors
///
/// Returns [`HabitError::InvalidDate`] for malformed input or a month outside 1-12.
pub fn parse_month(input: &str) -> Result<NaiveDate, HabitError> {
    let input = input.trim();
    let caps = YEAR_MONTH
        .captures(input)
        .ok_or_else(|| HabitError::InvalidDate(input.to_string()))?;
    let year: i32 = caps[1]
        .parse()
        .map_err(|_| HabitError::InvalidDate(input.to_string()))?;
    let month: u32 = caps[2]
        .parse()
        .map_err(|_| HabitError::InvalidDate(input.to_string()))?;
    NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| HabitError::InvalidDate(input.to_string()))
}

/// First day of the month containing `date`.
#[must_use]
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the week containing `date`.
#[must_use]
pub fn start_of_week(date: NaiveDate, week_start: WeekStart) -> NaiveDate {
    let offset = match week_start {
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
        WeekStart::Monday => date.weekday().num_days_from_monday(),
    };
    date - Duration::days(i64::from(offset))
}

/// The seven days of the week containing `date`.
#[must_use]
pub fn week_days(date: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let start = start_of_week(date, week_start);
    (0..7).map(|i| start + Duration::days(i)).collect()
}

/// A six-week grid covering the month of `month`, padded with days of the
/// neighbouring months so that every row is a full week.
#[must_use]
pub fn month_grid(month: NaiveDate, week_start: WeekStart) -> Vec<NaiveDate> {
    let start = start_of_week(start_of_month(month), week_start);
    (0..42).map(|i| start + Duration::days(i)).collect()
}

/// The last `count` days ending at `today`, oldest first.
#[must_use]
pub fn trailing_days(today: NaiveDate, count: usize) -> Vec<NaiveDate> {
    (0..count)
        .rev()
        .map(|back| today - Duration::days(back as i64))
        .collect()
}

/// Whether two dates fall in the same calendar month.
#[must_use]
pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}
