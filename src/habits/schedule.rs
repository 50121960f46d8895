//! Recurrence rules: which days a habit is due.

use chrono::{Datelike, NaiveDate};

use super::types::{Habit, Schedule};

impl Schedule {
    /// Whether the schedule includes `date`.
    #[must_use]
    pub fn includes(&self, date: NaiveDate) -> bool {
        let day = u8::try_from(date.weekday().num_days_from_sunday()).unwrap_or(u8::MAX);
        match self {
            Self::Daily => true,
            Self::Weekdays => (1..=5).contains(&day),
            Self::Weekends => day == 0 || day == 6,
            Self::Custom(days) => days.contains(&day),
        }
    }

    /// Short human description, e.g. `Mon, Wed, Fri`.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Daily => "Every day".to_string(),
            Self::Weekdays => "Weekdays".to_string(),
            Self::Weekends => "Weekends".to_string(),
            Self::Custom(days) => days
                .iter()
                .filter_map(|d| DAY_NAMES.get(usize::from(*d)))
                .copied()
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Short weekday names indexed 0 = Sunday.
pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

impl Habit {
    /// Whether the habit is due on `date`: scheduled and not before its start.
    #[must_use]
    pub fn is_due_on(&self, date: NaiveDate) -> bool {
        date >= self.start_date && self.schedule.includes(date)
    }

    /// The days in `days` on which the habit is due.
    #[must_use]
    pub fn due_days(&self, days: &[NaiveDate]) -> Vec<NaiveDate> {
        days.iter().copied().filter(|d| self.is_due_on(*d)).collect()
    }
}

/// Parse a comma separated list of weekday indices or names.
///
/// `"1,3,5"` and `"mon,wed,fri"` are equivalent.
///
/// # Errors
///
/// Returns [`crate::HabitError::InvalidInput`] for unknown entries.
pub fn parse_day_list(input: &str) -> Result<Vec<u8>, crate::HabitError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|part| {
            if let Ok(index) = part.parse::<u8>() {
                return Ok(index);
            }
            crate::core::date::weekday_from_name(&part.to_lowercase())
                .and_then(|w| u8::try_from(w.num_days_from_sunday()).ok())
                .ok_or_else(|| crate::HabitError::invalid(format!("unknown day '{part}'")))
        })
        .collect()
}
