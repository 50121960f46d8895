//! Command implementations for habitvault.
//!
//! Each command takes the habit store plus its parsed arguments and returns
//! the text to print.

mod config;
mod habit;
mod log;
mod shell;
mod transfer;
mod views;

pub use config::config;
pub use habit::{add, delete, edit, list, show};
pub use log::{clear, mark, status, toggle};
pub use shell::{completion_install_instructions, completions, generate_completions};
pub use transfer::{export, import};
pub use views::{calendar, stats, week};

use chrono::NaiveDate;

use crate::core::parse_date_input;
use crate::error::HabitError;
use crate::habits::{parse_day_list, Schedule, Target};

/// Resolve an optional `DATE` argument against `today`.
///
/// # Errors
///
/// Returns [`HabitError::InvalidDate`] if the input cannot be parsed.
pub fn resolve_date(input: Option<&str>, today: NaiveDate) -> Result<NaiveDate, HabitError> {
    input.map_or(Ok(today), |s| parse_date_input(s, today))
}

/// Build a schedule from `--target` and `--days`.
fn schedule_from_args(target: Target, days: Option<&str>) -> Result<Schedule, HabitError> {
    let days = days.map(parse_day_list).transpose()?;
    Schedule::from_parts(target, days)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_resolve_date() {
        let today = date("2024-01-03");
        assert_eq!(resolve_date(None, today).unwrap(), today);
        assert_eq!(resolve_date(Some("yesterday"), today).unwrap(), date("2024-01-02"));
        assert_eq!(resolve_date(Some("-2d"), today).unwrap(), date("2024-01-01"));
        assert!(matches!(
            resolve_date(Some("someday"), today),
            Err(HabitError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_schedule_from_args() {
        assert_eq!(schedule_from_args(Target::Daily, None).unwrap(), Schedule::Daily);
        assert_eq!(
            schedule_from_args(Target::Custom, Some("mon,wed")).unwrap(),
            Schedule::custom([1, 3]).unwrap()
        );
        assert!(schedule_from_args(Target::Custom, None).is_err());
        assert!(schedule_from_args(Target::Custom, Some("funday")).is_err());
    }
}
