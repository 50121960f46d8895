//! Calendar views and the analytics dashboard.

use chrono::{Datelike, NaiveDate};
use colored::Colorize;
use serde::Serialize;

use super::resolve_date;
use crate::analytics::{
    daily_quote, render_month_calendar, render_week, Summary, HEATMAP_LEGEND,
};
use crate::cli::args::OutputFormat;
use crate::config::TimeRange;
use crate::core::date::{parse_month, same_month, start_of_month, start_of_week, week_days};
use crate::core::{Clock, WeekStart};
use crate::error::HabitError;
use crate::habits::{HabitStore, HabitWithStats, Status};
use crate::output::{format_summary, to_json};
use crate::storage::RecordStore;

/// One day of a habit in a calendar view.
#[derive(Debug, Serialize)]
struct DayEntry {
    date: NaiveDate,
    status: Option<Status>,
    due: bool,
}

/// A habit's days in a calendar view.
#[derive(Debug, Serialize)]
struct HabitDays<'a> {
    id: &'a str,
    name: &'a str,
    days: Vec<DayEntry>,
}

impl<'a> HabitDays<'a> {
    fn new(item: &'a HabitWithStats, days: &[NaiveDate]) -> Self {
        Self {
            id: &item.habit.id,
            name: &item.habit.name,
            days: days
                .iter()
                .map(|day| DayEntry {
                    date: *day,
                    status: item.logs.get(*day),
                    due: item.habit.is_due_on(*day),
                })
                .collect(),
        }
    }
}

/// Execute week command
///
/// # Errors
///
/// Returns an error if the habit or date cannot be resolved, or output
/// formatting fails.
pub fn week<S: RecordStore, C: Clock>(
    store: &HabitStore<S, C>,
    habit: Option<&str>,
    of: Option<&str>,
    week_start: WeekStart,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let day = resolve_date(of, store.today())?;
    let habits: Vec<HabitWithStats> = match habit {
        Some(query) => vec![store.resolve(query)?.clone()],
        None => store.habits().to_vec(),
    };
    let start = start_of_week(day, week_start);

    match format {
        OutputFormat::Json => {
            let days = week_days(day, week_start);
            let items: Vec<HabitDays<'_>> = habits.iter().map(|h| HabitDays::new(h, &days)).collect();
            to_json(&serde_json::json!({
                "weekStart": start,
                "habits": items
            }))
        },
        OutputFormat::Pretty => {
            if habits.is_empty() {
                return Ok(format!("Week of {start}\n  No habits"));
            }
            Ok(format!(
                "{}\n{}\n\n{}",
                format!("Week of {start}").bold(),
                render_week(&habits, day, week_start),
                HEATMAP_LEGEND.dimmed()
            ))
        },
    }
}

/// Execute calendar command
///
/// # Errors
///
/// Returns an error if the habit or month cannot be resolved, or output
/// formatting fails.
pub fn calendar<S: RecordStore, C: Clock>(
    store: &HabitStore<S, C>,
    habit: &str,
    month: Option<&str>,
    week_start: WeekStart,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let today = store.today();
    let month = month.map_or_else(|| Ok(start_of_month(today)), parse_month)?;
    let item = store.resolve(habit)?;

    match format {
        OutputFormat::Json => {
            let days: Vec<NaiveDate> = month
                .iter_days()
                .take_while(|d| same_month(*d, month))
                .collect();
            let mut value = serde_json::to_value(HabitDays::new(item, &days))?;
            if let Some(map) = value.as_object_mut() {
                map.insert(
                    "month".to_string(),
                    format!("{:04}-{:02}", month.year(), month.month()).into(),
                );
            }
            to_json(&value)
        },
        OutputFormat::Pretty => Ok(format!(
            "{}\n{}\n\n{}",
            item.habit.name.bold(),
            render_month_calendar(&item.logs, month, today, week_start),
            HEATMAP_LEGEND.dimmed()
        )),
    }
}

/// Execute stats command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn stats<S: RecordStore, C: Clock>(
    store: &HabitStore<S, C>,
    range: TimeRange,
    show_quote: bool,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let today = store.today();
    let summary = Summary::calculate(store.habits(), today, range);
    let quote = show_quote.then(|| daily_quote(today));
    format_summary(&summary, store.habits(), today, quote.as_ref(), format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::habits::{NewHabit, Schedule};
    use crate::storage::SqliteStore;
    use serde_json::Value;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn seeded(records: &SqliteStore) -> HabitStore<&SqliteStore, FixedClock> {
        let mut store = HabitStore::open(records, FixedClock(date("2024-01-03")), "local").unwrap();
        let read = store
            .add_habit(NewHabit::daily("Read").starting(date("2024-01-01")))
            .unwrap()
            .habit
            .id;
        store
            .add_habit(
                NewHabit::daily("Yoga")
                    .with_schedule(Schedule::Weekends)
                    .starting(date("2024-01-01")),
            )
            .unwrap();
        store.toggle_status(&read, date("2024-01-02"), None).unwrap();
        store.toggle_status(&read, date("2024-01-03"), None).unwrap();
        store
    }

    #[test]
    fn test_week_json() {
        let records = SqliteStore::open_in_memory().unwrap();
        let store = seeded(&records);

        let output = week(&store, None, None, WeekStart::Monday, OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["weekStart"], "2024-01-01");
        assert_eq!(value["habits"].as_array().unwrap().len(), 2);

        let read_days = &value["habits"][0]["days"];
        assert_eq!(read_days.as_array().unwrap().len(), 7);
        assert_eq!(read_days[1]["status"], "completed");
        assert!(read_days[0]["status"].is_null());

        let yoga_days = &value["habits"][1]["days"];
        assert_eq!(yoga_days[0]["due"], false);
        assert_eq!(yoga_days[5]["due"], true);
    }

    #[test]
    fn test_week_single_habit_pretty() {
        let records = SqliteStore::open_in_memory().unwrap();
        let store = seeded(&records);

        let output = week(&store, Some("yoga"), Some("2024-01-10"), WeekStart::Sunday, OutputFormat::Pretty)
            .unwrap();
        assert!(output.contains("Week of 2024-01-07"));
        assert!(output.contains("Yoga"));
        assert!(!output.contains("Read"));
    }

    #[test]
    fn test_calendar() {
        let records = SqliteStore::open_in_memory().unwrap();
        let store = seeded(&records);

        let output = calendar(&store, "Read", None, WeekStart::Sunday, OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["month"], "2024-01");
        assert_eq!(value["days"].as_array().unwrap().len(), 31);
        assert_eq!(value["days"][2]["status"], "completed");

        let output = calendar(&store, "Read", Some("2024-02"), WeekStart::Sunday, OutputFormat::Pretty)
            .unwrap();
        assert!(output.contains("February 2024"));

        assert!(matches!(
            calendar(&store, "Read", Some("2024-13"), WeekStart::Sunday, OutputFormat::Pretty),
            Err(HabitError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_stats() {
        let records = SqliteStore::open_in_memory().unwrap();
        let store = seeded(&records);

        let output = stats(&store, TimeRange::Week, false, OutputFormat::Json).unwrap();
        let value: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["totalHabits"], 2);
        assert_eq!(value["totalEntries"], 2);
        assert_eq!(value["completionRate"], 100);
        assert_eq!(value["activeStreaks"], 1);
        assert_eq!(value["bestHabit"]["name"], "Read");
        assert!(value.get("quote").is_none());

        let output = stats(&store, TimeRange::Week, true, OutputFormat::Pretty).unwrap();
        assert!(output.contains(daily_quote(date("2024-01-03")).author));
    }
}
