//! JSON output formatting for habitvault.
//!
//! Habit objects use the same camelCase shape as stored and exported records.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::json;

use crate::analytics::{Quote, Summary};
use crate::error::HabitError;
use crate::habits::HabitWithStats;

/// Format the habit list as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habits_json(habits: &[HabitWithStats], today: NaiveDate) -> Result<String, HabitError> {
    let output = json!({
        "today": today,
        "count": habits.len(),
        "items": habits
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single habit as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit_json(item: &HabitWithStats) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(item)?)
}

/// Format one day's entry as JSON. Untracked days have a `null` status.
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_status_json(item: &HabitWithStats, day: NaiveDate) -> Result<String, HabitError> {
    let output = json!({
        "id": item.habit.id,
        "name": item.habit.name,
        "date": day,
        "status": item.logs.get(day),
        "due": item.habit.is_due_on(day),
        "currentStreak": item.stats.current_streak,
        "longestStreak": item.stats.longest_streak,
        "completionRate": item.stats.completion_rate
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format the analytics summary as JSON
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_summary_json(summary: &Summary, quote: Option<&Quote>) -> Result<String, HabitError> {
    let mut output = serde_json::to_value(summary)?;
    if let (Some(map), Some(quote)) = (output.as_object_mut(), quote) {
        map.insert("quote".to_string(), serde_json::to_value(quote)?);
    }
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, HabitError> {
    Ok(serde_json::to_string_pretty(value)?)
}
