//! Output formatting for habitvault.
//!
//! Every command renders either colored terminal text or pretty-printed JSON.

mod json;
mod pretty;

use chrono::NaiveDate;

use crate::analytics::{Quote, Summary};
use crate::cli::args::OutputFormat;
use crate::error::HabitError;
use crate::habits::HabitWithStats;

pub use json::*;
pub use pretty::*;

/// Format the habit list based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habits(
    habits: &[HabitWithStats],
    today: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habits_pretty(habits, today)),
        OutputFormat::Json => format_habits_json(habits, today),
    }
}

/// Format a single habit based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_habit(
    item: &HabitWithStats,
    today: NaiveDate,
    heatmap_days: usize,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_habit_pretty(item, today, heatmap_days)),
        OutputFormat::Json => format_habit_json(item),
    }
}

/// Format one day's entry based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_status(
    item: &HabitWithStats,
    day: NaiveDate,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_status_pretty(item, day)),
        OutputFormat::Json => format_status_json(item, day),
    }
}

/// Format the analytics dashboard based on output format
///
/// # Errors
///
/// Returns `HabitError::Parse` if JSON serialization fails.
pub fn format_summary(
    summary: &Summary,
    habits: &[HabitWithStats],
    today: NaiveDate,
    quote: Option<&Quote>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match format {
        OutputFormat::Pretty => Ok(format_summary_pretty(summary, habits, today, quote)),
        OutputFormat::Json => format_summary_json(summary, quote),
    }
}
