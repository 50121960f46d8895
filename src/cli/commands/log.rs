//! Commands that read or change a habit's log.

use super::resolve_date;
use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::HabitError;
use crate::habits::{HabitStore, Status};
use crate::output::format_status;
use crate::storage::RecordStore;

/// Execute toggle command: untracked, missed or skipped becomes completed,
/// completed becomes untracked.
///
/// # Errors
///
/// Returns an error if the habit or date cannot be resolved, or saving fails.
pub fn toggle<S: RecordStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    habit: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let day = resolve_date(date, store.today())?;
    let id = store.resolve(habit)?.habit.id.clone();
    let item = store.toggle_status(&id, day, None)?;
    format_status(&item, day, format)
}

/// Execute mark command
///
/// # Errors
///
/// Returns an error if the habit, status or date cannot be resolved, or
/// saving fails.
pub fn mark<S: RecordStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    habit: &str,
    status: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let status: Status = status.parse()?;
    let day = resolve_date(date, store.today())?;
    let id = store.resolve(habit)?.habit.id.clone();
    let item = store.toggle_status(&id, day, Some(status))?;
    format_status(&item, day, format)
}

/// Execute clear command
///
/// # Errors
///
/// Returns an error if the habit or date cannot be resolved, or saving fails.
pub fn clear<S: RecordStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    habit: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let day = resolve_date(date, store.today())?;
    let id = store.resolve(habit)?.habit.id.clone();
    let item = store.clear_status(&id, day)?;
    format_status(&item, day, format)
}

/// Execute status command
///
/// # Errors
///
/// Returns an error if the habit or date cannot be resolved.
pub fn status<S: RecordStore, C: Clock>(
    store: &HabitStore<S, C>,
    habit: &str,
    date: Option<&str>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let day = resolve_date(date, store.today())?;
    let item = store.resolve(habit)?;
    format_status(item, day, format)
}
