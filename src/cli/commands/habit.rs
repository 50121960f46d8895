//! Habit management commands.

use serde_json::json;

use super::{resolve_date, schedule_from_args};
use crate::cli::args::{AddArgs, EditArgs, OutputFormat};
use crate::core::Clock;
use crate::error::HabitError;
use crate::habits::{HabitStore, HabitUpdate, NewHabit, Schedule, Target};
use crate::output::{
    format_created_pretty, format_deleted_pretty, format_habit, format_habit_json, format_habits,
    to_json,
};
use crate::storage::RecordStore;

/// Execute add command
///
/// # Errors
///
/// Returns an error if the arguments are invalid or the habit cannot be saved.
pub fn add<S: RecordStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    args: &AddArgs,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let today = store.today();
    let schedule = schedule_from_args(args.target, args.days.as_deref())?;
    let start_date = args
        .start
        .as_deref()
        .map(|s| resolve_date(Some(s), today))
        .transpose()?;

    let item = store.add_habit(NewHabit {
        name: args.name.clone(),
        schedule,
        start_date,
    })?;

    match format {
        OutputFormat::Pretty => Ok(format_created_pretty(&item)),
        OutputFormat::Json => format_habit_json(&item),
    }
}

/// Execute list command
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn list<S: RecordStore, C: Clock>(
    store: &HabitStore<S, C>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    format_habits(store.habits(), store.today(), format)
}

/// Execute show command
///
/// # Errors
///
/// Returns an error if the habit cannot be found or output formatting fails.
pub fn show<S: RecordStore, C: Clock>(
    store: &HabitStore<S, C>,
    habit: &str,
    heatmap_days: usize,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let item = store.resolve(habit)?;
    format_habit(item, store.today(), heatmap_days, format)
}

/// Execute edit command
///
/// `--days` alone switches the habit to a custom target; `--target custom`
/// alone keeps the habit's current custom days.
///
/// # Errors
///
/// Returns an error if the habit cannot be found, nothing would change, or
/// the new values are invalid.
pub fn edit<S: RecordStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    args: &EditArgs,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let today = store.today();
    let current = store.resolve(&args.habit)?;
    let id = current.habit.id.clone();

    let schedule = match (args.target, args.days.as_deref()) {
        (None, None) => None,
        (target, Some(days)) => Some(schedule_from_args(target.unwrap_or(Target::Custom), Some(days))?),
        (Some(Target::Custom), None) => match current.habit.schedule.target_days() {
            Some(days) => Some(Schedule::custom(days)?),
            None => return Err(HabitError::invalid("--target custom needs --days")),
        },
        (Some(target), None) => Some(schedule_from_args(target, None)?),
    };

    let update = HabitUpdate {
        name: args.name.clone(),
        schedule,
        start_date: args
            .start
            .as_deref()
            .map(|s| resolve_date(Some(s), today))
            .transpose()?,
    };
    if update.is_empty() {
        return Err(HabitError::invalid(
            "nothing to change: pass --name, --target, --days or --start",
        ));
    }

    let item = store.update_habit(&id, update)?;
    format_habit(&item, today, 0, format)
}

/// Execute delete command
///
/// # Errors
///
/// Returns an error if the habit cannot be found or cannot be removed.
pub fn delete<S: RecordStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    habit: &str,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let id = store.resolve(habit)?.habit.id.clone();
    let removed = store.delete_habit(&id)?;

    match format {
        OutputFormat::Pretty => Ok(format_deleted_pretty(&removed)),
        OutputFormat::Json => to_json(&json!({ "deleted": removed })),
    }
}
