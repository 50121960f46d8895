//! Habits, their logs and the streak engine.
//!
//! - [`types`]: habit records, logs and statuses
//! - [`engine`]: pure streak and completion-rate calculations
//! - [`schedule`]: which days a habit is due
//! - [`store`]: the per-user habit store backed by a record store

pub mod engine;
pub mod schedule;
pub mod store;
pub mod types;

pub use engine::{
    clear_status, completion_rate, compute_stats, compute_stats_with, current_streak,
    longest_calendar_streak, longest_streak, rounded_percent, toggle_status, LongestStreakRule,
};
pub use schedule::{parse_day_list, DAY_NAMES};
pub use store::{HabitStore, ImportReport, VaultExport, EXPORT_VERSION};
pub use types::{
    validate_name, DerivedStats, Habit, HabitLog, HabitUpdate, HabitWithStats, NewHabit,
    Schedule, Status, Target,
};
