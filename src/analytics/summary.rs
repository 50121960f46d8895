//! Dashboard summary across all of a user's habits.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::TimeRange;
use crate::core::date::trailing_days;
use crate::habits::{rounded_percent, HabitWithStats, Status};

/// The habit with the best completion rate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BestHabit {
    /// Habit id.
    pub id: String,
    /// Habit name.
    pub name: String,
    /// Its completion rate.
    pub completion_rate: u8,
}

/// Completion over the configured recent window, counting due days only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentWindow {
    /// Window length in days, ending today.
    pub days: usize,
    /// Habit-days on which a habit was due.
    pub due: usize,
    /// Due habit-days that were completed.
    pub completed: usize,
    /// `completed / due` as a percentage.
    pub rate: u8,
}

/// Aggregate statistics for the analytics dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Number of habits.
    pub total_habits: usize,
    /// Completed entries over all entries, across habits.
    pub completion_rate: u8,
    /// Highest completion rate; the earliest habit wins ties.
    pub best_habit: Option<BestHabit>,
    /// Log entries across habits.
    pub total_entries: usize,
    /// Distinct dates with at least one entry.
    pub tracked_days: usize,
    /// Longest streak of any habit.
    pub longest_streak: u32,
    /// Habits whose current streak is at least one day.
    pub active_streaks: usize,
    /// Recent-window completion.
    pub recent: RecentWindow,
}

impl Summary {
    /// Summarize `habits` as of `today`.
    #[must_use]
    pub fn calculate(habits: &[HabitWithStats], today: NaiveDate, range: TimeRange) -> Self {
        let total_entries: usize = habits.iter().map(|h| h.logs.len()).sum();
        let completed_entries: usize = habits
            .iter()
            .map(|h| h.logs.count(Status::Completed))
            .sum();

        let tracked_days = habits
            .iter()
            .flat_map(|h| h.logs.dates())
            .collect::<BTreeSet<_>>()
            .len();

        let best_habit = habits
            .iter()
            .fold(None::<&HabitWithStats>, |best, h| match best {
                Some(b) if h.stats.completion_rate <= b.stats.completion_rate => Some(b),
                _ => Some(h),
            })
            .map(|h| BestHabit {
                id: h.habit.id.clone(),
                name: h.habit.name.clone(),
                completion_rate: h.stats.completion_rate,
            });

        Self {
            total_habits: habits.len(),
            completion_rate: rounded_percent(completed_entries, total_entries),
            best_habit,
            total_entries,
            tracked_days,
            longest_streak: habits
                .iter()
                .map(|h| h.stats.longest_streak)
                .max()
                .unwrap_or(0),
            active_streaks: habits.iter().filter(|h| h.stats.current_streak >= 1).count(),
            recent: RecentWindow::calculate(habits, today, range),
        }
    }
}

impl RecentWindow {
    /// Completion of due days over the `range` ending at `today`.
    #[must_use]
    pub fn calculate(habits: &[HabitWithStats], today: NaiveDate, range: TimeRange) -> Self {
        let days = trailing_days(today, range.days());
        let mut due = 0;
        let mut completed = 0;

        for item in habits {
            for day in item.habit.due_days(&days) {
                due += 1;
                if item.logs.get(day) == Some(Status::Completed) {
                    completed += 1;
                }
            }
        }

        Self {
            days: days.len(),
            due,
            completed,
            rate: rounded_percent(completed, due),
        }
    }
}

/// Completed entries per day over `days`, for sparklines.
#[must_use]
pub fn daily_completions(habits: &[HabitWithStats], days: &[NaiveDate]) -> Vec<usize> {
    days.iter()
        .map(|day| {
            habits
                .iter()
                .filter(|h| h.logs.get(*day) == Some(Status::Completed))
                .count()
        })
        .collect()
}
