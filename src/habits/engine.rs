//! Streak and completion-rate calculations.
//!
//! All functions here are pure: they take a log and the notional current day
//! and return numbers. They never fail on a well-formed log; dates are
//! validated before they ever reach a [`HabitLog`].

use chrono::NaiveDate;

use super::types::{DerivedStats, HabitLog, Status};

/// Which notion of adjacency the longest streak uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LongestStreakRule {
    /// Consecutive *logged* entries, ignoring calendar gaps between them.
    #[default]
    LoggedEntries,
    /// Consecutive calendar days; a gap in the log ends the run.
    CalendarDays,
}

/// Consecutive completed days ending at `today`, never counting a day
/// before `start_date`.
///
/// There is no carry-over: if `today` itself is not completed the streak is 0.
#[must_use]
pub fn current_streak(log: &HabitLog, start_date: NaiveDate, today: NaiveDate) -> u32 {
    if log.is_empty() {
        return 0;
    }

    let mut streak = 0;
    let mut day = today;
    while day >= start_date && log.get(day) == Some(Status::Completed) {
        streak += 1;
        match day.pred_opt() {
            Some(prev) => day = prev,
            None => break,
        }
    }
    streak
}

/// Longest run of consecutive `completed` entries in the log.
///
/// Entries are scanned in date order and any non-completed status resets the
/// run. Untracked days between two entries do not: a habit completed on the
/// 1st and the 5th with nothing logged in between has a longest streak of 2.
/// The start date plays no part.
#[must_use]
pub fn longest_streak(log: &HabitLog) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    for status in log.statuses() {
        if status == Status::Completed {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    longest
}

/// Longest run of completed entries on consecutive calendar days.
#[must_use]
pub fn longest_calendar_streak(log: &HabitLog) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut prev: Option<NaiveDate> = None;

    for (date, status) in log.iter() {
        if status != Status::Completed {
            run = 0;
            prev = None;
            continue;
        }
        run = match prev {
            Some(p) if p.succ_opt() == Some(date) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(date);
    }
    longest
}

/// Percentage of logged days that are `completed`, rounded half up.
///
/// Every entry counts towards the denominator, whatever its status. An empty
/// log has a rate of 0.
#[must_use]
pub fn completion_rate(log: &HabitLog) -> u8 {
    rounded_percent(log.count(Status::Completed), log.len())
}

/// `part / whole` as a whole percentage, rounded half up. 0 when `whole` is 0.
#[must_use]
pub fn rounded_percent(part: usize, whole: usize) -> u8 {
    if whole == 0 {
        return 0;
    }
    let rate = (200 * part + whole) / (2 * whole);
    u8::try_from(rate.min(100)).unwrap_or(100)
}

/// All derived statistics, using the list-scan longest streak.
#[must_use]
pub fn compute_stats(log: &HabitLog, start_date: NaiveDate, today: NaiveDate) -> DerivedStats {
    compute_stats_with(log, start_date, today, LongestStreakRule::LoggedEntries)
}

/// All derived statistics with an explicit longest-streak rule.
#[must_use]
pub fn compute_stats_with(
    log: &HabitLog,
    start_date: NaiveDate,
    today: NaiveDate,
    rule: LongestStreakRule,
) -> DerivedStats {
    let longest_streak = match rule {
        LongestStreakRule::LoggedEntries => longest_streak(log),
        LongestStreakRule::CalendarDays => longest_calendar_streak(log),
    };
    DerivedStats {
        current_streak: current_streak(log, start_date, today),
        longest_streak,
        completion_rate: completion_rate(log),
    }
}

/// Toggle or set the status of one day, returning the new log.
///
/// With an explicit status the entry is set to it. Without one this is a
/// two-state toggle: a completed day becomes untracked, anything else
/// (untracked, missed, skipped) becomes completed.
#[must_use]
pub fn toggle_status(log: &HabitLog, date: NaiveDate, explicit: Option<Status>) -> HabitLog {
    let mut updated = log.clone();
    match explicit {
        Some(status) => {
            updated.set(date, status);
        },
        None if log.get(date) == Some(Status::Completed) => {
            updated.remove(date);
        },
        None => {
            updated.set(date, Status::Completed);
        },
    }
    updated
}

/// Return a day to untracked, whatever its current status.
#[must_use]
pub fn clear_status(log: &HabitLog, date: NaiveDate) -> HabitLog {
    let mut updated = log.clone();
    updated.remove(date);
    updated
}
