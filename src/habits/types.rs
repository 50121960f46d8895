//! Habit records and their logs.

use std::collections::btree_map;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::date::{format_date, parse_start_date};
use crate::error::HabitError;

/// Recorded status of a single day.
///
/// "Untracked" is not a variant: it is the absence of an entry in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The habit was done.
    Completed,
    /// The habit was due but not done.
    Missed,
    /// The day was deliberately skipped.
    Skipped,
}

impl Status {
    /// Lowercase name as stored.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Missed => "missed",
            Self::Skipped => "skipped",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = HabitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "completed" | "complete" | "done" => Ok(Self::Completed),
            "missed" | "miss" => Ok(Self::Missed),
            "skipped" | "skip" => Ok(Self::Skipped),
            other => Err(HabitError::invalid(format!(
                "unknown status '{other}' (expected completed, missed or skipped)"
            ))),
        }
    }
}

/// Sparse per-day record of a habit.
///
/// Keys are calendar dates, so iteration is chronological. Serializes as a
/// JSON object keyed by `yyyy-MM-dd`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HabitLog(BTreeMap<NaiveDate, Status>);

impl HabitLog {
    /// An empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status recorded for `date`, if any.
    #[must_use]
    pub fn get(&self, date: NaiveDate) -> Option<Status> {
        self.0.get(&date).copied()
    }

    /// Record `status` for `date`, returning the previous entry.
    pub fn set(&mut self, date: NaiveDate, status: Status) -> Option<Status> {
        self.0.insert(date, status)
    }

    /// Remove the entry for `date`, returning it.
    pub fn remove(&mut self, date: NaiveDate) -> Option<Status> {
        self.0.remove(&date)
    }

    /// Number of logged days.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether nothing has been logged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in chronological order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (NaiveDate, Status)> + '_ {
        self.0.iter().map(|(date, status)| (*date, *status))
    }

    /// Statuses in chronological order.
    pub fn statuses(&self) -> impl DoubleEndedIterator<Item = Status> + '_ {
        self.0.values().copied()
    }

    /// Number of entries with the given status.
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.0.values().filter(|s| **s == status).count()
    }

    /// Logged dates in chronological order.
    pub fn dates(&self) -> impl DoubleEndedIterator<Item = NaiveDate> + '_ {
        self.0.keys().copied()
    }
}

impl FromIterator<(NaiveDate, Status)> for HabitLog {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, Status)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for HabitLog {
    type Item = (NaiveDate, Status);
    type IntoIter = btree_map::IntoIter<NaiveDate, Status>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Recurrence target of a habit.
///
/// Custom day indices run 0 = Sunday through 6 = Saturday.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Every day.
    #[default]
    Daily,
    /// Monday through Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekends,
    /// A chosen, non-empty set of weekdays.
    Custom(BTreeSet<u8>),
}

impl Schedule {
    /// Build a custom schedule, validating the day indices.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::InvalidInput`] if `days` is empty or contains an
    /// index above 6.
    pub fn custom(days: impl IntoIterator<Item = u8>) -> Result<Self, HabitError> {
        let days: BTreeSet<u8> = days.into_iter().collect();
        if days.is_empty() {
            return Err(HabitError::invalid("custom schedule needs at least one day"));
        }
        if let Some(bad) = days.iter().find(|d| **d > 6) {
            return Err(HabitError::invalid(format!(
                "day index {bad} out of range (0 = Sunday .. 6 = Saturday)"
            )));
        }
        Ok(Self::Custom(days))
    }

    /// Build a schedule from a target name and optional custom days.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::InvalidInput`] for unknown targets, days given
    /// for a non-custom target, or invalid custom days.
    pub fn from_parts(target: Target, days: Option<Vec<u8>>) -> Result<Self, HabitError> {
        match (target, days) {
            (Target::Custom, Some(days)) => Self::custom(days),
            (Target::Custom, None) => Err(HabitError::invalid(
                "custom schedule needs at least one day",
            )),
            (_, Some(days)) if !days.is_empty() => Err(HabitError::invalid(format!(
                "target days are only allowed for custom schedules, not '{target}'"
            ))),
            (Target::Daily, _) => Ok(Self::Daily),
            (Target::Weekdays, _) => Ok(Self::Weekdays),
            (Target::Weekends, _) => Ok(Self::Weekends),
        }
    }

    /// The target kind without its days.
    #[must_use]
    pub const fn target(&self) -> Target {
        match self {
            Self::Daily => Target::Daily,
            Self::Weekdays => Target::Weekdays,
            Self::Weekends => Target::Weekends,
            Self::Custom(_) => Target::Custom,
        }
    }

    /// Custom days, present only for [`Schedule::Custom`].
    #[must_use]
    pub fn target_days(&self) -> Option<Vec<u8>> {
        match self {
            Self::Custom(days) => Some(days.iter().copied().collect()),
            _ => None,
        }
    }
}

/// Recurrence target name, as stored and typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Every day.
    Daily,
    /// Monday through Friday.
    Weekdays,
    /// Saturday and Sunday.
    Weekends,
    /// Chosen weekdays.
    Custom,
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Daily => "daily",
            Self::Weekdays => "weekdays",
            Self::Weekends => "weekends",
            Self::Custom => "custom",
        })
    }
}

/// A tracked habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HabitRecord", into = "HabitRecord")]
pub struct Habit {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Recurrence target.
    pub schedule: Schedule,
    /// First day that counts towards the current streak.
    pub start_date: NaiveDate,
    /// When the habit was created.
    pub created_at: DateTime<Utc>,
    /// Owning user.
    pub user_id: String,
}

/// Flat, storage-facing shape of a [`Habit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HabitRecord {
    id: String,
    name: String,
    target: Target,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target_days: Option<Vec<u8>>,
    start_date: String,
    created_at: DateTime<Utc>,
    user_id: String,
}

impl TryFrom<HabitRecord> for Habit {
    type Error = HabitError;

    fn try_from(record: HabitRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            schedule: Schedule::from_parts(record.target, record.target_days)?,
            start_date: parse_start_date(&record.start_date)?,
            id: record.id,
            name: record.name,
            created_at: record.created_at,
            user_id: record.user_id,
        })
    }
}

impl From<Habit> for HabitRecord {
    fn from(habit: Habit) -> Self {
        Self {
            target: habit.schedule.target(),
            target_days: habit.schedule.target_days(),
            start_date: format_date(habit.start_date),
            id: habit.id,
            name: habit.name,
            created_at: habit.created_at,
            user_id: habit.user_id,
        }
    }
}

/// Statistics derived from a habit's log. Never stored, always recomputed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DerivedStats {
    /// Consecutive completed days ending today.
    pub current_streak: u32,
    /// Longest run of completed entries in the log.
    pub longest_streak: u32,
    /// Percentage of logged days that were completed (0-100).
    pub completion_rate: u8,
}

/// A habit together with its log and derived statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitWithStats {
    /// The habit itself.
    #[serde(flatten)]
    pub habit: Habit,
    /// Per-day log.
    #[serde(default)]
    pub logs: HabitLog,
    /// Derived statistics.
    #[serde(flatten)]
    pub stats: DerivedStats,
}

/// Input for creating a habit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHabit {
    /// Display name.
    pub name: String,
    /// Recurrence target.
    pub schedule: Schedule,
    /// Start date; defaults to today when absent.
    pub start_date: Option<NaiveDate>,
}

impl NewHabit {
    /// A daily habit starting today.
    pub fn daily(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schedule: Schedule::Daily,
            start_date: None,
        }
    }

    /// Set the schedule.
    #[must_use]
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Set the start date.
    #[must_use]
    pub const fn starting(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }
}

/// Partial update of a habit. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitUpdate {
    /// New name.
    pub name: Option<String>,
    /// New recurrence target.
    pub schedule: Option<Schedule>,
    /// New start date.
    pub start_date: Option<NaiveDate>,
}

impl HabitUpdate {
    /// Whether the update changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.schedule.is_none() && self.start_date.is_none()
    }
}

/// Trim a habit name and reject blank ones.
///
/// # Errors
///
/// Returns [`HabitError::InvalidInput`] if the name is empty after trimming.
pub fn validate_name(name: &str) -> Result<String, HabitError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(HabitError::invalid("habit name is required"));
    }
    Ok(trimmed.to_string())
}
