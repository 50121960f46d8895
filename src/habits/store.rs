//! The habit store.
//!
//! Owns one user's habits, recomputes derived statistics after every
//! mutation and mirrors the habit list and each log to a [`RecordStore`].
//! A mutation is persisted before it is applied in memory, so a failed save
//! leaves the store unchanged. Logs are written before the habit list: a log
//! without a listed habit is ignored on load, while a listed habit without
//! its log would lose its history.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::engine::{self, LongestStreakRule};
use super::types::{
    validate_name, DerivedStats, Habit, HabitLog, HabitUpdate, HabitWithStats, NewHabit, Status,
};
use crate::core::Clock;
use crate::error::HabitError;
use crate::storage::{habits_key, logs_key, Record, RecordStore};

/// Shortest id prefix accepted by [`HabitStore::resolve`].
pub const MIN_ID_PREFIX: usize = 4;

/// Version written to [`VaultExport::version`].
pub const EXPORT_VERSION: u32 = 1;

/// A portable dump of one user's habits with their logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultExport {
    /// Format version.
    pub version: u32,
    /// Owner at export time.
    pub user_id: String,
    /// When the export was taken.
    pub exported_at: DateTime<Utc>,
    /// Habits with logs and statistics.
    pub habits: Vec<HabitWithStats>,
}

impl VaultExport {
    /// Parse an export document, or a bare array of habits.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::Parse`] if the text is neither shape, and
    /// [`HabitError::InvalidInput`] for an unsupported version.
    pub fn parse(text: &str) -> Result<Vec<HabitWithStats>, HabitError> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Document {
            Export(VaultExport),
            Bare(Vec<HabitWithStats>),
        }

        match serde_json::from_str::<Document>(text) {
            Ok(Document::Export(export)) if export.version > EXPORT_VERSION => Err(HabitError::invalid(
                format!("unsupported export version {}", export.version),
            )),
            Ok(Document::Export(export)) => Ok(export.habits),
            Ok(Document::Bare(habits)) => Ok(habits),
            Err(_) => {
                // Re-parse as the full document to surface a useful message.
                let export: VaultExport = serde_json::from_str(text)?;
                Ok(export.habits)
            },
        }
    }
}

/// Outcome of [`HabitStore::import`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Habits that did not exist before.
    pub added: usize,
    /// Existing habits whose record and log were replaced.
    pub replaced: usize,
}

/// One user's habits, backed by a record store.
pub struct HabitStore<S, C> {
    records: S,
    clock: C,
    user_id: String,
    rule: LongestStreakRule,
    habits: Vec<HabitWithStats>,
    computed_on: Option<NaiveDate>,
}

impl<S: RecordStore, C: Clock> HabitStore<S, C> {
    /// Load `user_id`'s habits and logs and compute their statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if a record cannot be read or is corrupt.
    pub fn open(records: S, clock: C, user_id: impl Into<String>) -> Result<Self, HabitError> {
        let user_id = user_id.into();
        let list: Vec<Habit> = load_record(&records, &habits_key(&user_id))?.unwrap_or_default();

        let mut habits = Vec::with_capacity(list.len());
        for habit in list {
            let logs: HabitLog = load_record(&records, &logs_key(&habit.id))?.unwrap_or_default();
            habits.push(HabitWithStats {
                habit,
                logs,
                stats: Default::default(),
            });
        }

        let mut store = Self {
            records,
            clock,
            user_id,
            rule: LongestStreakRule::default(),
            habits,
            computed_on: None,
        };
        store.refresh();
        tracing::debug!(user = %store.user_id, count = store.habits.len(), "loaded habits");
        Ok(store)
    }

    /// Use a different longest-streak rule and recompute.
    #[must_use]
    pub fn with_longest_streak_rule(mut self, rule: LongestStreakRule) -> Self {
        self.rule = rule;
        self.refresh();
        self
    }

    /// The notional current day.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Owner of the habits.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// All habits in creation order.
    #[must_use]
    pub fn habits(&self) -> &[HabitWithStats] {
        &self.habits
    }

    /// Look up a habit by exact id.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::NotFound`] if no habit has that id.
    pub fn get(&self, id: &str) -> Result<&HabitWithStats, HabitError> {
        self.habits
            .iter()
            .find(|h| h.habit.id == id)
            .ok_or_else(|| HabitError::NotFound(id.to_string()))
    }

    /// Find a habit by id, case-insensitive name, or unique id prefix.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::NotFound`] when nothing matches and
    /// [`HabitError::Ambiguous`] when several habits do.
    pub fn resolve(&self, query: &str) -> Result<&HabitWithStats, HabitError> {
        let query = query.trim();
        if let Ok(found) = self.get(query) {
            return Ok(found);
        }

        let by_name: Vec<_> = self
            .habits
            .iter()
            .filter(|h| h.habit.name.eq_ignore_ascii_case(query))
            .collect();
        match by_name.as_slice() {
            [only] => return Ok(only),
            [] => {},
            many => {
                return Err(HabitError::Ambiguous {
                    query: query.to_string(),
                    count: many.len(),
                })
            },
        }

        if query.len() >= MIN_ID_PREFIX {
            let by_prefix: Vec<_> = self
                .habits
                .iter()
                .filter(|h| h.habit.id.starts_with(query))
                .collect();
            match by_prefix.as_slice() {
                [only] => return Ok(only),
                [] => {},
                many => {
                    return Err(HabitError::Ambiguous {
                        query: query.to_string(),
                        count: many.len(),
                    })
                },
            }
        }

        Err(HabitError::NotFound(query.to_string()))
    }

    /// Create a habit with an empty log.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is blank or taken, or if saving fails.
    pub fn add_habit(&mut self, new: NewHabit) -> Result<HabitWithStats, HabitError> {
        let name = validate_name(&new.name)?;
        self.ensure_name_free(&name, None)?;

        let habit = Habit {
            id: Uuid::new_v4().simple().to_string(),
            name,
            schedule: new.schedule,
            start_date: new.start_date.unwrap_or_else(|| self.clock.today()),
            created_at: Utc::now(),
            user_id: self.user_id.clone(),
        };
        let item = HabitWithStats {
            habit,
            logs: HabitLog::new(),
            stats: Default::default(),
        };

        let mut next = self.habits.clone();
        next.push(item.clone());
        self.save_log(&item)?;
        self.save_list(&next)?;
        self.habits = next;

        tracing::info!(id = %item.habit.id, name = %item.habit.name, "created habit");
        Ok(item)
    }

    /// Apply a partial update. The log is kept and statistics recomputed.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist, the new name is blank or
    /// taken, or saving fails.
    pub fn update_habit(&mut self, id: &str, update: HabitUpdate) -> Result<HabitWithStats, HabitError> {
        let index = self.index_of(id)?;
        let mut item = self.habits[index].clone();

        if let Some(name) = update.name {
            let name = validate_name(&name)?;
            self.ensure_name_free(&name, Some(id))?;
            item.habit.name = name;
        }
        if let Some(schedule) = update.schedule {
            item.habit.schedule = schedule;
        }
        if let Some(start_date) = update.start_date {
            item.habit.start_date = start_date;
        }
        item.stats = self.stats_for(&item.habit, &item.logs);

        let mut next = self.habits.clone();
        next[index] = item.clone();
        self.save_list(&next)?;
        self.habits = next;

        tracing::info!(id = %item.habit.id, "updated habit");
        Ok(item)
    }

    /// Delete a habit and its log.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist or saving fails.
    pub fn delete_habit(&mut self, id: &str) -> Result<Habit, HabitError> {
        let index = self.index_of(id)?;

        let mut next = self.habits.clone();
        let removed = next.remove(index);
        self.save_list(&next)?;
        self.habits = next;

        let key = logs_key(&removed.habit.id);
        if let Err(e) = self.records.remove(&key) {
            tracing::warn!(key = %key, error = %e, "habit deleted but its log was left behind");
        }

        tracing::info!(id = %removed.habit.id, name = %removed.habit.name, "deleted habit");
        Ok(removed.habit)
    }

    /// Toggle a day (or set it to `explicit`) and recompute statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist or saving fails.
    pub fn toggle_status(
        &mut self,
        id: &str,
        date: NaiveDate,
        explicit: Option<Status>,
    ) -> Result<HabitWithStats, HabitError> {
        let index = self.index_of(id)?;
        let logs = engine::toggle_status(&self.habits[index].logs, date, explicit);
        tracing::debug!(id, %date, status = ?logs.get(date), "status changed");
        self.replace_log(index, logs)
    }

    /// Return a day to untracked and recompute statistics.
    ///
    /// # Errors
    ///
    /// Returns an error if the habit does not exist or saving fails.
    pub fn clear_status(&mut self, id: &str, date: NaiveDate) -> Result<HabitWithStats, HabitError> {
        let index = self.index_of(id)?;
        let logs = engine::clear_status(&self.habits[index].logs, date);
        tracing::debug!(id, %date, "status cleared");
        self.replace_log(index, logs)
    }

    /// Status recorded for a habit on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`HabitError::NotFound`] if the habit does not exist.
    pub fn status(&self, id: &str, date: NaiveDate) -> Result<Option<Status>, HabitError> {
        Ok(self.get(id)?.logs.get(date))
    }

    /// Recompute every habit's statistics against the clock's current day.
    pub fn refresh(&mut self) {
        let today = self.clock.today();
        if let Some(previous) = self.computed_on.filter(|d| *d != today) {
            tracing::warn!(%previous, %today, "day changed since statistics were computed");
        }

        let rule = self.rule;
        for item in &mut self.habits {
            item.stats = engine::compute_stats_with(&item.logs, item.habit.start_date, today, rule);
        }
        self.computed_on = Some(today);
        tracing::debug!(%today, count = self.habits.len(), "recomputed statistics");
    }

    /// Snapshot of all habits for export.
    #[must_use]
    pub fn export(&self) -> VaultExport {
        VaultExport {
            version: EXPORT_VERSION,
            user_id: self.user_id.clone(),
            exported_at: Utc::now(),
            habits: self.habits.clone(),
        }
    }

    /// Insert habits with their logs, replacing any with the same id.
    ///
    /// Incoming statistics are ignored and recomputed; ownership is moved to
    /// this store's user.
    ///
    /// # Errors
    ///
    /// Returns an error if an imported name is blank or saving fails.
    pub fn import(&mut self, items: Vec<HabitWithStats>) -> Result<ImportReport, HabitError> {
        let mut next = self.habits.clone();
        let mut report = ImportReport::default();
        let mut imported = Vec::with_capacity(items.len());

        for mut item in items {
            item.habit.name = validate_name(&item.habit.name)?;
            item.habit.user_id = self.user_id.clone();
            item.stats = self.stats_for(&item.habit, &item.logs);
            imported.push(item.habit.id.clone());

            if let Some(existing) = next.iter_mut().find(|h| h.habit.id == item.habit.id) {
                *existing = item;
                report.replaced += 1;
            } else {
                next.push(item);
                report.added += 1;
            }
        }

        for item in next.iter().filter(|h| imported.contains(&h.habit.id)) {
            self.save_log(item)?;
        }
        self.save_list(&next)?;
        self.habits = next;

        tracing::info!(added = report.added, replaced = report.replaced, "imported habits");
        Ok(report)
    }

    fn replace_log(&mut self, index: usize, logs: HabitLog) -> Result<HabitWithStats, HabitError> {
        let mut item = self.habits[index].clone();
        item.stats = self.stats_for(&item.habit, &logs);
        item.logs = logs;

        self.save_log(&item)?;
        self.habits[index] = item.clone();
        Ok(item)
    }

    fn stats_for(&self, habit: &Habit, logs: &HabitLog) -> DerivedStats {
        engine::compute_stats_with(logs, habit.start_date, self.clock.today(), self.rule)
    }

    fn index_of(&self, id: &str) -> Result<usize, HabitError> {
        self.habits
            .iter()
            .position(|h| h.habit.id == id)
            .ok_or_else(|| HabitError::NotFound(id.to_string()))
    }

    fn ensure_name_free(&self, name: &str, except_id: Option<&str>) -> Result<(), HabitError> {
        let taken = self
            .habits
            .iter()
            .any(|h| Some(h.habit.id.as_str()) != except_id && h.habit.name.eq_ignore_ascii_case(name));
        if taken {
            return Err(HabitError::invalid(format!("a habit named '{name}' already exists")));
        }
        Ok(())
    }

    fn save_list(&self, habits: &[HabitWithStats]) -> Result<(), HabitError> {
        let list: Vec<&Habit> = habits.iter().map(|h| &h.habit).collect();
        let record: Record = serde_json::to_value(list)?;
        self.records.save(&habits_key(&self.user_id), &record)
    }

    fn save_log(&self, item: &HabitWithStats) -> Result<(), HabitError> {
        let record: Record = serde_json::to_value(&item.logs)?;
        self.records.save(&logs_key(&item.habit.id), &record)
    }
}

fn load_record<T: DeserializeOwned>(
    records: &impl RecordStore,
    key: &str,
) -> Result<Option<T>, HabitError> {
    records
        .load(key)?
        .map(|record| {
            serde_json::from_value(record).map_err(|source| HabitError::CorruptRecord {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::habits::Schedule;
    use crate::storage::port::MockRecordStore;
    use crate::storage::SqliteStore;
    use serde_json::json;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn open<'a>(records: &'a SqliteStore, today: &str) -> HabitStore<&'a SqliteStore, FixedClock> {
        HabitStore::open(records, FixedClock(date(today)), "local").unwrap()
    }

    #[test]
    fn test_add_habit_starts_empty() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");

        let item = store.add_habit(NewHabit::daily("  Read  ")).unwrap();
        assert_eq!(item.habit.name, "Read");
        assert_eq!(item.habit.start_date, date("2024-01-03"));
        assert_eq!(item.habit.user_id, "local");
        assert!(item.logs.is_empty());
        assert_eq!(item.stats, Default::default());
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_add_habit_validation() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");

        assert!(store.add_habit(NewHabit::daily("   ")).is_err());
        store.add_habit(NewHabit::daily("Read")).unwrap();
        let err = store.add_habit(NewHabit::daily("read")).unwrap_err();
        assert!(matches!(err, HabitError::InvalidInput(_)));
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_toggle_recomputes_and_persists() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");
        let id = store
            .add_habit(NewHabit::daily("Read").starting(date("2024-01-01")))
            .unwrap()
            .habit
            .id;

        store.toggle_status(&id, date("2024-01-01"), None).unwrap();
        store.toggle_status(&id, date("2024-01-02"), None).unwrap();
        let item = store
            .toggle_status(&id, date("2024-01-03"), Some(Status::Missed))
            .unwrap();

        assert_eq!(item.stats.current_streak, 0);
        assert_eq!(item.stats.longest_streak, 2);
        assert_eq!(item.stats.completion_rate, 67);

        let saved = records.load(&logs_key(&id)).unwrap().unwrap();
        assert_eq!(
            saved,
            json!({"2024-01-01": "completed", "2024-01-02": "completed", "2024-01-03": "missed"})
        );

        let reopened = open(&records, "2024-01-03");
        assert_eq!(reopened.get(&id).unwrap(), &item);
    }

    #[test]
    fn test_toggle_twice_returns_to_untracked() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");
        let id = store.add_habit(NewHabit::daily("Read")).unwrap().habit.id;

        let before = store.get(&id).unwrap().clone();
        store.toggle_status(&id, date("2024-01-03"), None).unwrap();
        assert_eq!(store.status(&id, date("2024-01-03")).unwrap(), Some(Status::Completed));
        let after = store.toggle_status(&id, date("2024-01-03"), None).unwrap();

        assert_eq!(after, before);
        assert_eq!(store.status(&id, date("2024-01-03")).unwrap(), None);
    }

    #[test]
    fn test_clear_status() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");
        let id = store.add_habit(NewHabit::daily("Read")).unwrap().habit.id;

        store
            .toggle_status(&id, date("2024-01-02"), Some(Status::Skipped))
            .unwrap();
        let item = store.clear_status(&id, date("2024-01-02")).unwrap();
        assert!(item.logs.is_empty());
    }

    #[test]
    fn test_update_keeps_log_and_recomputes() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");
        let id = store
            .add_habit(NewHabit::daily("Read").starting(date("2024-01-01")))
            .unwrap()
            .habit
            .id;
        for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
            store.toggle_status(&id, date(day), None).unwrap();
        }
        assert_eq!(store.get(&id).unwrap().stats.current_streak, 3);

        let item = store
            .update_habit(
                &id,
                HabitUpdate {
                    name: Some("Read fiction".into()),
                    schedule: Some(Schedule::Weekdays),
                    start_date: Some(date("2024-01-02")),
                },
            )
            .unwrap();

        assert_eq!(item.habit.name, "Read fiction");
        assert_eq!(item.logs.len(), 3);
        assert_eq!(item.stats.current_streak, 2);
        assert_eq!(item.stats.longest_streak, 3);
    }

    struct StepClock(std::cell::Cell<NaiveDate>);

    impl Clock for StepClock {
        fn today(&self) -> NaiveDate {
            self.0.get()
        }
    }

    #[test]
    fn test_refresh_follows_the_clock() {
        let records = SqliteStore::open_in_memory().unwrap();
        let clock = StepClock(std::cell::Cell::new(date("2024-01-03")));
        let mut store = HabitStore::open(&records, &clock, "local").unwrap();
        let id = store.add_habit(NewHabit::daily("Read")).unwrap().habit.id;
        store.toggle_status(&id, date("2024-01-03"), None).unwrap();
        assert_eq!(store.get(&id).unwrap().stats.current_streak, 1);

        clock.0.set(date("2024-01-04"));
        store.refresh();
        let stats = store.get(&id).unwrap().stats;
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 1);
    }

    #[test]
    fn test_delete_removes_log() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");
        let id = store.add_habit(NewHabit::daily("Read")).unwrap().habit.id;
        store.toggle_status(&id, date("2024-01-03"), None).unwrap();

        let removed = store.delete_habit(&id).unwrap();
        assert_eq!(removed.name, "Read");
        assert!(store.habits().is_empty());
        assert_eq!(records.load(&logs_key(&id)).unwrap(), None);
        assert!(matches!(store.delete_habit(&id), Err(HabitError::NotFound(_))));
    }

    #[test]
    fn test_resolve() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");
        let read = store.add_habit(NewHabit::daily("Read")).unwrap().habit.id;
        store.add_habit(NewHabit::daily("Run")).unwrap();

        assert_eq!(store.resolve("READ").unwrap().habit.id, read);
        assert_eq!(store.resolve(&read).unwrap().habit.id, read);
        assert_eq!(store.resolve(&read[..8]).unwrap().habit.id, read);
        assert!(matches!(store.resolve("Swim"), Err(HabitError::NotFound(_))));
        // Too short to be treated as an id prefix
        assert!(matches!(store.resolve(&read[..2]), Err(HabitError::NotFound(_))));
    }

    #[test]
    fn test_resolve_ambiguous_names_from_import() {
        let records = SqliteStore::open_in_memory().unwrap();
        records
            .save(
                &habits_key("local"),
                &json!([
                    {"id": "a1", "name": "Walk", "target": "daily", "startDate": "2024-01-01",
                     "createdAt": "2024-01-01T00:00:00Z", "userId": "local"},
                    {"id": "b2", "name": "walk", "target": "daily", "startDate": "2024-01-01",
                     "createdAt": "2024-01-01T00:00:00Z", "userId": "local"}
                ]),
            )
            .unwrap();
        let store = open(&records, "2024-01-03");
        assert!(matches!(
            store.resolve("Walk"),
            Err(HabitError::Ambiguous { count: 2, .. })
        ));
    }

    #[test]
    fn test_open_recomputes_from_stored_logs() {
        let records = SqliteStore::open_in_memory().unwrap();
        records
            .save(
                &habits_key("local"),
                &json!([{"id": "k3j9x0a", "name": "Stretch", "target": "custom", "targetDays": [1, 3],
                         "startDate": "2024-01-01T00:00:00.000Z",
                         "createdAt": "2024-01-01T00:00:00.000Z", "userId": "local"}]),
            )
            .unwrap();
        records
            .save(
                &logs_key("k3j9x0a"),
                &json!({"2024-01-01": "completed", "2024-01-05": "completed"}),
            )
            .unwrap();

        let store = open(&records, "2024-01-05");
        let item = store.get("k3j9x0a").unwrap();
        assert_eq!(item.stats.current_streak, 1);
        assert_eq!(item.stats.longest_streak, 2);
        assert_eq!(item.stats.completion_rate, 100);

        let strict = HabitStore::open(&records, FixedClock(date("2024-01-05")), "local")
            .unwrap()
            .with_longest_streak_rule(LongestStreakRule::CalendarDays);
        assert_eq!(strict.get("k3j9x0a").unwrap().stats.longest_streak, 1);
    }

    #[test]
    fn test_corrupt_log_is_reported() {
        let records = SqliteStore::open_in_memory().unwrap();
        records
            .save(
                &habits_key("local"),
                &json!([{"id": "x", "name": "Gym", "target": "daily", "startDate": "2024-01-01",
                         "createdAt": "2024-01-01T00:00:00Z", "userId": "local"}]),
            )
            .unwrap();
        records
            .save(&logs_key("x"), &json!({"yesterday": "completed"}))
            .unwrap();

        let err = HabitStore::open(&records, FixedClock(date("2024-01-03")), "local")
            .err()
            .unwrap();
        assert!(matches!(err, HabitError::CorruptRecord { ref key, .. } if key == "habitvault_logs_x"));
    }

    #[test]
    fn test_import_adds_and_replaces() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&records, "2024-01-03");
        let existing = store.add_habit(NewHabit::daily("Read")).unwrap();

        let mut replacement = existing.clone();
        replacement.logs.set(date("2024-01-03"), Status::Completed);
        replacement.stats.longest_streak = 99;

        let mut fresh = existing.clone();
        fresh.habit.id = "imported1".into();
        fresh.habit.name = "Journal".into();
        fresh.habit.user_id = "someone-else".into();

        let report = store.import(vec![replacement, fresh]).unwrap();
        assert_eq!(report, ImportReport { added: 1, replaced: 1 });

        let read = store.get(&existing.habit.id).unwrap();
        assert_eq!(read.stats.longest_streak, 1);
        assert_eq!(store.get("imported1").unwrap().habit.user_id, "local");

        let reopened = open(&records, "2024-01-03");
        assert_eq!(reopened.habits().len(), 2);
    }

    #[test]
    fn test_export_then_import_into_fresh_store() {
        let source = SqliteStore::open_in_memory().unwrap();
        let mut store = open(&source, "2024-01-03");
        let id = store.add_habit(NewHabit::daily("Read")).unwrap().habit.id;
        store.toggle_status(&id, date("2024-01-03"), None).unwrap();

        let text = serde_json::to_string(&store.export()).unwrap();
        let habits = VaultExport::parse(&text).unwrap();

        let target = SqliteStore::open_in_memory().unwrap();
        let mut fresh = open(&target, "2024-01-03");
        fresh.import(habits).unwrap();
        assert_eq!(fresh.habits(), store.habits());
    }

    #[test]
    fn test_parse_export_shapes() {
        let bare = r#"[{"id": "a1", "name": "Walk", "target": "daily", "startDate": "2024-01-01",
                       "createdAt": "2024-01-01T00:00:00Z", "userId": "u", "logs": {"2024-01-01": "completed"}}]"#;
        let habits = VaultExport::parse(bare).unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].logs.len(), 1);

        let future = r#"{"version": 9, "userId": "u", "exportedAt": "2024-01-01T00:00:00Z", "habits": []}"#;
        assert!(matches!(VaultExport::parse(future), Err(HabitError::InvalidInput(_))));

        assert!(matches!(VaultExport::parse("{\"habits\": 3}"), Err(HabitError::Parse(_))));
    }

    #[test]
    fn test_failed_save_leaves_store_unchanged() {
        let mut records = MockRecordStore::new();
        records.expect_load().returning(|_| Ok(None));
        records
            .expect_save()
            .returning(|_, _| Err(HabitError::Database("disk full".into())));

        let mut store = HabitStore::open(records, FixedClock(date("2024-01-03")), "local").unwrap();
        let err = store.add_habit(NewHabit::daily("Read")).unwrap_err();
        assert!(matches!(err, HabitError::Database(_)));
        assert!(store.habits().is_empty());
    }

    #[test]
    fn test_toggle_saves_only_the_log() {
        let mut records = MockRecordStore::new();
        records.expect_load().returning(|key| {
            Ok(match key {
                "habitvault_habits_local" => Some(json!([
                    {"id": "h1", "name": "Read", "target": "daily", "startDate": "2024-01-01",
                     "createdAt": "2024-01-01T00:00:00Z", "userId": "local"}
                ])),
                _ => None,
            })
        });
        records
            .expect_save()
            .withf(|key, record| key == "habitvault_logs_h1" && record["2024-01-02"] == "completed")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut store = HabitStore::open(records, FixedClock(date("2024-01-02")), "local").unwrap();
        let item = store.toggle_status("h1", date("2024-01-02"), None).unwrap();
        assert_eq!(item.stats.current_streak, 1);
    }

    fn stored_h1() -> Record {
        json!([
            {"id": "h1", "name": "Read", "target": "daily", "startDate": "2024-01-01",
             "createdAt": "2024-01-01T00:00:00Z", "userId": "local"}
        ])
    }

    #[test]
    fn test_delete_commits_when_log_removal_fails() {
        let mut records = MockRecordStore::new();
        records.expect_load().returning(|key| {
            Ok((key == "habitvault_habits_local").then(stored_h1))
        });
        records
            .expect_save()
            .withf(|key, record| key == "habitvault_habits_local" && record == &json!([]))
            .times(1)
            .returning(|_, _| Ok(()));
        records
            .expect_remove()
            .returning(|_| Err(HabitError::Database("locked".into())));

        let mut store = HabitStore::open(records, FixedClock(date("2024-01-03")), "local").unwrap();
        let removed = store.delete_habit("h1").unwrap();
        assert_eq!(removed.id, "h1");
        assert!(store.habits().is_empty());
    }

    #[test]
    fn test_add_writes_log_before_list() {
        let mut seq = mockall::Sequence::new();
        let mut records = MockRecordStore::new();
        records.expect_load().returning(|_| Ok(None));
        records
            .expect_save()
            .withf(|key, _| key.starts_with("habitvault_logs_"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        records
            .expect_save()
            .withf(|key, _| key == "habitvault_habits_local")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let mut store = HabitStore::open(records, FixedClock(date("2024-01-03")), "local").unwrap();
        store.add_habit(NewHabit::daily("Read")).unwrap();
        assert_eq!(store.habits().len(), 1);
    }

    #[test]
    fn test_add_log_failure_leaves_list_untouched() {
        let mut records = MockRecordStore::new();
        records.expect_load().returning(|_| Ok(None));
        records
            .expect_save()
            .withf(|key, _| key.starts_with("habitvault_logs_"))
            .times(1)
            .returning(|_, _| Err(HabitError::Database("disk full".into())));
        records
            .expect_save()
            .withf(|key, _| key == "habitvault_habits_local")
            .never();

        let mut store = HabitStore::open(records, FixedClock(date("2024-01-03")), "local").unwrap();
        assert!(store.add_habit(NewHabit::daily("Read")).is_err());
        assert!(store.habits().is_empty());
    }

    #[test]
    fn test_import_log_failure_leaves_list_untouched() {
        let mut records = MockRecordStore::new();
        records.expect_load().returning(|key| {
            Ok((key == "habitvault_habits_local").then(stored_h1))
        });
        records
            .expect_save()
            .withf(|key, _| key == "habitvault_logs_h2")
            .times(1)
            .returning(|_, _| Ok(()));
        records
            .expect_save()
            .withf(|key, _| key == "habitvault_logs_h3")
            .times(1)
            .returning(|_, _| Err(HabitError::Database("disk full".into())));
        records
            .expect_save()
            .withf(|key, _| key == "habitvault_habits_local" || key == "habitvault_logs_h1")
            .never();

        let mut store = HabitStore::open(records, FixedClock(date("2024-01-03")), "local").unwrap();
        let incoming = VaultExport::parse(
            r#"[{"id": "h2", "name": "Run", "target": "daily", "startDate": "2024-01-01",
                 "createdAt": "2024-01-01T00:00:00Z", "userId": "other", "logs": {"2024-01-02": "completed"}},
                {"id": "h3", "name": "Write", "target": "daily", "startDate": "2024-01-01",
                 "createdAt": "2024-01-01T00:00:00Z", "userId": "other", "logs": {"2024-01-02": "missed"}}]"#,
        )
        .unwrap();

        assert!(store.import(incoming).is_err());
        assert_eq!(store.habits().len(), 1);
        assert_eq!(store.habits()[0].habit.id, "h1");
    }
}
