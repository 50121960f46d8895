//! Persistence port.
//!
//! The habit store talks to storage only through [`RecordStore`]: plain JSON
//! records under string keys. The streak engine never sees it.

use serde_json::Value;

use crate::error::HabitError;

/// A stored record: JSON-serializable plain data.
pub type Record = Value;

/// Key/value persistence of plain records.
#[cfg_attr(test, mockall::automock)]
pub trait RecordStore {
    /// Load the record stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn load(&self, key: &str) -> Result<Option<Record>, HabitError>;

    /// Store `record` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn save(&self, key: &str, record: &Record) -> Result<(), HabitError>;

    /// Delete the record under `key`. Returns whether one existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<bool, HabitError>;
}

impl<S: RecordStore + ?Sized> RecordStore for &S {
    fn load(&self, key: &str) -> Result<Option<Record>, HabitError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, record: &Record) -> Result<(), HabitError> {
        (**self).save(key, record)
    }

    fn remove(&self, key: &str) -> Result<bool, HabitError> {
        (**self).remove(key)
    }
}

/// Key of the habit list belonging to `user_id`.
#[must_use]
pub fn habits_key(user_id: &str) -> String {
    format!("habitvault_habits_{user_id}")
}

/// Key of the log belonging to `habit_id`.
#[must_use]
pub fn logs_key(habit_id: &str) -> String {
    format!("habitvault_logs_{habit_id}")
}
