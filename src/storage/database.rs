//! `SQLite` record store.
//!
//! The database is stored at `~/.habitvault/habitvault.db` and holds a single
//! `records` table of JSON documents keyed by name.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::migrations;
use super::port::{Record, RecordStore};
use crate::error::HabitError;

/// `SQLite`-backed [`RecordStore`].
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open the database at a specific path.
    ///
    /// Creates the database file and runs migrations if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_at(path: &std::path::Path) -> Result<Self, HabitError> {
        let conn = Connection::open(path).map_err(|e| {
            HabitError::Database(format!("Failed to open database {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "opened record database");

        let store = Self { conn };
        store.migrate()?;

        Ok(store)
    }

    /// Open an in-memory database (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or migrations fail.
    pub fn open_in_memory() -> Result<Self, HabitError> {
        let conn = Connection::open_in_memory().map_err(|e| {
            HabitError::Database(format!("Failed to open in-memory database: {e}"))
        })?;

        let store = Self { conn };
        store.migrate()?;

        Ok(store)
    }

    fn migrate(&self) -> Result<(), HabitError> {
        migrations::run(&self.conn)
    }

    /// Get the current schema version.
    ///
    /// # Errors
    ///
    /// Returns an error if the version cannot be read.
    pub fn schema_version(&self) -> Result<i32, HabitError> {
        migrations::get_version(&self.conn)
    }

    /// All stored keys, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn keys(&self) -> Result<Vec<String>, HabitError> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM records ORDER BY key")
            .map_err(|e| HabitError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| HabitError::Database(format!("Failed to list keys: {e}")))?;

        let mut keys = Vec::new();
        for row in rows {
            keys.push(row.map_err(|e| HabitError::Database(e.to_string()))?);
        }
        Ok(keys)
    }
}

impl RecordStore for SqliteStore {
    fn load(&self, key: &str) -> Result<Option<Record>, HabitError> {
        let raw: Option<String> = self
            .conn
            .query_row("SELECT value FROM records WHERE key = ?1", [key], |row| {
                row.get(0)
            })
            .optional()
            .map_err(|e| HabitError::Database(format!("Failed to load record {key}: {e}")))?;

        tracing::debug!(key, found = raw.is_some(), "load record");

        raw.map(|text| {
            serde_json::from_str(&text).map_err(|source| HabitError::CorruptRecord {
                key: key.to_string(),
                source,
            })
        })
        .transpose()
    }

    fn save(&self, key: &str, record: &Record) -> Result<(), HabitError> {
        let text = serde_json::to_string(record)?;
        self.conn
            .execute(
                r"INSERT INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
                  ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, text, Utc::now().to_rfc3339()],
            )
            .map_err(|e| HabitError::Database(format!("Failed to save record {key}: {e}")))?;

        tracing::debug!(key, bytes = text.len(), "saved record");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool, HabitError> {
        let rows = self
            .conn
            .execute("DELETE FROM records WHERE key = ?1", [key])
            .map_err(|e| HabitError::Database(format!("Failed to remove record {key}: {e}")))?;

        tracing::debug!(key, removed = rows > 0, "remove record");
        Ok(rows > 0)
    }
}
