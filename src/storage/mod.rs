//! Storage layer for habitvault.
//!
//! Habits and their logs are kept as JSON records behind the
//! [`RecordStore`] port. The default backend is a `SQLite` database.

mod database;
mod migrations;
pub mod port;

pub use database::SqliteStore;
pub use port::{habits_key, logs_key, Record, RecordStore};
