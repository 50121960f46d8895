//! Error types for habitvault.

use thiserror::Error;

/// Errors that can occur while tracking habits.
#[derive(Debug, Error)]
pub enum HabitError {
    /// A date string that is not a valid calendar date.
    #[error("Invalid date '{0}': expected YYYY-MM-DD, 'today', 'yesterday', 'N days ago' or a weekday")]
    InvalidDate(String),

    /// Rejected user input (blank name, bad weekday index, unknown status...).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// No habit matched the given reference.
    #[error("Habit not found: {0}")]
    NotFound(String),

    /// More than one habit matched the given reference.
    #[error("Ambiguous habit reference '{query}': matches {count} habits")]
    Ambiguous {
        /// The reference as typed.
        query: String,
        /// Number of habits it matched.
        count: usize,
    },

    /// The record store failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration could not be read or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stored record exists but does not have the expected shape.
    #[error("Stored record '{key}' is corrupt: {source}")]
    CorruptRecord {
        /// Storage key of the record.
        key: String,
        /// Underlying deserialization failure.
        #[source]
        source: serde_json::Error,
    },

    /// JSON serialization failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HabitError {
    /// Shorthand for an [`HabitError::InvalidInput`].
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Whether the error was caused by the user's input rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate(_) | Self::InvalidInput(_) | Self::NotFound(_) | Self::Ambiguous { .. }
        )
    }
}
