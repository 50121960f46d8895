//! Path resolution for habitvault configuration and data files.
//!
//! All habitvault data is stored in `~/.habitvault/` unless the
//! `HABITVAULT_HOME` variable (or `--data-dir`) points elsewhere:
//! - `config.yaml` - Main configuration file
//! - `habitvault.db` - SQLite database holding habits and logs

use std::path::PathBuf;

use crate::error::HabitError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "HABITVAULT_HOME";

/// Paths to habitvault configuration and data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    /// Root directory: `~/.habitvault/`
    pub root: PathBuf,
    /// Config file: `~/.habitvault/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.habitvault/habitvault.db`
    pub database: PathBuf,
}

impl Paths {
    /// Resolve paths from `HABITVAULT_HOME`, falling back to the user's home
    /// directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, HabitError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            HabitError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".habitvault")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("habitvault.db"),
            root,
        }
    }

    /// Ensure the root directory exists, creating it if necessary.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), HabitError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                HabitError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}
