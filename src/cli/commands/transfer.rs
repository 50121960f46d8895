//! Export and import of habits with their logs.

use std::io::Read;
use std::path::Path;

use colored::Colorize;
use serde_json::json;

use crate::cli::args::OutputFormat;
use crate::core::Clock;
use crate::error::HabitError;
use crate::habits::{HabitStore, VaultExport};
use crate::output::{format_import_pretty, to_json};
use crate::storage::RecordStore;

/// Execute export command
///
/// Without a file the export document itself is the output, whatever the
/// output format.
///
/// # Errors
///
/// Returns an error if serialization or writing the file fails.
pub fn export<S: RecordStore, C: Clock>(
    store: &HabitStore<S, C>,
    file: Option<&Path>,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let document = store.export();
    let text = to_json(&document)?;

    let Some(path) = file else {
        return Ok(text);
    };

    std::fs::write(path, text)?;
    tracing::info!(path = %path.display(), count = document.habits.len(), "wrote export");

    match format {
        OutputFormat::Pretty => Ok(format!(
            "{} Exported {} habits to {}",
            "✓".green(),
            document.habits.len(),
            path.display()
        )),
        OutputFormat::Json => to_json(&json!({
            "exported": document.habits.len(),
            "file": path.display().to_string()
        })),
    }
}

/// Execute import command. A path of `-` reads from stdin.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or saving fails.
pub fn import<S: RecordStore, C: Clock>(
    store: &mut HabitStore<S, C>,
    file: &Path,
    format: OutputFormat,
) -> Result<String, HabitError> {
    let text = if file == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(file)?
    };

    let habits = VaultExport::parse(&text)?;
    let report = store.import(habits)?;

    match format {
        OutputFormat::Pretty => Ok(format_import_pretty(&report)),
        OutputFormat::Json => to_json(&report),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::habits::NewHabit;
    use crate::storage::SqliteStore;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_export_to_file_and_import() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("habits.json");

        let source = SqliteStore::open_in_memory().unwrap();
        let mut store = HabitStore::open(&source, FixedClock(date("2024-01-03")), "local").unwrap();
        let id = store.add_habit(NewHabit::daily("Read")).unwrap().habit.id;
        store.toggle_status(&id, date("2024-01-03"), None).unwrap();

        let output = export(&store, Some(&path), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["exported"], 1);

        let target = SqliteStore::open_in_memory().unwrap();
        let mut fresh = HabitStore::open(&target, FixedClock(date("2024-01-03")), "local").unwrap();
        let output = import(&mut fresh, &path, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["added"], 1);
        assert_eq!(fresh.get(&id).unwrap().stats.current_streak, 1);
    }

    #[test]
    fn test_export_to_stdout_is_the_document() {
        let records = SqliteStore::open_in_memory().unwrap();
        let store = HabitStore::open(&records, FixedClock(date("2024-01-03")), "local").unwrap();

        let output = export(&store, None, OutputFormat::Pretty).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["userId"], "local");
    }

    #[test]
    fn test_import_missing_file() {
        let records = SqliteStore::open_in_memory().unwrap();
        let mut store = HabitStore::open(&records, FixedClock(date("2024-01-03")), "local").unwrap();
        assert!(matches!(
            import(&mut store, Path::new("/nonexistent/habits.json"), OutputFormat::Pretty),
            Err(HabitError::Io(_))
        ));
    }
}
