//! Configuration commands.

use colored::Colorize;
use serde_json::json;

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::{Config, Paths};
use crate::error::HabitError;
use crate::output::to_json;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be written or serialized.
pub fn config(
    paths: &Paths,
    current: &Config,
    cmd: ConfigCommands,
    format: OutputFormat,
) -> Result<String, HabitError> {
    match cmd {
        ConfigCommands::Show => match format {
            OutputFormat::Pretty => current.to_yaml(),
            OutputFormat::Json => to_json(current),
        },

        ConfigCommands::Path => match format {
            OutputFormat::Pretty => Ok(paths.config_file.display().to_string()),
            OutputFormat::Json => to_json(&json!({
                "config": paths.config_file.display().to_string(),
                "database": paths.database.display().to_string()
            })),
        },

        ConfigCommands::Init { force } => {
            if paths.config_file.exists() && !force {
                return Err(HabitError::invalid(format!(
                    "{} already exists (use --force to overwrite)",
                    paths.config_file.display()
                )));
            }
            paths.ensure_dirs()?;
            Config::default().save_to_path(&paths.config_file)?;
            tracing::info!(path = %paths.config_file.display(), "wrote default config");

            match format {
                OutputFormat::Pretty => Ok(format!(
                    "{} Wrote {}",
                    "✓".green(),
                    paths.config_file.display()
                )),
                OutputFormat::Json => to_json(&json!({
                    "config": paths.config_file.display().to_string()
                })),
            }
        },
    }
}
