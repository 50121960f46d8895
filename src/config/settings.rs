//! Configuration settings for habitvault.
//!
//! Settings are loaded from `~/.habitvault/config.yaml`.

use serde::{Deserialize, Serialize};

use crate::cli::args::OutputFormat;
use crate::core::WeekStart;
use crate::error::HabitError;
use crate::habits::LongestStreakRule;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// General settings.
    pub general: GeneralConfig,
    /// Display preferences.
    pub display: DisplayConfig,
    /// Statistics settings.
    pub stats: StatsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Default output format.
    #[serde(default = "default_output_format")]
    pub default_output: OutputFormat,
    /// Color output setting.
    #[serde(default = "default_color")]
    pub color: ColorSetting,
    /// Owner of the habits in this vault.
    #[serde(default = "default_user_id")]
    pub user_id: String,
}

/// Color output setting.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColorSetting {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Always use colors.
    Always,
    /// Never use colors.
    Never,
}

/// Time range shown by the analytics views.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    /// Last 7 days.
    #[default]
    Week,
    /// Last 30 days.
    Month,
    /// Last 365 days.
    Year,
}

impl TimeRange {
    /// Number of days covered.
    #[must_use]
    pub const fn days(self) -> usize {
        match self {
            Self::Week => 7,
            Self::Month => 30,
            Self::Year => 365,
        }
    }
}

/// Display preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplayConfig {
    /// Window used by the stats dashboard.
    #[serde(default)]
    pub time_range: TimeRange,
    /// Days of history shown by `show`.
    #[serde(default = "default_heatmap_days")]
    pub heatmap_days: usize,
    /// Show the daily motivational quote on the dashboard.
    #[serde(default = "default_true")]
    pub show_quote: bool,
    /// First day of the week in calendar views.
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

/// Statistics settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct StatsConfig {
    /// Only count completed entries on consecutive calendar days towards the
    /// longest streak. Off by default: gaps in the log do not break a run.
    pub calendar_adjacent_longest: bool,
}

impl StatsConfig {
    /// The longest-streak rule these settings select.
    #[must_use]
    pub const fn longest_streak_rule(&self) -> LongestStreakRule {
        if self.calendar_adjacent_longest {
            LongestStreakRule::CalendarDays
        } else {
            LongestStreakRule::LoggedEntries
        }
    }
}

// Default value functions for serde
const fn default_output_format() -> OutputFormat {
    OutputFormat::Pretty
}

const fn default_color() -> ColorSetting {
    ColorSetting::Auto
}

fn default_user_id() -> String {
    "local".to_string()
}

const fn default_heatmap_days() -> usize {
    30
}

const fn default_true() -> bool {
    true
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_output: default_output_format(),
            color: default_color(),
            user_id: default_user_id(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_range: TimeRange::default(),
            heatmap_days: default_heatmap_days(),
            show_quote: default_true(),
            week_starts_on: WeekStart::default(),
        }
    }
}

impl Config {
    /// Load configuration from a specific path.
    ///
    /// If the config file doesn't exist, returns default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_from_path(path: &std::path::Path) -> Result<Self, HabitError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|e| {
            HabitError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        let config: Self = serde_yaml::from_str(&contents).map_err(|e| {
            HabitError::Config(format!(
                "Failed to parse config file {}: {e}",
                path.display()
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a specific path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be written.
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), HabitError> {
        let contents = serde_yaml::to_string(self)
            .map_err(|e| HabitError::Config(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, contents).map_err(|e| {
            HabitError::Config(format!(
                "Failed to write config file {}: {e}",
                path.display()
            ))
        })
    }

    /// Render the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String, HabitError> {
        serde_yaml::to_string(self)
            .map_err(|e| HabitError::Config(format!("Failed to serialize config: {e}")))
    }

    fn validate(&self) -> Result<(), HabitError> {
        if self.general.user_id.trim().is_empty() {
            return Err(HabitError::Config("general.user_id must not be empty".to_string()));
        }
        if self.display.heatmap_days == 0 {
            return Err(HabitError::Config("display.heatmap_days must be at least 1".to_string()));
        }
        Ok(())
    }
}
