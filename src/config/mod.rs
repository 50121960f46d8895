//! Configuration management for habitvault.
//!
//! This module handles loading and saving configuration from `~/.habitvault/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{ColorSetting, Config, DisplayConfig, GeneralConfig, StatsConfig, TimeRange};
