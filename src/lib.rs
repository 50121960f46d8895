//! habitvault - habit tracking for the terminal
//!
//! This crate tracks recurring habits, records a status for each day and
//! derives streaks and completion rates from those logs. Data lives in a
//! local `SQLite` record store.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod analytics;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod habits;
pub mod output;
pub mod storage;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::HabitError;
pub use habits::{HabitStore, HabitWithStats, Status};
