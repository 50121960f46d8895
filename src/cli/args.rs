use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use serde::{Deserialize, Serialize};

use crate::config::TimeRange;
use crate::habits::Target;

#[derive(Parser)]
#[command(name = "habitvault")]
#[command(about = "Track daily habits, streaks and completion rates from the terminal")]
#[command(long_about = "habitvault - habit tracking for the terminal

Create habits, mark each day completed, missed or skipped, and watch your
streaks grow. Everything is stored locally in ~/.habitvault/.

QUICK START:
  habitvault add \"Read\"                     Track a daily habit
  habitvault add Gym --target custom --days mon,wed,fri
  habitvault toggle Read                    Mark today completed (again to undo)
  habitvault mark Gym missed yesterday      Record a missed day
  habitvault list                           Streaks and rates at a glance
  habitvault stats                          Analytics dashboard

DATES:
  2024-03-01, today, yesterday, '3 days ago', -3d, monday, 'last friday'

OUTPUT FORMATS:
  --output pretty    Human-readable colored output (default)
  --output json      Machine-readable JSON for scripting

For more information on a specific command, run:
  habitvault <command> --help")]
#[command(version, propagate_version = true)]
pub struct Cli {
    /// Output format for command results
    ///
    /// Use 'pretty' for human-readable colored output,
    /// or 'json' for machine-readable output suitable for scripting.
    /// Defaults to `general.default_output` from the config file.
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Directory holding the database and config file
    #[arg(long, global = true, env = "HABITVAULT_HOME", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Pretend today is DATE
    #[arg(long, global = true, env = "HABITVAULT_TODAY", value_name = "DATE")]
    pub today: Option<String>,

    /// Log debug information to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for command results.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable colored output.
    #[default]
    Pretty,
    /// Machine-readable JSON output.
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a habit
    ///
    /// New habits start with an empty log. The start date defaults to today
    /// and bounds the current streak: days before it never count.
    ///
    /// # Examples
    ///
    ///   habitvault add "Read 20 pages"
    ///   habitvault add Stretch --target weekdays
    ///   habitvault add Gym --target custom --days mon,wed,fri
    ///   habitvault add Journal --start 2024-01-01
    #[command(alias = "a")]
    Add(AddArgs),

    /// List habits with streaks and completion rates
    ///
    /// The icon shows today's entry: [x] completed, [!] missed,
    /// [~] skipped, [ ] due but untracked, - not due today.
    #[command(alias = "ls")]
    List,

    /// Show one habit with its recent history
    ///
    /// HABIT is a name (case-insensitive), an id, or a unique id prefix.
    Show {
        /// Habit name or id
        habit: String,

        /// Days of history to show (defaults to `display.heatmap_days`)
        #[arg(long, short = 'n')]
        days: Option<usize>,
    },

    /// Change a habit's name, schedule or start date
    ///
    /// The log is kept as is; statistics are recomputed.
    ///
    /// # Examples
    ///
    ///   habitvault edit Read --name "Read fiction"
    ///   habitvault edit Gym --target weekends
    ///   habitvault edit Gym --start 2024-02-01
    Edit(EditArgs),

    /// Delete a habit and its log
    #[command(alias = "rm")]
    Delete {
        /// Habit name or id
        habit: String,
    },

    /// Toggle a day between completed and untracked
    ///
    /// Missed or skipped days become completed.
    ///
    /// # Examples
    ///
    ///   habitvault toggle Read
    ///   habitvault toggle Read yesterday
    ///   habitvault toggle Read -2d
    #[command(alias = "t")]
    Toggle {
        /// Habit name or id
        habit: String,

        /// Day to toggle (defaults to today)
        #[arg(allow_hyphen_values = true)]
        date: Option<String>,
    },

    /// Record an explicit status for a day
    ///
    /// # Examples
    ///
    ///   habitvault mark Gym missed
    ///   habitvault mark Gym skipped "2 days ago"
    ///   habitvault mark Read done 2024-01-03
    Mark {
        /// Habit name or id
        habit: String,

        /// completed (done), missed or skipped
        status: String,

        /// Day to mark (defaults to today)
        #[arg(allow_hyphen_values = true)]
        date: Option<String>,
    },

    /// Return a day to untracked
    Clear {
        /// Habit name or id
        habit: String,

        /// Day to clear (defaults to today)
        #[arg(allow_hyphen_values = true)]
        date: Option<String>,
    },

    /// Show the entry for one day
    Status {
        /// Habit name or id
        habit: String,

        /// Day to show (defaults to today)
        #[arg(allow_hyphen_values = true)]
        date: Option<String>,
    },

    /// Week view of all habits, or of one
    ///
    /// Blank cells are days on which the habit is not due.
    Week {
        /// Only show this habit
        habit: Option<String>,

        /// Any day in the week to show (defaults to today)
        #[arg(long, allow_hyphen_values = true)]
        of: Option<String>,
    },

    /// Month calendar for a habit
    #[command(alias = "cal")]
    Calendar {
        /// Habit name or id
        habit: String,

        /// Month to show as YYYY-MM (defaults to the current month)
        #[arg(long, short = 'm')]
        month: Option<String>,
    },

    /// Analytics dashboard across all habits
    ///
    /// Overall completion rate, best habit, tracked days, streaks and the
    /// completion of due days over a recent window.
    Stats {
        /// Recent window (defaults to `display.time_range`)
        #[arg(long, short = 'r', value_enum)]
        range: Option<TimeRange>,
    },

    /// Export habits and logs as JSON
    ///
    /// # Examples
    ///
    ///   habitvault export > habits.json
    ///   habitvault export --file habits.json
    Export {
        /// Write to a file instead of stdout
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,
    },

    /// Import habits and logs from a JSON export
    ///
    /// Habits with an id that already exists are replaced. Use '-' to read
    /// from stdin.
    Import {
        /// Export file to read
        file: PathBuf,
    },

    /// Show or create the configuration file
    Config(ConfigArgs),

    /// Generate shell completions
    ///
    /// Outputs completion script for the specified shell.
    /// Redirect to a file or source directly.
    ///
    /// Example: habitvault completions bash > ~/.bash_completion.d/habitvault
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,

        /// Show installation instructions
        #[arg(long, short = 'i')]
        install: bool,
    },
}

/// Arguments for creating a habit.
#[derive(Args)]
pub struct AddArgs {
    /// Habit name
    pub name: String,

    /// Recurrence target
    #[arg(short, long, value_enum, default_value = "daily")]
    pub target: Target,

    /// Days for a custom target: 0-6 (0 = Sunday) or names, comma separated
    #[arg(short, long)]
    pub days: Option<String>,

    /// First day of the habit (defaults to today)
    #[arg(short, long, allow_hyphen_values = true)]
    pub start: Option<String>,
}

/// Arguments for editing a habit.
#[derive(Args)]
pub struct EditArgs {
    /// Habit name or id
    pub habit: String,

    /// New name
    #[arg(short, long)]
    pub name: Option<String>,

    /// New recurrence target
    #[arg(short, long, value_enum)]
    pub target: Option<Target>,

    /// Days for a custom target
    #[arg(short, long)]
    pub days: Option<String>,

    /// New start date
    #[arg(short, long, allow_hyphen_values = true)]
    pub start: Option<String>,
}

/// Arguments for configuration.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Configuration subcommands.
#[derive(Subcommand, Clone, Copy)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML
    Show,

    /// Print the path of the configuration file
    Path,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
