use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use habitvault::cli::args::{Cli, Commands};
use habitvault::cli::commands;
use habitvault::config::{ColorSetting, Config, Paths};
use habitvault::core::{parse_date_input, Clock, FixedClock, SystemClock};
use habitvault::error::HabitError;
use habitvault::habits::HabitStore;
use habitvault::storage::SqliteStore;

/// Environment variable holding the log filter, e.g. `habitvault=debug`.
const LOG_ENV: &str = "HABITVAULT_LOG";

fn main() {
    if let Err(e) = run() {
        if let Some(err) = e.downcast_ref::<HabitError>() {
            if !err.is_user_error() {
                tracing::error!(error = %err, "command failed");
            }
        }
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "habitvault=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let paths = match &cli.data_dir {
        Some(dir) => Paths::with_root(dir.clone()),
        None => Paths::new()?,
    };
    let config = Config::load_from_path(&paths.config_file)?;

    match config.general.color {
        ColorSetting::Always => colored::control::set_override(true),
        ColorSetting::Never => colored::control::set_override(false),
        ColorSetting::Auto => {},
    }
    let format = cli.output.unwrap_or(config.general.default_output);

    // Commands that never touch the database.
    match &cli.command {
        Commands::Completions { shell, install } => {
            return print(&commands::completions(*shell, *install)?);
        },
        Commands::Config(args) => {
            return print(&commands::config(&paths, &config, args.command, format)?);
        },
        _ => {},
    }

    let clock: Box<dyn Clock> = match cli.today.as_deref() {
        Some(input) => Box::new(FixedClock(
            parse_date_input(input, SystemClock.today()).context("invalid --today")?,
        )),
        None => Box::new(SystemClock),
    };

    paths.ensure_dirs()?;
    let records = SqliteStore::open_at(&paths.database)
        .with_context(|| format!("opening {}", paths.database.display()))?;
    let mut store = HabitStore::open(records, clock, config.general.user_id.clone())?
        .with_longest_streak_rule(config.stats.longest_streak_rule());
    tracing::debug!(today = %store.today(), habits = store.habits().len(), "store ready");

    let display = &config.display;
    let output = match cli.command {
        Commands::Add(args) => commands::add(&mut store, &args, format)?,
        Commands::List => commands::list(&store, format)?,
        Commands::Show { habit, days } => {
            commands::show(&store, &habit, days.unwrap_or(display.heatmap_days), format)?
        },
        Commands::Edit(args) => commands::edit(&mut store, &args, format)?,
        Commands::Delete { habit } => commands::delete(&mut store, &habit, format)?,
        Commands::Toggle { habit, date } => {
            commands::toggle(&mut store, &habit, date.as_deref(), format)?
        },
        Commands::Mark { habit, status, date } => {
            commands::mark(&mut store, &habit, &status, date.as_deref(), format)?
        },
        Commands::Clear { habit, date } => {
            commands::clear(&mut store, &habit, date.as_deref(), format)?
        },
        Commands::Status { habit, date } => {
            commands::status(&store, &habit, date.as_deref(), format)?
        },
        Commands::Week { habit, of } => commands::week(
            &store,
            habit.as_deref(),
            of.as_deref(),
            display.week_starts_on,
            format,
        )?,
        Commands::Calendar { habit, month } => commands::calendar(
            &store,
            &habit,
            month.as_deref(),
            display.week_starts_on,
            format,
        )?,
        Commands::Stats { range } => commands::stats(
            &store,
            range.unwrap_or(display.time_range),
            display.show_quote,
            format,
        )?,
        Commands::Export { file } => commands::export(&store, file.as_deref(), format)?,
        Commands::Import { file } => commands::import(&mut store, &file, format)?,
        Commands::Completions { .. } | Commands::Config(_) => String::new(),
    };

    print(&output)
}

#[allow(clippy::unnecessary_wraps)]
fn print(output: &str) -> Result<()> {
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
