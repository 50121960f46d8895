use std::fmt::Write as _;

use chrono::NaiveDate;
use colored::{ColoredString, Colorize};

use crate::analytics::{
    daily_completions, render_bar_chart, render_heatmap_strip, render_progress_bar,
    render_sparkline, Quote, Summary, HEATMAP_LEGEND,
};
use crate::core::date::trailing_days;
use crate::habits::{Habit, HabitWithStats, ImportReport, Status};

/// Length of the id prefix shown in listings.
const SHORT_ID: usize = 8;

fn short_id(id: &str) -> &str {
    id.get(..SHORT_ID).unwrap_or(id)
}

/// Checkbox-style icon for a habit's entry on `day`.
fn day_icon(item: &HabitWithStats, day: NaiveDate) -> ColoredString {
    match item.logs.get(day) {
        Some(Status::Completed) => "[x]".green(),
        Some(Status::Missed) => "[!]".red(),
        Some(Status::Skipped) => "[~]".yellow(),
        None if item.habit.is_due_on(day) => "[ ]".white(),
        None => " - ".dimmed(),
    }
}

fn streak_label(days: u32) -> String {
    if days == 1 {
        "1 day".to_string()
    } else {
        format!("{days} days")
    }
}

/// Format the habit list with today's status.
pub fn format_habits_pretty(habits: &[HabitWithStats], today: NaiveDate) -> String {
    if habits.is_empty() {
        return "Habits (0)\n  No habits yet. Create one with `habitvault add <name>`".to_string();
    }

    let mut output = format!("Habits ({})  {}\n", habits.len(), today.format("%a %Y-%m-%d"));
    output.push_str(&"─".repeat(60));
    output.push('\n');

    for item in habits {
        let stats = &item.stats;
        let mut line = format!("{} {}", day_icon(item, today), item.habit.name.bold());
        let _ = write!(line, "  {}", short_id(&item.habit.id).dimmed());

        if stats.current_streak > 0 {
            let _ = write!(line, "  {}", format!("streak {}", streak_label(stats.current_streak)).cyan());
        }
        let _ = write!(
            line,
            "  {}",
            format!("best {}  {}%", stats.longest_streak, stats.completion_rate).dimmed()
        );

        output.push_str(&line);
        output.push('\n');
    }

    output
}

/// Format a single habit with its statistics and recent history.
pub fn format_habit_pretty(item: &HabitWithStats, today: NaiveDate, heatmap_days: usize) -> String {
    let habit = &item.habit;
    let stats = &item.stats;

    let mut output = format!("{} {}\n", day_icon(item, today), habit.name.bold());
    let _ = writeln!(output, "  {}: {}", "ID".dimmed(), habit.id);
    let _ = writeln!(output, "  {}: {}", "Schedule".dimmed(), habit.schedule.describe());
    let _ = writeln!(output, "  {}: {}", "Start".dimmed(), habit.start_date);
    let _ = writeln!(
        output,
        "  {}: {}",
        "Created".dimmed(),
        habit.created_at.format("%Y-%m-%d %H:%M")
    );
    let _ = writeln!(
        output,
        "  {}: {}",
        "Current streak".dimmed(),
        streak_label(stats.current_streak).cyan()
    );
    let _ = writeln!(
        output,
        "  {}: {}",
        "Longest streak".dimmed(),
        streak_label(stats.longest_streak)
    );
    let _ = writeln!(
        output,
        "  {}: {}",
        "Completion".dimmed(),
        render_progress_bar(item.logs.count(Status::Completed), item.logs.len(), 20)
    );
    let _ = writeln!(
        output,
        "  {}: {} completed, {} missed, {} skipped",
        "Entries".dimmed(),
        item.logs.count(Status::Completed),
        item.logs.count(Status::Missed),
        item.logs.count(Status::Skipped)
    );

    if heatmap_days > 0 {
        let _ = writeln!(output, "  {}:", format!("Last {heatmap_days} days").dimmed());
        let _ = writeln!(output, "    {}", render_heatmap_strip(&item.logs, today, heatmap_days));
        let _ = writeln!(output, "    {}", HEATMAP_LEGEND.dimmed());
    }

    output
}

/// Format one day's entry for a habit.
pub fn format_status_pretty(item: &HabitWithStats, day: NaiveDate) -> String {
    let status = item
        .logs
        .get(day)
        .map_or_else(|| "untracked".dimmed(), colored_status);
    let mut output = format!("{} {} on {}: {}", day_icon(item, day), item.habit.name.bold(), day, status);
    if item.logs.get(day).is_none() && !item.habit.is_due_on(day) {
        let _ = write!(output, " {}", "(not due)".dimmed());
    }
    let _ = write!(
        output,
        "\n  {} {}  {} {}  {} {}%",
        "streak".dimmed(),
        item.stats.current_streak,
        "best".dimmed(),
        item.stats.longest_streak,
        "rate".dimmed(),
        item.stats.completion_rate
    );
    output
}

fn colored_status(status: Status) -> ColoredString {
    match status {
        Status::Completed => status.as_str().green(),
        Status::Missed => status.as_str().red(),
        Status::Skipped => status.as_str().yellow(),
    }
}

/// Format the analytics dashboard.
pub fn format_summary_pretty(
    summary: &Summary,
    habits: &[HabitWithStats],
    today: NaiveDate,
    quote: Option<&Quote>,
) -> String {
    let mut output = String::new();

    if let Some(quote) = quote {
        let _ = writeln!(output, "\"{}\"", quote.text.italic());
        let _ = writeln!(output, "  {}\n", format!("- {}", quote.author).dimmed());
    }

    let _ = writeln!(output, "{}", "Overview".bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    let rows = [
        ("Habits", summary.total_habits.to_string()),
        ("Completion rate", format!("{}%", summary.completion_rate)),
        ("Total entries", summary.total_entries.to_string()),
        ("Tracked days", summary.tracked_days.to_string()),
        ("Longest streak", streak_label(summary.longest_streak)),
        ("Active streaks", summary.active_streaks.to_string()),
    ];
    for (label, value) in rows {
        let _ = writeln!(output, "  {:<16} {}", label.dimmed(), value);
    }
    if let Some(best) = &summary.best_habit {
        let _ = writeln!(
            output,
            "  {:<16} {} ({}%)",
            "Best habit".dimmed(),
            best.name.green(),
            best.completion_rate
        );
    }

    let recent = &summary.recent;
    let _ = writeln!(
        output,
        "\n{} {}",
        format!("Last {} days", recent.days).bold(),
        render_progress_bar(recent.completed, recent.due, 20)
    );
    let days = trailing_days(today, recent.days.min(60));
    let _ = writeln!(output, "  {}", render_sparkline(&daily_completions(habits, &days)));

    if !habits.is_empty() {
        let _ = writeln!(output, "\n{}", "Completion rate by habit".bold());
        let data: Vec<(String, usize)> = habits
            .iter()
            .map(|h| (h.habit.name.clone(), usize::from(h.stats.completion_rate)))
            .collect();
        output.push_str(&render_bar_chart(&data, 16, 30));
        output.push('\n');

        let _ = writeln!(output, "\n{}", "Current streaks".bold());
        let data: Vec<(String, usize)> = habits
            .iter()
            .map(|h| (h.habit.name.clone(), h.stats.current_streak as usize))
            .collect();
        output.push_str(&render_bar_chart(&data, 16, 30));
        output.push('\n');
    }

    output
}

/// Confirmation for a newly created habit.
pub fn format_created_pretty(item: &HabitWithStats) -> String {
    format!(
        "{} Created {} ({}), {} starting {}",
        "✓".green(),
        item.habit.name.bold(),
        short_id(&item.habit.id).dimmed(),
        item.habit.schedule.describe().to_lowercase(),
        item.habit.start_date
    )
}

/// Confirmation for a deleted habit.
pub fn format_deleted_pretty(habit: &Habit) -> String {
    format!("{} Deleted {} and its log", "✓".green(), habit.name.bold())
}

/// Result of an import.
pub fn format_import_pretty(report: &ImportReport) -> String {
    format!(
        "{} Imported {} new, {} replaced",
        "✓".green(),
        report.added,
        report.replaced
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::daily_quote;
    use crate::config::TimeRange;
    use crate::habits::{compute_stats, HabitLog, Schedule};
    use chrono::{DateTime, Utc};

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn make_item(name: &str, schedule: Schedule, entries: &[(&str, Status)]) -> HabitWithStats {
        let logs: HabitLog = entries.iter().map(|(d, s)| (date(d), *s)).collect();
        HabitWithStats {
            stats: compute_stats(&logs, date("2024-01-01"), date("2024-01-03")),
            habit: Habit {
                id: "0123456789abcdef".to_string(),
                name: name.to_string(),
                schedule,
                start_date: date("2024-01-01"),
                created_at: DateTime::<Utc>::default(),
                user_id: "local".to_string(),
            },
            logs,
        }
    }

    #[test]
    fn test_format_habits_pretty_empty_list() {
        let output = format_habits_pretty(&[], date("2024-01-03"));
        assert!(output.contains("Habits (0)"));
        assert!(output.contains("No habits yet"));
    }

    #[test]
    fn test_format_habits_pretty_icons() {
        let habits = vec![
            make_item("Read", Schedule::Daily, &[("2024-01-03", Status::Completed)]),
            make_item("Run", Schedule::Daily, &[("2024-01-03", Status::Missed)]),
            make_item("Yoga", Schedule::Weekends, &[]),
            make_item("Walk", Schedule::Daily, &[]),
        ];
        let output = format_habits_pretty(&habits, date("2024-01-03"));

        assert!(output.contains("Habits (4)"));
        assert!(output.contains("[x]"));
        assert!(output.contains("[!]"));
        assert!(output.contains(" - "));
        assert!(output.contains("[ ]"));
        assert!(output.contains("01234567"));
        assert!(!output.contains("0123456789"));
        assert!(output.contains("streak 1 day"));
    }

    #[test]
    fn test_format_habit_pretty() {
        let item = make_item(
            "Read",
            Schedule::custom([1, 3]).unwrap(),
            &[("2024-01-01", Status::Completed), ("2024-01-02", Status::Skipped)],
        );
        let output = format_habit_pretty(&item, date("2024-01-03"), 3);

        assert!(output.contains("Read"));
        assert!(output.contains("Mon, Wed"));
        assert!(output.contains("2024-01-01"));
        assert!(output.contains("[██████████░░░░░░░░░░] 50%"));
        assert!(output.contains("1 completed, 0 missed, 1 skipped"));
        assert!(output.contains("█~·"));
    }

    #[test]
    fn test_format_habit_pretty_without_heatmap() {
        let item = make_item("Read", Schedule::Daily, &[]);
        let output = format_habit_pretty(&item, date("2024-01-03"), 0);
        assert!(!output.contains("Last"));
    }

    #[test]
    fn test_format_status_pretty() {
        let item = make_item("Yoga", Schedule::Weekends, &[("2024-01-06", Status::Skipped)]);
        let output = format_status_pretty(&item, date("2024-01-06"));
        assert!(output.contains("skipped"));

        let output = format_status_pretty(&item, date("2024-01-03"));
        assert!(output.contains("untracked"));
        assert!(output.contains("(not due)"));
    }

    #[test]
    fn test_format_summary_pretty() {
        let habits = vec![
            make_item("Read", Schedule::Daily, &[("2024-01-03", Status::Completed)]),
            make_item("Run", Schedule::Daily, &[("2024-01-03", Status::Missed)]),
        ];
        let today = date("2024-01-03");
        let summary = Summary::calculate(&habits, today, TimeRange::Week);
        let quote = daily_quote(today);

        let output = format_summary_pretty(&summary, &habits, today, Some(&quote));
        assert!(output.contains(quote.author));
        assert!(output.contains("Overview"));
        assert!(output.contains("50%"));
        assert!(output.contains("Completion rate by habit"));
        assert!(output.contains("Read"));

        let output = format_summary_pretty(&summary, &habits, today, None);
        assert!(!output.contains(quote.author));
    }

    #[test]
    fn test_confirmations() {
        let item = make_item("Read", Schedule::Weekdays, &[]);
        assert!(format_created_pretty(&item).contains("weekdays starting 2024-01-01"));
        assert!(format_deleted_pretty(&item.habit).contains("Read"));

        let report = ImportReport { added: 2, replaced: 1 };
        assert!(format_import_pretty(&report).contains("2 new, 1 replaced"));
    }
}
