//! Terminal visualization for habit logs.
//!
//! Plain-text charts: heatmap strips, calendars, bar charts and progress
//! bars. Color is applied by the output layer, not here.

use chrono::{Datelike, NaiveDate};

use crate::core::date::{month_grid, same_month, trailing_days, week_days, WeekStart};
use crate::habits::{rounded_percent, HabitLog, HabitWithStats, Status, DAY_NAMES};

/// Characters for sparkline rendering.
const BAR_CHARS: [char; 8] = [' ', '▁', '▂', '▃', '▄', '▅', '▆', '▇'];
const FULL_BLOCK: char = '█';
const LIGHT_SHADE: char = '░';

/// Legend for [`render_heatmap_strip`] and [`render_week`].
pub const HEATMAP_LEGEND: &str = "█ completed  ✗ missed  ~ skipped  · untracked";

/// Glyph for one day's entry.
#[must_use]
pub const fn status_glyph(status: Option<Status>) -> char {
    match status {
        Some(Status::Completed) => FULL_BLOCK,
        Some(Status::Missed) => '✗',
        Some(Status::Skipped) => '~',
        None => '·',
    }
}

/// Render the last `days` days ending at `today`, one glyph per day, oldest
/// first.
#[must_use]
pub fn render_heatmap_strip(log: &HabitLog, today: NaiveDate, days: usize) -> String {
    trailing_days(today, days)
        .into_iter()
        .map(|day| status_glyph(log.get(day)))
        .collect()
}

/// Weekday header cells in display order.
fn weekday_labels(week_start: WeekStart) -> Vec<&'static str> {
    let offset = match week_start {
        WeekStart::Sunday => 0,
        WeekStart::Monday => 1,
    };
    (0..7).map(|i| DAY_NAMES[(i + offset) % 7]).collect()
}

/// Render a six-week month calendar.
///
/// Each cell shows the day number followed by its status glyph; days of
/// neighbouring months are left blank and today is marked with `>`.
#[must_use]
pub fn render_month_calendar(
    log: &HabitLog,
    month: NaiveDate,
    today: NaiveDate,
    week_start: WeekStart,
) -> String {
    let mut lines = Vec::with_capacity(8);
    lines.push(format!("{:^28}", month.format("%B %Y").to_string()));

    lines.push(
        weekday_labels(week_start)
            .iter()
            .map(|label| format!("{:>3} ", &label[..2]))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    for week in month_grid(month, week_start).chunks(7) {
        let row: String = week
            .iter()
            .map(|day| {
                if !same_month(*day, month) {
                    return "    ".to_string();
                }
                let marker = if *day == today { '>' } else { ' ' };
                let glyph = match log.get(*day) {
                    None => ' ',
                    status => status_glyph(status),
                };
                format!("{marker}{:>2}{glyph}", day.day())
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    lines.join("\n")
}

/// Render one week as a table: a header of days, then one row per habit.
///
/// Days on which a habit is not due show a blank cell instead of `·`.
#[must_use]
pub fn render_week(habits: &[HabitWithStats], week_of: NaiveDate, week_start: WeekStart) -> String {
    let days = week_days(week_of, week_start);
    let name_width = habits
        .iter()
        .map(|h| h.habit.name.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(5, 20);

    let mut lines = Vec::with_capacity(habits.len() + 1);
    let header: String = weekday_labels(week_start)
        .iter()
        .zip(&days)
        .map(|(label, day)| format!(" {label} {:>2}", day.day()))
        .collect();
    lines.push(format!("{:width$}{header}", "", width = name_width));

    for item in habits {
        let cells: String = days
            .iter()
            .map(|day| {
                let status = item.logs.get(*day);
                let glyph = if status.is_none() && !item.habit.is_due_on(*day) {
                    ' '
                } else {
                    status_glyph(status)
                };
                format!("{glyph:^7}")
            })
            .collect();
        lines.push(format!("{}{cells}", truncate(&item.habit.name, name_width)));
    }

    lines
        .into_iter()
        .map(|l| l.trim_end().to_string())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pad or cut a label to exactly `width` characters.
fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() > width {
        let cut: String = label.chars().take(width.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        format!("{label:width$}")
    }
}

/// Render a horizontal bar chart.
///
/// # Arguments
///
/// * `data` - Vec of (label, value) pairs
/// * `max_label_width` - Maximum width for labels
/// * `bar_width` - Width of the bar portion
///
/// # Returns
///
/// A multi-line string with the chart.
#[must_use]
pub fn render_bar_chart(data: &[(String, usize)], max_label_width: usize, bar_width: usize) -> String {
    if data.is_empty() {
        return String::new();
    }

    let max_value = data.iter().map(|(_, v)| *v).max().unwrap_or(1).max(1);
    let mut lines = Vec::new();

    for (label, value) in data {
        let bar_length = (value * bar_width / max_value).min(bar_width);
        let bar = FULL_BLOCK.to_string().repeat(bar_length);
        let padding = " ".repeat(bar_width - bar_length);

        lines.push(format!("{} |{bar}{padding} {value}", truncate(label, max_label_width)));
    }

    lines.join("\n")
}

/// Render a sparkline (compact inline chart).
#[must_use]
pub fn render_sparkline(values: &[usize]) -> String {
    let max_value = values.iter().max().copied().unwrap_or(1).max(1);

    values
        .iter()
        .map(|&v| {
            if v == 0 {
                BAR_CHARS[0]
            } else {
                BAR_CHARS[(v * 7 / max_value).clamp(1, 7)]
            }
        })
        .collect()
}

/// Render a simple progress bar with a rounded percentage.
#[must_use]
pub fn render_progress_bar(current: usize, total: usize, width: usize) -> String {
    let current = current.min(total);
    let filled = if total == 0 { 0 } else { current * width / total };
    let empty = width - filled;

    format!(
        "[{}{}] {}%",
        FULL_BLOCK.to_string().repeat(filled),
        LIGHT_SHADE.to_string().repeat(empty),
        rounded_percent(current, total)
    )
}
