//! Analytics across habits.
//!
//! Provides the dashboard summary, terminal charts and the daily quote.

mod quotes;
pub mod summary;
pub mod visualization;

pub use quotes::{daily_quote, Quote};
pub use summary::{daily_completions, BestHabit, RecentWindow, Summary};
pub use visualization::{
    render_bar_chart, render_heatmap_strip, render_month_calendar, render_progress_bar,
    render_sparkline, render_week, status_glyph, HEATMAP_LEGEND,
};
