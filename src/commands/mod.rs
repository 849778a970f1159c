//! Command implementations for the CLI
//!
//! - estimate: Estimate time and cost for a single route
//! - compare: Compare a current route with an optimized one
//! - config: Configuration display, validation and initialization

pub mod compare;
pub mod config;
pub mod estimate;

use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Render hours as `2h 05min`
pub fn format_hours(hours: f64) -> String {
    let total_minutes = (hours * 60.0).round() as i64;
    let sign = if total_minutes < 0 { "-" } else { "" };
    let total_minutes = total_minutes.abs();
    format!("{}{}h {:02}min", sign, total_minutes / 60, total_minutes % 60)
}

pub fn format_money(amount: f64) -> String {
    format!("{:.2}", amount)
}

pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(pct) => format!("{:+.1}%", pct),
        None => "n/a".to_string(),
    }
}

/// Table with the look shared by every command
pub(crate) fn new_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}
