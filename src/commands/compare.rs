use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use route_estimator::estimator::{RouteComparison, RouteEstimate, RouteInput};
use route_estimator::{Config, RouteCostEstimator};
use serde::Serialize;
use tracing::info;

use super::{format_hours, format_money, format_percent, new_table};
use crate::cli::OutputFormat;

#[derive(Serialize)]
struct ComparisonReport<'a> {
    current: &'a RouteEstimate,
    optimized: &'a RouteEstimate,
    comparison: &'a RouteComparison,
}

/// Execute the compare command
///
/// Deltas are reported as current minus optimized, so positive numbers are
/// what the optimized route saves.
pub fn execute(
    cfg: Config,
    current: (f64, u32),
    optimized: (f64, u32),
    format: OutputFormat,
) -> Result<()> {
    let estimator = RouteCostEstimator::new(cfg)?;
    let current = RouteInput::new(current.0, current.1)?;
    let optimized = RouteInput::new(optimized.0, optimized.1)?;

    info!(
        current_km = current.distance_km,
        optimized_km = optimized.distance_km,
        "Comparing routes"
    );
    let (current, optimized, comparison) = estimator.compare(&current, &optimized)?;

    match format {
        OutputFormat::Json => {
            let report = ComparisonReport {
                current: &current,
                optimized: &optimized,
                comparison: &comparison,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Text => print_comparison(&current, &optimized, &comparison),
    }

    Ok(())
}

fn print_comparison(current: &RouteEstimate, optimized: &RouteEstimate, cmp: &RouteComparison) {
    let mut table = new_table(&["", "CURRENT", "OPTIMIZED", "DIFFERENCE", "CHANGE"]);
    table.add_row(vec![
        Cell::new("Distance"),
        Cell::new(format!("{:.1} km", current.input.distance_km)),
        Cell::new(format!("{:.1} km", optimized.input.distance_km)),
        Cell::new(format!("{:.1} km", cmp.distance_delta_km)),
        Cell::new(format_percent(cmp.percentages.distance)),
    ]);
    table.add_row(vec![
        Cell::new("Time"),
        Cell::new(format_hours(current.time.total_hours)),
        Cell::new(format_hours(optimized.time.total_hours)),
        Cell::new(format_hours(cmp.time_delta_hours)),
        Cell::new(format_percent(cmp.percentages.time)),
    ]);
    table.add_row(vec![
        Cell::new("Cost"),
        Cell::new(format_money(current.cost.total_cost)),
        Cell::new(format_money(optimized.cost.total_cost)),
        Cell::new(format_money(cmp.cost_delta)),
        Cell::new(format_percent(cmp.percentages.cost)),
    ]);

    println!("{}", "Route Comparison:".green().bold());
    println!("{}", table);
    println!();

    if cmp.cost_delta > 0.0 {
        println!(
            "{} {} ({}) per trip",
            "✓ Optimized route saves".green(),
            format_money(cmp.cost_delta),
            format_hours(cmp.time_delta_hours)
        );
    } else if cmp.cost_delta < 0.0 {
        println!(
            "{} {} per trip",
            "✗ Optimized route costs".red(),
            format_money(-cmp.cost_delta)
        );
    } else {
        println!("{}", "Both routes cost the same".yellow());
    }
}
