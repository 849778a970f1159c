use anyhow::Result;
use colored::Colorize;
use comfy_table::Cell;
use route_estimator::estimator::{RoadTypeMix, RouteEstimate, RouteInput};
use route_estimator::{Config, RouteCostEstimator};
use tracing::{debug, info};

use super::{format_hours, format_money, new_table};
use crate::cli::OutputFormat;

/// Execute the estimate command
///
/// # Arguments
/// * `cfg` - Loaded and validated configuration
/// * `distance_km` - Route distance reported by the directions provider
/// * `stops` - Number of stops on the route
/// * `mix` - Optional explicit road-type breakdown, bypassing the heuristic
pub fn execute(
    cfg: Config,
    distance_km: f64,
    stops: u32,
    mix: Option<RoadTypeMix>,
    format: OutputFormat,
) -> Result<()> {
    let estimator = RouteCostEstimator::new(cfg)?;
    let route = RouteInput::new(distance_km, stops)?;

    info!(distance_km, stops, explicit_mix = mix.is_some(), "Estimating route");
    let estimate = match mix {
        Some(mix) => estimator.estimate_with_mix(&route, mix)?,
        None => estimator.estimate(&route)?,
    };
    debug!(
        total_hours = estimate.time.total_hours,
        total_cost = estimate.cost.total_cost,
        "Estimate complete"
    );

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&estimate)?),
        OutputFormat::Text => print_estimate(&estimate),
    }

    Ok(())
}

fn print_estimate(estimate: &RouteEstimate) {
    println!(
        "{} {} km, {} stops",
        "Route:".green().bold(),
        estimate.input.distance_km,
        estimate.input.stop_count
    );
    println!();

    let mut mix_table = new_table(&["ROAD TYPE", "SHARE", "KM"]);
    for (road_type, km) in estimate.mix.split(estimate.input.distance_km) {
        mix_table.add_row(vec![
            Cell::new(road_type),
            Cell::new(format!("{:.1}%", estimate.mix.fraction(road_type) * 100.0)),
            Cell::new(format!("{:.1}", km)),
        ]);
    }
    println!("{}", "Road Type Mix:".bold());
    println!("{}", mix_table);
    println!();

    let time = &estimate.time;
    let mut time_table = new_table(&["COMPONENT", "TIME"]);
    time_table.add_row(vec![Cell::new("Driving (free flow)"), Cell::new(format_hours(time.base_hours))]);
    time_table.add_row(vec![
        Cell::new("Driving (with traffic)"),
        Cell::new(format_hours(time.traffic_adjusted_hours)),
    ]);
    time_table.add_row(vec![Cell::new("Stops"), Cell::new(format_hours(time.stop_overhead_hours))]);
    time_table.add_row(vec![
        Cell::new(format!("Rest breaks ({})", time.rest_periods)),
        Cell::new(format_hours(time.rest_overhead_hours)),
    ]);
    time_table.add_row(vec![
        Cell::new("Total").fg(comfy_table::Color::Green),
        Cell::new(format_hours(time.total_hours)).fg(comfy_table::Color::Green),
    ]);
    println!("{}", "Travel Time:".bold());
    println!("{}", time_table);
    println!();

    let cost = &estimate.cost;
    let mut cost_table = new_table(&["COMPONENT", "AMOUNT"]);
    cost_table.add_row(vec![
        Cell::new(format!("Fuel ({:.1} L)", cost.fuel_liters)),
        Cell::new(format_money(cost.fuel_cost)),
    ]);
    cost_table.add_row(vec![Cell::new("Maintenance"), Cell::new(format_money(cost.maintenance_cost))]);
    if let Some(driver) = cost.driver_cost {
        cost_table.add_row(vec![Cell::new("Driver"), Cell::new(format_money(driver))]);
    }
    cost_table.add_row(vec![
        Cell::new("Total").fg(comfy_table::Color::Green),
        Cell::new(format_money(cost.total_cost)).fg(comfy_table::Color::Green),
    ]);
    println!("{}", "Operating Cost:".bold());
    println!("{}", cost_table);
}
