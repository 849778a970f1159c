use anyhow::{Context, Result};
use colored::Colorize;
use route_estimator::config::{Config, MixBracket};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Prints the effective configuration (defaults, file and environment merged)
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying effective configuration");
    println!("{}", cfg.to_toml()?);
    Ok(())
}

/// Execute the config validate command
pub fn validate(cfg: &Config) -> Result<()> {
    cfg.validate()?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!(
        "  {}: highway {} / state road {} / urban {} / rural {} km/h",
        "Speeds".cyan(),
        cfg.travel.speed_kmh.highway,
        cfg.travel.speed_kmh.state_road,
        cfg.travel.speed_kmh.urban,
        cfg.travel.speed_kmh.rural
    );
    println!("  {}: x{}", "Traffic Factor".cyan(), cfg.travel.traffic_factor);
    println!(
        "  {}: {} min every {} h",
        "Rest Breaks".cyan(),
        cfg.travel.rest_duration_minutes,
        cfg.travel.rest_interval_hours
    );
    println!(
        "  {}: {:.2}/L",
        "Fuel Price".cyan(),
        cfg.vehicle.fuel_price_per_liter
    );
    match cfg.vehicle.driver_cost_per_hour {
        Some(rate) => println!("  {}: {:.2}/h", "Driver Cost".cyan(), rate),
        None => println!("  {}: {}", "Driver Cost".cyan(), "not included".dimmed()),
    }
    println!(
        "  {}: {}",
        "Distance Brackets".cyan(),
        describe_brackets(&cfg.road_mix.brackets)
    );

    info!("Configuration validation successful");
    Ok(())
}

/// Execute the config init command
///
/// Writes the built-in defaults so they can be edited
pub fn init(output: &Path, force: bool) -> Result<()> {
    if output.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            output.display()
        );
    }

    let contents = Config::default().to_toml()?;
    std::fs::write(output, contents)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    info!(path = %output.display(), "Wrote default configuration");
    println!(
        "{} {}",
        "✓ Default configuration written to".green(),
        output.display()
    );
    Ok(())
}

/// Bracket boundaries as `<30 | <100 | <300 | 300+`
fn describe_brackets(brackets: &[MixBracket]) -> String {
    let mut parts = Vec::with_capacity(brackets.len());
    let mut lower = 0.0;
    for bracket in brackets {
        match bracket.max_km {
            Some(max) => {
                parts.push(format!("<{}", max));
                lower = max;
            }
            None => parts.push(format!("{}+", lower)),
        }
    }
    parts.join(" | ")
}
