use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use route_estimator::{config, init_tracing, EstimatorError};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Initialize tracing/logging early
    init_tracing(args.verbose, args.log_json);

    if let Err(e) = run(args) {
        if let Some(err) = e.downcast_ref::<EstimatorError>() {
            tracing::error!(kind = err.kind(), error = %err, "Command failed");
        }
        return Err(e);
    }

    Ok(())
}

fn run(args: cli::Cli) -> Result<()> {
    let config_path = args.config.clone();
    let load = || {
        let cfg = config::load_config(config_path.as_deref())?;
        tracing::debug!(path = ?config_path, "Configuration loaded");
        Ok::<_, anyhow::Error>(cfg)
    };

    // Dispatch to appropriate command handler
    match args.command {
        cli::Commands::Estimate {
            distance_km,
            stops,
            mix,
        } => commands::estimate::execute(load()?, distance_km, stops, mix, args.format),
        cli::Commands::Compare {
            current_km,
            current_stops,
            optimized_km,
            optimized_stops,
        } => commands::compare::execute(
            load()?,
            (current_km, current_stops),
            (optimized_km, optimized_stops.unwrap_or(current_stops)),
            args.format,
        ),
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&load()?),
            cli::ConfigCommands::Validate => commands::config::validate(&load()?),
            // Writing defaults must work even when the current config is broken
            cli::ConfigCommands::Init { output, force } => commands::config::init(&output, force),
        },
        cli::Commands::Version => {
            println!("route-estimator v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
