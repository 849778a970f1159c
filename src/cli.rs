use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use route_estimator::error::EstimatorError;
use route_estimator::estimator::{PerRoadType, RoadType, RoadTypeMix};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "route-estimator", version, about = "Route time and cost estimator")]
pub struct Cli {
    /// Configuration file path (defaults to ./route-estimator.toml when present)
    #[arg(short, long, global = true, env = "ROUTE_ESTIMATOR_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Estimate travel time and cost for one route
    Estimate {
        /// Total route distance in kilometres
        #[arg(short, long)]
        distance_km: f64,

        /// Number of delivery/visit stops
        #[arg(short, long, default_value = "0")]
        stops: u32,

        /// Explicit road-type mix, e.g. highway=0.5,state-road=0.2,urban=0.3,rural=0
        #[arg(long, value_parser = parse_mix)]
        mix: Option<RoadTypeMix>,
    },

    /// Compare the current route against an optimized one
    Compare {
        /// Distance of the current route in kilometres
        #[arg(long)]
        current_km: f64,

        /// Stops on the current route
        #[arg(long, default_value = "0")]
        current_stops: u32,

        /// Distance of the optimized route in kilometres
        #[arg(long)]
        optimized_km: f64,

        /// Stops on the optimized route (defaults to the current route's)
        #[arg(long)]
        optimized_stops: Option<u32>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate the configuration
    Validate,

    /// Write the default configuration to a file
    Init {
        /// Destination file
        #[arg(short, long, default_value = "route-estimator.toml")]
        output: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse `highway=0.5,state-road=0.2,urban=0.3,rural=0` into a validated mix.
///
/// Road types that are not mentioned count as zero.
pub fn parse_mix(raw: &str) -> Result<RoadTypeMix, EstimatorError> {
    let mut fractions = PerRoadType::new(0.0, 0.0, 0.0, 0.0);

    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (key, value) = part.split_once('=').ok_or_else(|| {
            EstimatorError::InvalidArgument(format!("expected key=value, got '{}'", part))
        })?;
        let value: f64 = value.trim().parse().map_err(|_| {
            EstimatorError::InvalidArgument(format!("'{}' is not a number", value.trim()))
        })?;

        let road_type = match key.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "highway" => RoadType::Highway,
            "state_road" | "state" => RoadType::StateRoad,
            "urban" => RoadType::Urban,
            "rural" => RoadType::Rural,
            other => {
                return Err(EstimatorError::InvalidArgument(format!(
                    "unknown road type '{}'; expected highway, state-road, urban or rural",
                    other
                )))
            }
        };

        match road_type {
            RoadType::Highway => fractions.highway = value,
            RoadType::StateRoad => fractions.state_road = value,
            RoadType::Urban => fractions.urban = value,
            RoadType::Rural => fractions.rural = value,
        }
    }

    RoadTypeMix::try_from(fractions)
}
