use crate::error::{EstimatorError, Result};
use crate::estimator::models::{PerRoadType, MIX_SUM_TOLERANCE};
use crate::estimator::road_mix::{donor_share, highway_share_after};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `ROUTE_ESTIMATOR__VEHICLE__FUEL_PRICE_PER_LITER`
pub const ENV_PREFIX: &str = "ROUTE_ESTIMATOR";

/// File looked up in the working directory when no `--config` is given
pub const DEFAULT_CONFIG_NAME: &str = "route-estimator";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub travel: TravelConfig,
    pub vehicle: VehicleConfig,
    pub road_mix: RoadMixConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TravelConfig {
    /// Flat congestion multiplier applied to free-flow driving time
    pub traffic_factor: f64,
    pub stop_dwell_minutes: f64,
    /// Driving hours between mandatory breaks
    pub rest_interval_hours: f64,
    pub rest_duration_minutes: f64,
    /// Average speed per road class, km/h
    pub speed_kmh: PerRoadType,
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            traffic_factor: 1.1,
            stop_dwell_minutes: 15.0,
            rest_interval_hours: 4.0,
            rest_duration_minutes: 30.0,
            speed_kmh: PerRoadType::new(90.0, 70.0, 40.0, 50.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct VehicleConfig {
    pub fuel_price_per_liter: f64,
    pub maintenance_cost_per_km: f64,
    /// Driver wage; when unset, driver time is not costed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driver_cost_per_hour: Option<f64>,
    /// Fuel economy per road class, km per liter
    pub km_per_liter: PerRoadType,
}

impl Default for VehicleConfig {
    fn default() -> Self {
        Self {
            fuel_price_per_liter: 6.0,
            maintenance_cost_per_km: 0.25,
            driver_cost_per_hour: None,
            km_per_liter: PerRoadType::new(12.0, 10.0, 8.0, 9.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RoadMixConfig {
    /// Urban share gained per stop beyond the first
    pub stop_urban_step: f64,
    /// Upper bound on the urban share gained from stops
    pub stop_urban_cap: f64,
    /// Highway and state-road shares are never pushed below this
    pub min_fraction: f64,
    /// Base mixes by distance, ascending; the last one is open-ended
    pub brackets: Vec<MixBracket>,
}

impl Default for RoadMixConfig {
    fn default() -> Self {
        Self {
            stop_urban_step: 0.05,
            stop_urban_cap: 0.3,
            min_fraction: 0.05,
            brackets: vec![
                MixBracket::up_to(30.0, PerRoadType::new(0.05, 0.15, 0.65, 0.15)),
                MixBracket::up_to(100.0, PerRoadType::new(0.30, 0.35, 0.30, 0.05)),
                MixBracket::up_to(300.0, PerRoadType::new(0.45, 0.30, 0.15, 0.10)),
                MixBracket::open(PerRoadType::new(0.65, 0.20, 0.10, 0.05)),
            ],
        }
    }
}

/// Base road-type mix for routes shorter than `max_km`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MixBracket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_km: Option<f64>,
    pub mix: PerRoadType,
}

impl MixBracket {
    pub fn up_to(max_km: f64, mix: PerRoadType) -> Self {
        Self {
            max_km: Some(max_km),
            mix,
        }
    }

    pub fn open(mix: PerRoadType) -> Self {
        Self { max_km: None, mix }
    }

    pub fn contains(&self, distance_km: f64) -> bool {
        self.max_km.map_or(true, |max| distance_km < max)
    }
}

impl Config {
    /// Check every constant the model divides by or multiplies with.
    pub fn validate(&self) -> Result<()> {
        validate_config(self)
    }

    /// Render as TOML with a short header, as written by `config init`
    pub fn to_toml(&self) -> anyhow::Result<String> {
        let body = toml::to_string_pretty(self)?;
        Ok(format!(
            "# route-estimator configuration\n\
             # Any key can be overridden with {ENV_PREFIX}__<SECTION>__<KEY>\n\n{body}"
        ))
    }
}

/// Load configuration from defaults, an optional TOML file and the environment.
///
/// An explicit `path` must exist. Without one, `route-estimator.toml` in the
/// working directory is used when present.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let builder = config::Config::builder();
    let builder = match path {
        Some(path) => builder.add_source(config::File::from(path).required(true)),
        None => builder.add_source(config::File::with_name(DEFAULT_CONFIG_NAME).required(false)),
    };

    let settings = builder
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let cfg: Config = settings.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn require_positive(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(EstimatorError::config(format!(
            "{} must be > 0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(EstimatorError::config(format!(
            "{} must be >= 0, got {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_config(cfg: &Config) -> Result<()> {
    let travel = &cfg.travel;
    for (road_type, speed) in travel.speed_kmh.iter() {
        require_positive(&format!("travel.speed_kmh.{}", road_type.key()), speed)?;
    }
    if !travel.traffic_factor.is_finite() || travel.traffic_factor < 1.0 {
        return Err(EstimatorError::config(format!(
            "travel.traffic_factor must be >= 1.0, got {}",
            travel.traffic_factor
        )));
    }
    require_non_negative("travel.stop_dwell_minutes", travel.stop_dwell_minutes)?;
    require_positive("travel.rest_interval_hours", travel.rest_interval_hours)?;
    require_non_negative("travel.rest_duration_minutes", travel.rest_duration_minutes)?;

    let vehicle = &cfg.vehicle;
    for (road_type, economy) in vehicle.km_per_liter.iter() {
        require_positive(&format!("vehicle.km_per_liter.{}", road_type.key()), economy)?;
    }
    require_non_negative("vehicle.fuel_price_per_liter", vehicle.fuel_price_per_liter)?;
    require_non_negative(
        "vehicle.maintenance_cost_per_km",
        vehicle.maintenance_cost_per_km,
    )?;
    if let Some(rate) = vehicle.driver_cost_per_hour {
        require_non_negative("vehicle.driver_cost_per_hour", rate)?;
    }

    validate_road_mix(&cfg.road_mix)
}

fn validate_road_mix(road_mix: &RoadMixConfig) -> Result<()> {
    require_non_negative("road_mix.stop_urban_step", road_mix.stop_urban_step)?;
    if !(0.0..=1.0).contains(&road_mix.stop_urban_cap) {
        return Err(EstimatorError::config(format!(
            "road_mix.stop_urban_cap must be within [0, 1], got {}",
            road_mix.stop_urban_cap
        )));
    }
    if !(0.0..=0.25).contains(&road_mix.min_fraction) {
        return Err(EstimatorError::config(format!(
            "road_mix.min_fraction must be within [0, 0.25], got {}",
            road_mix.min_fraction
        )));
    }

    let brackets = &road_mix.brackets;
    let Some(last) = brackets.last() else {
        return Err(EstimatorError::config(
            "road_mix.brackets must contain at least one bracket",
        ));
    };
    if last.max_km.is_some() {
        return Err(EstimatorError::config(
            "the last road_mix bracket must be open-ended (no max_km)",
        ));
    }

    let mut previous: Option<&MixBracket> = None;
    for (idx, bracket) in brackets.iter().enumerate() {
        let name = format!("road_mix.brackets[{}]", idx);

        if idx + 1 < brackets.len() {
            match bracket.max_km {
                Some(max) => require_positive(&format!("{}.max_km", name), max)?,
                None => {
                    return Err(EstimatorError::config(format!(
                        "{} needs a max_km; only the last bracket may be open-ended",
                        name
                    )))
                }
            }
        }

        for (road_type, share) in bracket.mix.iter() {
            if !share.is_finite() || !(0.0..=1.0).contains(&share) {
                return Err(EstimatorError::config(format!(
                    "{}.mix.{} must be within [0, 1], got {}",
                    name,
                    road_type.key(),
                    share
                )));
            }
        }
        let total = bracket.mix.sum();
        if (total - 1.0).abs() > MIX_SUM_TOLERANCE {
            return Err(EstimatorError::config(format!(
                "{}.mix must sum to 1.0, got {}",
                name, total
            )));
        }

        if let Some(prev) = previous {
            if let (Some(prev_max), Some(max)) = (prev.max_km, bracket.max_km) {
                if max <= prev_max {
                    return Err(EstimatorError::config(format!(
                        "{}.max_km ({}) must be greater than the previous bracket's ({})",
                        name, max, prev_max
                    )));
                }
            }
            check_highway_order(&prev.mix, &bracket.mix, road_mix, &name)?;
        }
        previous = Some(bracket);
    }

    Ok(())
}

/// Highway share must not drop from one bracket to the next, with or without
/// stops. The shifted share is piecewise linear in the urban bump, so checking
/// the ends of the reachable range and the points where either bracket runs out
/// of donor share covers every stop count.
fn check_highway_order(
    prev: &PerRoadType,
    next: &PerRoadType,
    road_mix: &RoadMixConfig,
    name: &str,
) -> Result<()> {
    let floor = road_mix.min_fraction;
    let max_bump = if road_mix.stop_urban_step > 0.0 {
        road_mix.stop_urban_cap
    } else {
        0.0
    };

    let candidates = [
        0.0,
        max_bump,
        donor_share(prev, floor),
        donor_share(next, floor),
    ];
    for bump in candidates.into_iter().filter(|bump| *bump <= max_bump) {
        let before = highway_share_after(*prev, bump, floor);
        let after = highway_share_after(*next, bump, floor);
        if after < before {
            return Err(EstimatorError::config(format!(
                "{}.mix.highway must not decrease with distance \
                 (drops from {:.4} to {:.4} once stops move {:.2} into urban)",
                name, before, after, bump
            )));
        }
    }
    Ok(())
}
