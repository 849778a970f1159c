use crate::config::Config;
use crate::error::Result;
use crate::estimator::models::{validate_distance, CostEstimate, RoadTypeMix};

/// Estimate fuel and maintenance cost for a route.
///
/// Driver time is not included; see [`CostEstimate::with_driver_cost`].
pub(crate) fn estimate_cost(distance_km: f64, mix: &RoadTypeMix, config: &Config) -> Result<CostEstimate> {
    validate_distance(distance_km)?;
    let vehicle = &config.vehicle;

    let fuel_liters: f64 = mix
        .split(distance_km)
        .map(|(road_type, km)| km / vehicle.km_per_liter.get(road_type))
        .sum();

    let mut breakdown = CostEstimate {
        fuel_liters,
        fuel_cost: fuel_liters * vehicle.fuel_price_per_liter,
        maintenance_cost: distance_km * vehicle.maintenance_cost_per_km,
        driver_cost: None,
        total_cost: 0.0,
    };
    breakdown.calculate_total();

    Ok(breakdown)
}
