pub mod comparison;
mod cost;
pub mod models;
pub mod road_mix;
mod time;

pub use comparison::compare_routes;
pub use models::{
    ComparisonPercentages, CostEstimate, PerRoadType, RoadType, RoadTypeMix, RouteComparison,
    RouteEstimate, RouteInput, RouteSummary, TimeEstimate,
};

use crate::config::Config;
use crate::error::Result;

/// Route time and cost model bound to a validated configuration
#[derive(Debug, Clone)]
pub struct RouteCostEstimator {
    config: Config,
}

impl RouteCostEstimator {
    /// Create an estimator, refusing configurations that would produce
    /// infinite or meaningless numbers
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn road_type_mix(&self, distance_km: f64, stop_count: u32) -> Result<RoadTypeMix> {
        road_mix::estimate_road_type_mix(distance_km, stop_count, &self.config)
    }

    pub fn travel_time(
        &self,
        distance_km: f64,
        mix: &RoadTypeMix,
        stop_count: u32,
    ) -> Result<TimeEstimate> {
        time::estimate_travel_time(distance_km, mix, stop_count, &self.config)
    }

    pub fn cost(&self, distance_km: f64, mix: &RoadTypeMix) -> Result<CostEstimate> {
        cost::estimate_cost(distance_km, mix, &self.config)
    }

    /// Run the whole model: road-type mix, travel time, then cost.
    pub fn estimate(&self, route: &RouteInput) -> Result<RouteEstimate> {
        let mix = self.road_type_mix(route.distance_km, route.stop_count)?;
        self.estimate_with_mix(route, mix)
    }

    /// Same as [`estimate`](Self::estimate) but with a caller-supplied
    /// road-type breakdown
    pub fn estimate_with_mix(&self, route: &RouteInput, mix: RoadTypeMix) -> Result<RouteEstimate> {
        let time = self.travel_time(route.distance_km, &mix, route.stop_count)?;
        let mut cost = self.cost(route.distance_km, &mix)?;
        if let Some(rate) = self.config.vehicle.driver_cost_per_hour {
            cost = cost.with_driver_cost(time.total_hours, rate);
        }

        Ok(RouteEstimate {
            input: *route,
            mix,
            time,
            cost,
        })
    }

    /// Estimate the current and the optimized route and compare them
    pub fn compare(
        &self,
        current: &RouteInput,
        optimized: &RouteInput,
    ) -> Result<(RouteEstimate, RouteEstimate, RouteComparison)> {
        let current = self.estimate(current)?;
        let optimized = self.estimate(optimized)?;
        let comparison = compare_routes(&current.summary(), &optimized.summary());
        Ok((current, optimized, comparison))
    }
}
