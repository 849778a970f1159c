use crate::error::{EstimatorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when checking that a road-type mix sums to one
pub const MIX_SUM_TOLERANCE: f64 = 1e-6;

/// Road class a share of the route is driven on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadType {
    Highway,
    StateRoad,
    Urban,
    Rural,
}

impl RoadType {
    pub const ALL: [RoadType; 4] = [
        RoadType::Highway,
        RoadType::StateRoad,
        RoadType::Urban,
        RoadType::Rural,
    ];

    /// Key used in config files and on the command line
    pub fn key(self) -> &'static str {
        match self {
            Self::Highway => "highway",
            Self::StateRoad => "state_road",
            Self::Urban => "urban",
            Self::Rural => "rural",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::Highway => "Highway",
            Self::StateRoad => "State road",
            Self::Urban => "Urban",
            Self::Rural => "Rural",
        }
    }
}

impl fmt::Display for RoadType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One value per road class (speeds, consumption, bracket base mixes)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerRoadType {
    pub highway: f64,
    pub state_road: f64,
    pub urban: f64,
    pub rural: f64,
}

impl PerRoadType {
    pub const fn new(highway: f64, state_road: f64, urban: f64, rural: f64) -> Self {
        Self {
            highway,
            state_road,
            urban,
            rural,
        }
    }

    pub fn get(&self, road_type: RoadType) -> f64 {
        match road_type {
            RoadType::Highway => self.highway,
            RoadType::StateRoad => self.state_road,
            RoadType::Urban => self.urban,
            RoadType::Rural => self.rural,
        }
    }

    /// Values in `RoadType::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (RoadType, f64)> + '_ {
        RoadType::ALL.into_iter().map(move |t| (t, self.get(t)))
    }

    pub fn sum(&self) -> f64 {
        self.highway + self.state_road + self.urban + self.rural
    }
}

/// Share of a route's distance driven on each road class.
///
/// Always non-negative and summing to 1 within [`MIX_SUM_TOLERANCE`]. The
/// only ways to obtain one are [`RoadTypeMix::new`], deserialization (which
/// runs the same checks) and the estimator itself.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PerRoadType", into = "PerRoadType")]
pub struct RoadTypeMix {
    fractions: PerRoadType,
}

impl RoadTypeMix {
    /// Build a mix from explicit fractions, rejecting anything that is not a
    /// proper distribution
    pub fn new(highway: f64, state_road: f64, urban: f64, rural: f64) -> Result<Self> {
        Self::try_from(PerRoadType::new(highway, state_road, urban, rural))
    }

    /// Scale raw non-negative weights so they sum exactly to one.
    pub(crate) fn normalized(weights: PerRoadType) -> Self {
        let total = weights.sum();
        Self {
            fractions: PerRoadType::new(
                weights.highway / total,
                weights.state_road / total,
                weights.urban / total,
                weights.rural / total,
            ),
        }
    }

    pub fn highway(&self) -> f64 {
        self.fractions.highway
    }

    pub fn state_road(&self) -> f64 {
        self.fractions.state_road
    }

    pub fn urban(&self) -> f64 {
        self.fractions.urban
    }

    pub fn rural(&self) -> f64 {
        self.fractions.rural
    }

    pub fn fraction(&self, road_type: RoadType) -> f64 {
        self.fractions.get(road_type)
    }

    pub fn fractions(&self) -> &PerRoadType {
        &self.fractions
    }

    /// Kilometres driven on each road class for a route of `distance_km`
    pub fn split(&self, distance_km: f64) -> impl Iterator<Item = (RoadType, f64)> + '_ {
        self.fractions
            .iter()
            .map(move |(t, share)| (t, distance_km * share))
    }
}

impl TryFrom<PerRoadType> for RoadTypeMix {
    type Error = EstimatorError;

    fn try_from(fractions: PerRoadType) -> Result<Self> {
        for (road_type, share) in fractions.iter() {
            if !share.is_finite() || !(0.0..=1.0).contains(&share) {
                return Err(EstimatorError::invalid(format!(
                    "road type mix fraction '{}' must be within [0, 1], got {}",
                    road_type.key(),
                    share
                )));
            }
        }

        let total = fractions.sum();
        if (total - 1.0).abs() > MIX_SUM_TOLERANCE {
            return Err(EstimatorError::invalid(format!(
                "road type mix must sum to 1.0, got {}",
                total
            )));
        }

        Ok(Self { fractions })
    }
}

impl From<RoadTypeMix> for PerRoadType {
    fn from(mix: RoadTypeMix) -> Self {
        mix.fractions
    }
}

/// Distance and stop count for one route, as reported by the directions
/// provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteInput {
    pub distance_km: f64,
    pub stop_count: u32,
}

impl RouteInput {
    pub fn new(distance_km: f64, stop_count: u32) -> Result<Self> {
        validate_distance(distance_km)?;
        Ok(Self {
            distance_km,
            stop_count,
        })
    }
}

pub(crate) fn validate_distance(distance_km: f64) -> Result<()> {
    if !distance_km.is_finite() || distance_km <= 0.0 {
        return Err(EstimatorError::invalid(format!(
            "distance_km must be a finite number > 0, got {}",
            distance_km
        )));
    }
    Ok(())
}

/// Travel time breakdown, all values in hours
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeEstimate {
    /// Free-flow driving time
    pub base_hours: f64,
    /// Driving time after the flat congestion factor
    pub traffic_adjusted_hours: f64,
    pub stop_overhead_hours: f64,
    /// Mandatory breaks taken during the drive
    pub rest_periods: u64,
    pub rest_overhead_hours: f64,
    pub total_hours: f64,
}

/// Operating cost breakdown for a route
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CostEstimate {
    pub fuel_liters: f64,
    pub fuel_cost: f64,
    pub maintenance_cost: f64,
    /// Only present when a driver hourly rate is configured
    pub driver_cost: Option<f64>,
    pub total_cost: f64,
}

impl CostEstimate {
    /// Add the driver's wage for `total_hours` at `rate_per_hour`.
    ///
    /// Both values must be non-negative; NaN is rejected in debug builds.
    pub fn with_driver_cost(mut self, total_hours: f64, rate_per_hour: f64) -> Self {
        debug_assert!(
            total_hours >= 0.0,
            "driver hours must be non-negative, got {}",
            total_hours
        );
        debug_assert!(
            rate_per_hour >= 0.0,
            "driver rate must be non-negative, got {}",
            rate_per_hour
        );
        self.driver_cost = Some(total_hours * rate_per_hour);
        self.calculate_total();
        self
    }

    /// Calculate total cost from components
    pub fn calculate_total(&mut self) {
        self.total_cost =
            self.fuel_cost + self.maintenance_cost + self.driver_cost.unwrap_or(0.0);
    }
}

/// Everything the estimator derives for one route
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteEstimate {
    pub input: RouteInput,
    pub mix: RoadTypeMix,
    pub time: TimeEstimate,
    pub cost: CostEstimate,
}

impl RouteEstimate {
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            distance_km: self.input.distance_km,
            time: self.time,
            cost: self.cost,
        }
    }
}

/// One side of a route comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteSummary {
    pub distance_km: f64,
    pub time: TimeEstimate,
    pub cost: CostEstimate,
}

/// Relative differences, in percent of the first route. `None` when the
/// first route's quantity is zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonPercentages {
    pub distance: Option<f64>,
    pub time: Option<f64>,
    pub cost: Option<f64>,
}

/// Differences between two routes; positive means the first route is larger
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteComparison {
    pub distance_delta_km: f64,
    pub time_delta_hours: f64,
    pub cost_delta: f64,
    pub percentages: ComparisonPercentages,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mix_rejects_bad_sum() {
        let err = RoadTypeMix::new(0.5, 0.0, 0.6, 0.0).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidArgument(_)));
        assert!(err.to_string().contains("sum to 1.0"));
    }

    #[test]
    fn test_mix_rejects_negative_fraction() {
        let err = RoadTypeMix::new(1.2, -0.2, 0.0, 0.0).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidArgument(_)));
    }

    #[test]
    fn test_mix_rejects_nan() {
        assert!(RoadTypeMix::new(f64::NAN, 0.5, 0.5, 0.0).is_err());
    }

    #[test]
    fn test_mix_accepts_within_tolerance() {
        let mix = RoadTypeMix::new(0.25, 0.25, 0.25, 0.25 + 1e-9).unwrap();
        assert_eq!(mix.highway(), 0.25);
        assert_eq!(mix.fraction(RoadType::Urban), 0.25);
    }

    #[test]
    fn test_mix_deserialize_validates() {
        let ok: RoadTypeMix =
            serde_json::from_str(r#"{"highway":0.4,"state_road":0.3,"urban":0.2,"rural":0.1}"#)
                .unwrap();
        assert_eq!(ok.rural(), 0.1);

        let bad = serde_json::from_str::<RoadTypeMix>(
            r#"{"highway":0.5,"state_road":0.0,"urban":0.6,"rural":0.0}"#,
        );
        assert!(bad.is_err());
    }

    #[test]
    fn test_mix_serializes_flat() {
        let mix = RoadTypeMix::new(1.0, 0.0, 0.0, 0.0).unwrap();
        let json = serde_json::to_value(mix).unwrap();
        assert_eq!(json["highway"], 1.0);
        assert_eq!(json["urban"], 0.0);
    }

    #[test]
    fn test_mix_split() {
        let mix = RoadTypeMix::new(0.5, 0.25, 0.25, 0.0).unwrap();
        let km: Vec<(RoadType, f64)> = mix.split(100.0).collect();
        assert_eq!(km[0], (RoadType::Highway, 50.0));
        assert_eq!(km[1], (RoadType::StateRoad, 25.0));
        assert_eq!(km[3], (RoadType::Rural, 0.0));
    }

    #[test]
    fn test_route_input_validation() {
        assert!(RouteInput::new(12.5, 3).is_ok());
        assert!(matches!(
            RouteInput::new(0.0, 0),
            Err(EstimatorError::InvalidArgument(_))
        ));
        assert!(RouteInput::new(-4.0, 0).is_err());
        assert!(RouteInput::new(f64::INFINITY, 0).is_err());
    }

    #[test]
    fn test_cost_total_with_driver() {
        let mut cost = CostEstimate {
            fuel_liters: 10.0,
            fuel_cost: 60.0,
            maintenance_cost: 25.0,
            driver_cost: None,
            total_cost: 0.0,
        };
        cost.calculate_total();
        assert_eq!(cost.total_cost, 85.0);

        let with_driver = cost.with_driver_cost(2.0, 30.0);
        assert_eq!(with_driver.driver_cost, Some(60.0));
        assert_eq!(with_driver.total_cost, 145.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "driver hours must be non-negative")]
    fn test_driver_cost_rejects_negative_hours() {
        CostEstimate::default().with_driver_cost(-1.0, 30.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "driver rate must be non-negative")]
    fn test_driver_cost_rejects_nan_rate() {
        CostEstimate::default().with_driver_cost(2.0, f64::NAN);
    }
}
