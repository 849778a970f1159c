use crate::config::Config;
use crate::error::Result;
use crate::estimator::models::{validate_distance, RoadTypeMix, TimeEstimate};

/// Estimate driving time plus stop and rest overhead.
///
/// Congestion is a flat multiplier on free-flow time, not time-of-day aware.
/// Rest breaks are counted on the congested driving time only.
pub(crate) fn estimate_travel_time(
    distance_km: f64,
    mix: &RoadTypeMix,
    stop_count: u32,
    config: &Config,
) -> Result<TimeEstimate> {
    validate_distance(distance_km)?;
    let travel = &config.travel;

    let base_hours: f64 = mix
        .split(distance_km)
        .map(|(road_type, km)| km / travel.speed_kmh.get(road_type))
        .sum();
    let traffic_adjusted_hours = base_hours * travel.traffic_factor;

    let stop_overhead_hours = f64::from(stop_count) * travel.stop_dwell_minutes / 60.0;

    // Overhead comes from the float count; the integer field saturates only
    // past u64::MAX breaks
    let rest_breaks = (traffic_adjusted_hours / travel.rest_interval_hours).floor();
    let rest_overhead_hours = rest_breaks * travel.rest_duration_minutes / 60.0;
    let rest_periods = rest_breaks as u64;

    Ok(TimeEstimate {
        base_hours,
        traffic_adjusted_hours,
        stop_overhead_hours,
        rest_periods,
        rest_overhead_hours,
        total_hours: traffic_adjusted_hours + stop_overhead_hours + rest_overhead_hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimatorError;

    fn all_urban() -> RoadTypeMix {
        RoadTypeMix::new(0.0, 0.0, 1.0, 0.0).unwrap()
    }

    #[test]
    fn test_urban_only_time() {
        let cfg = Config::default();
        let time = estimate_travel_time(40.0, &all_urban(), 0, &cfg).unwrap();

        assert!((time.base_hours - 1.0).abs() < 1e-12);
        assert!((time.traffic_adjusted_hours - 1.1).abs() < 1e-12);
        assert_eq!(time.stop_overhead_hours, 0.0);
        assert_eq!(time.rest_periods, 0);
        assert_eq!(time.rest_overhead_hours, 0.0);
        assert_eq!(time.total_hours, time.traffic_adjusted_hours);
    }

    #[test]
    fn test_stop_overhead() {
        let cfg = Config::default();
        let time = estimate_travel_time(40.0, &all_urban(), 4, &cfg).unwrap();
        // 4 stops * 15 min
        assert_eq!(time.stop_overhead_hours, 1.0);
    }

    #[test]
    fn test_rest_periods_follow_interval() {
        let cfg = Config::default();
        let highway = RoadTypeMix::new(1.0, 0.0, 0.0, 0.0).unwrap();

        // 900 km at 90 km/h = 10 h, 11 h with traffic -> 2 breaks of 30 min
        let time = estimate_travel_time(900.0, &highway, 0, &cfg).unwrap();
        assert_eq!(time.rest_periods, 2);
        assert!((time.rest_overhead_hours - 1.0).abs() < 1e-12);
        assert!((time.total_hours - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_rest_periods_on_huge_distance() {
        let cfg = Config::default();
        let highway = RoadTypeMix::new(1.0, 0.0, 0.0, 0.0).unwrap();

        // 1e13 km at 90 km/h with 10% traffic is about 1.22e11 h of driving
        let time = estimate_travel_time(1e13, &highway, 0, &cfg).unwrap();
        assert_eq!(time.rest_periods, 30_555_555_555);
        let expected_overhead = 30_555_555_555.0 * 0.5;
        assert!((time.rest_overhead_hours - expected_overhead).abs() / expected_overhead < 1e-12);
    }

    #[test]
    fn test_tiny_distance_is_finite() {
        let cfg = Config::default();
        let time = estimate_travel_time(0.001, &all_urban(), 0, &cfg).unwrap();
        assert!(time.total_hours.is_finite());
        assert!(time.total_hours > 0.0);
    }

    #[test]
    fn test_rejects_zero_distance() {
        let cfg = Config::default();
        let err = estimate_travel_time(0.0, &all_urban(), 0, &cfg).unwrap_err();
        assert!(matches!(err, EstimatorError::InvalidArgument(_)));
    }
}
