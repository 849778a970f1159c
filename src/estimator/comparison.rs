use crate::estimator::models::{ComparisonPercentages, RouteComparison, RouteSummary};

/// Compare two routes. Deltas are `a - b`, so a positive value is what `b`
/// saves relative to `a`.
pub fn compare_routes(a: &RouteSummary, b: &RouteSummary) -> RouteComparison {
    let distance_delta_km = a.distance_km - b.distance_km;
    let time_delta_hours = a.time.total_hours - b.time.total_hours;
    let cost_delta = a.cost.total_cost - b.cost.total_cost;

    RouteComparison {
        distance_delta_km,
        time_delta_hours,
        cost_delta,
        percentages: ComparisonPercentages {
            distance: percent_of(distance_delta_km, a.distance_km),
            time: percent_of(time_delta_hours, a.time.total_hours),
            cost: percent_of(cost_delta, a.cost.total_cost),
        },
    }
}

fn percent_of(delta: f64, baseline: f64) -> Option<f64> {
    if baseline == 0.0 {
        return None;
    }
    Some(delta / baseline * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::models::{CostEstimate, TimeEstimate};

    fn summary(distance_km: f64, hours: f64, cost: f64) -> RouteSummary {
        RouteSummary {
            distance_km,
            time: TimeEstimate {
                base_hours: hours,
                traffic_adjusted_hours: hours,
                stop_overhead_hours: 0.0,
                rest_periods: 0,
                rest_overhead_hours: 0.0,
                total_hours: hours,
            },
            cost: CostEstimate {
                total_cost: cost,
                ..CostEstimate::default()
            },
        }
    }

    #[test]
    fn test_first_route_larger() {
        let a = summary(100.0, 2.0, 200.0);
        let b = summary(80.0, 1.5, 150.0);

        let cmp = compare_routes(&a, &b);
        assert_eq!(cmp.distance_delta_km, 20.0);
        assert_eq!(cmp.time_delta_hours, 0.5);
        assert_eq!(cmp.cost_delta, 50.0);
        assert_eq!(cmp.percentages.distance, Some(20.0));
        assert_eq!(cmp.percentages.time, Some(25.0));
        assert_eq!(cmp.percentages.cost, Some(25.0));
    }

    #[test]
    fn test_second_route_larger_is_negative() {
        let a = summary(50.0, 1.0, 100.0);
        let b = summary(75.0, 1.5, 130.0);

        let cmp = compare_routes(&a, &b);
        assert_eq!(cmp.distance_delta_km, -25.0);
        assert!(cmp.time_delta_hours < 0.0);
        assert_eq!(cmp.percentages.distance, Some(-50.0));
    }

    #[test]
    fn test_zero_baseline_has_no_percentage() {
        let a = summary(10.0, 0.5, 0.0);
        let b = summary(8.0, 0.4, 12.0);

        let cmp = compare_routes(&a, &b);
        assert_eq!(cmp.cost_delta, -12.0);
        assert_eq!(cmp.percentages.cost, None);
        assert!(cmp.percentages.distance.is_some());

        let json = serde_json::to_value(cmp).unwrap();
        assert!(json["percentages"]["cost"].is_null());
    }
}
