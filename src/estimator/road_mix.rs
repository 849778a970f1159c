use crate::config::{Config, MixBracket, RoadMixConfig};
use crate::error::{EstimatorError, Result};
use crate::estimator::models::{validate_distance, PerRoadType, RoadTypeMix};

/// Estimate how a route's distance splits across road classes.
///
/// 1. Pick the base mix of the first bracket whose `max_km` exceeds the distance.
/// 2. Move share from highway and state road into urban for every stop beyond
///    the first, up to `stop_urban_cap`, without pushing either donor below
///    `min_fraction`.
/// 3. Re-normalize so the fractions sum to exactly one.
pub(crate) fn estimate_road_type_mix(
    distance_km: f64,
    stop_count: u32,
    config: &Config,
) -> Result<RoadTypeMix> {
    validate_distance(distance_km)?;

    let road_mix = &config.road_mix;
    let base = select_bracket(&road_mix.brackets, distance_km)?.mix;
    let adjusted = apply_stop_adjustment(base, stop_count, road_mix);
    if !(adjusted.sum() > 0.0) {
        return Err(EstimatorError::config(
            "road_mix bracket fractions must not all be zero",
        ));
    }

    Ok(RoadTypeMix::normalized(adjusted))
}

fn select_bracket(brackets: &[MixBracket], distance_km: f64) -> Result<&MixBracket> {
    brackets
        .iter()
        .find(|bracket| bracket.contains(distance_km))
        .ok_or_else(|| {
            EstimatorError::config(format!(
                "no road_mix bracket covers {} km; the last bracket must be open-ended",
                distance_km
            ))
        })
}

/// Urban share requested by `stop_count` stops before donor limits apply
pub fn requested_urban_bump(stop_count: u32, road_mix: &RoadMixConfig) -> f64 {
    let extra_stops = stop_count.saturating_sub(1);
    (f64::from(extra_stops) * road_mix.stop_urban_step).min(road_mix.stop_urban_cap)
}

fn apply_stop_adjustment(base: PerRoadType, stop_count: u32, road_mix: &RoadMixConfig) -> PerRoadType {
    shift_to_urban(base, requested_urban_bump(stop_count, road_mix), road_mix.min_fraction)
}

/// Share highway and state road can give up before hitting `floor`
pub(crate) fn donor_share(base: &PerRoadType, floor: f64) -> f64 {
    (base.highway - floor).max(0.0) + (base.state_road - floor).max(0.0)
}

/// Move up to `requested` share into urban, taken from highway and state
/// road in proportion to what each holds above `floor`.
pub(crate) fn shift_to_urban(base: PerRoadType, requested: f64, floor: f64) -> PerRoadType {
    if requested <= 0.0 {
        return base;
    }

    let highway_spare = (base.highway - floor).max(0.0);
    let available = donor_share(&base, floor);
    if available <= 0.0 {
        return base;
    }

    let bump = requested.min(available);
    let from_highway = bump * highway_spare / available;
    let from_state_road = bump - from_highway;

    PerRoadType {
        highway: base.highway - from_highway,
        state_road: base.state_road - from_state_road,
        urban: base.urban + bump,
        rural: base.rural,
    }
}

/// Normalized highway share of `base` after `bump` moved into urban
pub(crate) fn highway_share_after(base: PerRoadType, bump: f64, floor: f64) -> f64 {
    let shifted = shift_to_urban(base, bump, floor);
    shifted.highway / shifted.sum()
}
