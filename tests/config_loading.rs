/// Integration tests for loading configuration files
use route_estimator::config::{load_config, Config};
use route_estimator::RouteCostEstimator;
use std::io::Write;

fn write_config(contents: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_default_config_round_trips_through_toml() -> anyhow::Result<()> {
    let defaults = Config::default();
    let file = write_config(&defaults.to_toml()?)?;

    let loaded = load_config(Some(file.path()))?;
    assert_eq!(loaded, defaults);
    assert!(RouteCostEstimator::new(loaded).is_ok());
    Ok(())
}

#[test]
fn test_partial_file_keeps_other_defaults() -> anyhow::Result<()> {
    let file = write_config(
        r#"
[vehicle]
fuel_price_per_liter = 5.79
driver_cost_per_hour = 32

[travel.speed_kmh]
highway = 100
state_road = 80
urban = 35
rural = 55
"#,
    )?;

    let cfg = load_config(Some(file.path()))?;
    assert_eq!(cfg.vehicle.fuel_price_per_liter, 5.79);
    assert_eq!(cfg.vehicle.driver_cost_per_hour, Some(32.0));
    assert_eq!(cfg.travel.speed_kmh.urban, 35.0);

    let defaults = Config::default();
    assert_eq!(cfg.vehicle.km_per_liter, defaults.vehicle.km_per_liter);
    assert_eq!(cfg.travel.traffic_factor, defaults.travel.traffic_factor);
    assert_eq!(cfg.road_mix, defaults.road_mix);
    Ok(())
}

#[test]
fn test_custom_brackets() -> anyhow::Result<()> {
    let file = write_config(
        r#"
[[road_mix.brackets]]
max_km = 50

[road_mix.brackets.mix]
highway = 0.1
state_road = 0.2
urban = 0.6
rural = 0.1

[[road_mix.brackets]]

[road_mix.brackets.mix]
highway = 0.7
state_road = 0.2
urban = 0.05
rural = 0.05
"#,
    )?;

    let cfg = load_config(Some(file.path()))?;
    assert_eq!(cfg.road_mix.brackets.len(), 2);
    assert_eq!(cfg.road_mix.brackets[0].max_km, Some(50.0));
    assert_eq!(cfg.road_mix.brackets[1].max_km, None);

    let estimator = RouteCostEstimator::new(cfg)?;
    assert!((estimator.road_type_mix(60.0, 0)?.highway() - 0.7).abs() < 1e-9);
    Ok(())
}

#[test]
fn test_zero_speed_is_rejected_on_load() -> anyhow::Result<()> {
    let file = write_config(
        r#"
[travel.speed_kmh]
highway = 90
state_road = 70
urban = 0
rural = 50
"#,
    )?;

    let err = load_config(Some(file.path())).unwrap_err();
    assert!(err.to_string().contains("travel.speed_kmh.urban"));
    Ok(())
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(load_config(Some(&missing)).is_err());
}
