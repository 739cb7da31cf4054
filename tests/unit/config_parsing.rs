//! Unit tests for TOML configuration parsing.

use gauge_stepper::config::{load_config, DriverKind, StepRange, SystemConfig};

/// Test parsing a gauge with every optional field set.
#[test]
fn test_parse_gauge_config() {
    let toml_str = r#"
[gauges.speedo]
name = "Speedometer"
total_steps = 945
driver = "four_wire"
min_step = 5
max_step = 900
max_velocity = 120
homing_period_us = 1000
sweep_degrees = 270.0
invert_direction = false
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let gauge = config.gauge("speedo").expect("Gauge not found");

    assert_eq!(gauge.name.as_str(), "Speedometer");
    assert_eq!(gauge.total_steps, 945);
    assert_eq!(gauge.driver, DriverKind::FourWire);
    assert_eq!(gauge.range(), StepRange { min: 5, max: 900 });
    assert_eq!(gauge.effective_max_velocity(), Some(120));
    assert_eq!(gauge.effective_homing_period_us(), 1000);
    assert_eq!(gauge.sweep.0, 270.0);
    assert!((gauge.steps_per_degree() - 3.5).abs() < 0.001);
    assert!(!gauge.invert_direction);
}

/// Test that omitted fields fall back to driver defaults.
#[test]
fn test_parse_gauge_defaults() {
    let toml_str = r#"
[gauges.tacho]
name = "Tachometer"
total_steps = 3780
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let gauge = config.gauge("tacho").expect("Gauge not found");

    assert_eq!(gauge.driver, DriverKind::StepDir);
    assert!(gauge.profile.is_none());
    assert_eq!(gauge.range(), StepRange::full(3780));
    assert_eq!(gauge.effective_homing_period_us(), 300);
    assert_eq!(gauge.effective_max_velocity(), None);
    assert_eq!(gauge.sweep.0, 315.0);
}

/// Test parsing a named acceleration table.
#[test]
fn test_parse_profile_table() {
    let toml_str = r#"
[profiles.brisk]
entries = [[20, 800], [50, 400], [100, 200]]
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let profile = config
        .profile("brisk")
        .expect("Profile not found")
        .to_profile()
        .expect("Table is valid");

    assert_eq!(profile.len(), 3);
    assert_eq!(profile.max_velocity(), 100);
    assert_eq!(profile.delay_for(21), 400);
}

/// Test that an unknown driver name is rejected by the parser.
#[test]
fn test_parse_unknown_driver() {
    let toml_str = r#"
[gauges.oil]
name = "Oil"
total_steps = 600
driver = "half_bridge"
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test that a missing total_steps is rejected by the parser.
#[test]
fn test_parse_missing_total_steps() {
    let toml_str = r#"
[gauges.oil]
name = "Oil"
"#;

    let result: Result<SystemConfig, _> = toml::from_str(toml_str);
    assert!(result.is_err());
}

/// Test listing names from a multi-gauge file.
#[test]
fn test_gauge_and_profile_names() {
    let toml_str = r#"
[profiles.a]
entries = [[10, 1000]]

[gauges.left]
name = "Left"
total_steps = 600

[gauges.right]
name = "Right"
total_steps = 600
"#;

    let config: SystemConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let gauges: Vec<_> = config.gauge_names().collect();
    let profiles: Vec<_> = config.profile_names().collect();

    assert_eq!(gauges, ["left", "right"]);
    assert_eq!(profiles, ["a"]);
}

/// Test loading configuration from a file.
#[test]
fn test_load_config_from_file() {
    let path = std::env::temp_dir().join("gauge_stepper_load_test.toml");
    std::fs::write(
        &path,
        "[gauges.fuel]\nname = \"Fuel\"\ntotal_steps = 600\nmax_step = 500\n",
    )
    .expect("Failed to write temp file");

    let config = load_config(&path).expect("Failed to load config");
    assert_eq!(config.gauge("fuel").unwrap().range(), StepRange { min: 0, max: 500 });

    let _ = std::fs::remove_file(&path);
}
