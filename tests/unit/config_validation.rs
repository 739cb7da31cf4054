//! Unit tests for configuration validation.

use gauge_stepper::config::{validate_config, SystemConfig};
use gauge_stepper::error::{ConfigError, Error, ProfileError};

fn parse(toml_str: &str) -> SystemConfig {
    toml::from_str(toml_str).expect("Failed to parse TOML")
}

/// Test validation of a valid configuration.
#[test]
fn test_valid_config_passes_validation() {
    let config = parse(
        r#"
[profiles.gentle]
entries = [[20, 3000], [50, 1500], [100, 1000]]

[gauges.speedo]
name = "Speedometer"
total_steps = 945
driver = "four_wire"
profile = "gentle"
min_step = 0
max_step = 944
"#,
    );

    assert!(validate_config(&config).is_ok());
}

/// Test validation fails for a gauge referencing a non-existent profile.
#[test]
fn test_gauge_invalid_profile_reference() {
    let config = parse(
        r#"
[gauges.speedo]
name = "Speedometer"
total_steps = 945
profile = "missing"
"#,
    );

    match validate_config(&config) {
        Err(Error::Config(ConfigError::UnknownProfile { gauge, profile })) => {
            assert_eq!(gauge.as_str(), "speedo");
            assert_eq!(profile.as_str(), "missing");
        }
        other => panic!("Expected UnknownProfile, got {:?}", other),
    }
}

/// Test validation fails for a table whose delays grow with velocity.
#[test]
fn test_profile_delay_must_not_increase() {
    let config = parse(
        r#"
[profiles.odd]
entries = [[20, 800], [50, 900]]
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidProfile {
            reason: ProfileError::DelayIncreases { index: 1, .. },
            ..
        }))
    ));
}

/// Test validation fails for an empty table.
#[test]
fn test_profile_must_not_be_empty() {
    let config = parse(
        r#"
[profiles.none]
entries = []
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidProfile {
            reason: ProfileError::Empty,
            ..
        }))
    ));
}

/// Test validation fails for a range beyond the mechanical stop.
#[test]
fn test_range_exceeds_total_steps() {
    let config = parse(
        r#"
[gauges.fuel]
name = "Fuel"
total_steps = 600
max_step = 600
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidRange {
            max: 600,
            total_steps: 600,
            ..
        }))
    ));
}

/// Test validation fails for a zero velocity cap or homing period.
#[test]
fn test_zero_cap_and_period() {
    let config = parse(
        r#"
[gauges.fuel]
name = "Fuel"
total_steps = 600
max_velocity = 0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidMaxVelocity(0)))
    ));

    let config = parse(
        r#"
[gauges.fuel]
name = "Fuel"
total_steps = 600
homing_period_us = 0
"#,
    );
    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidHomingPeriod(0)))
    ));
}

/// Test validation fails for a negative sweep.
#[test]
fn test_negative_sweep() {
    let config = parse(
        r#"
[gauges.fuel]
name = "Fuel"
total_steps = 600
sweep_degrees = -90.0
"#,
    );

    assert!(matches!(
        validate_config(&config),
        Err(Error::Config(ConfigError::InvalidSweep(_)))
    ));
}
