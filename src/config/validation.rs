//! Configuration validation.

use crate::error::{ConfigError, Error, Result};

use super::{GaugeConfig, ProfileConfig, SystemConfig};

/// Validate a system configuration.
///
/// Checks:
/// - Profile tables satisfy the acceleration table invariants
/// - Gauges have at least two steps and a range inside them
/// - Gauge profile references exist
/// - Velocity caps, homing periods and sweeps are positive
pub fn validate_config(config: &SystemConfig) -> Result<()> {
    // Validate profiles
    for (name, profile) in config.profiles.iter() {
        validate_profile(name.as_str(), profile)?;
    }

    // Validate gauges
    for (name, gauge) in config.gauges.iter() {
        validate_gauge(name.as_str(), gauge, config)?;
    }

    Ok(())
}

fn validate_profile(name: &str, profile: &ProfileConfig) -> Result<()> {
    match profile.to_profile() {
        Ok(_) => Ok(()),
        Err(Error::Profile(reason)) => Err(Error::Config(ConfigError::InvalidProfile {
            profile: heapless::String::try_from(name).unwrap_or_default(),
            reason,
        })),
        Err(e) => Err(e),
    }
}

fn validate_gauge(name: &str, gauge: &GaugeConfig, config: &SystemConfig) -> Result<()> {
    if gauge.total_steps < 2 {
        return Err(Error::Config(ConfigError::InvalidTotalSteps(gauge.total_steps)));
    }

    let range = gauge.range();
    if !range.is_valid_for(gauge.total_steps) {
        return Err(Error::Config(ConfigError::InvalidRange {
            min: range.min,
            max: range.max,
            total_steps: gauge.total_steps,
        }));
    }

    if let Some(ref profile) = gauge.profile {
        if config.profile(profile.as_str()).is_none() {
            return Err(Error::Config(ConfigError::UnknownProfile {
                gauge: heapless::String::try_from(name).unwrap_or_default(),
                profile: profile.clone(),
            }));
        }
    }

    if gauge.max_velocity == Some(0) {
        return Err(Error::Config(ConfigError::InvalidMaxVelocity(0)));
    }

    if gauge.homing_period_us == Some(0) {
        return Err(Error::Config(ConfigError::InvalidHomingPeriod(0)));
    }

    if gauge.sweep.0.is_nan() || gauge.sweep.0 <= 0.0 {
        return Err(Error::Config(ConfigError::InvalidSweep(gauge.sweep.0)));
    }

    Ok(())
}
