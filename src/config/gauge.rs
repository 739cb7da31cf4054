//! Gauge configuration from TOML.

use heapless::String;
use serde::Deserialize;

use crate::motion::AccelerationProfile;

use super::range::StepRange;
use super::units::{Degrees, DEFAULT_SWEEP_DEGREES};

/// How the motor windings are driven.
///
/// Selects the built-in acceleration table, homing period and velocity cap
/// used when the configuration does not name them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriverKind {
    /// Driver chip with STEP and DIR inputs (X12 class).
    #[default]
    StepDir,
    /// Four coil pins commutated directly from GPIO (X25 class).
    FourWire,
}

impl DriverKind {
    /// Built-in acceleration table for this driver.
    pub fn default_profile(self) -> AccelerationProfile {
        match self {
            DriverKind::StepDir => AccelerationProfile::step_dir_default(),
            DriverKind::FourWire => AccelerationProfile::four_wire_default(),
        }
    }

    /// Fixed step period used while homing, in microseconds.
    pub fn default_homing_period_us(self) -> u32 {
        match self {
            DriverKind::StepDir => 300,
            DriverKind::FourWire => 800,
        }
    }

    /// Velocity cap below the table ceiling, if the driver needs one.
    pub fn default_max_velocity(self) -> Option<u16> {
        match self {
            DriverKind::StepDir => None,
            DriverKind::FourWire => Some(150),
        }
    }
}

/// Complete gauge configuration from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct GaugeConfig {
    /// Human-readable name (max 32 chars).
    pub name: String<32>,

    /// Full mechanical range in steps (positions are `0..total_steps`).
    pub total_steps: u32,

    /// Winding drive scheme.
    #[serde(default)]
    pub driver: DriverKind,

    /// Name of an acceleration table under `[profiles]`.
    #[serde(default)]
    pub profile: Option<String<32>>,

    /// Lowest addressable step.
    #[serde(default)]
    pub min_step: Option<u32>,

    /// Highest addressable step.
    #[serde(default)]
    pub max_step: Option<u32>,

    /// Velocity surrogate cap.
    #[serde(default)]
    pub max_velocity: Option<u16>,

    /// Step period while homing, in microseconds.
    #[serde(default)]
    pub homing_period_us: Option<u32>,

    /// Needle sweep over the full mechanical range.
    #[serde(default = "default_sweep", rename = "sweep_degrees")]
    pub sweep: Degrees,

    /// Invert direction pin logic (step/dir drivers only).
    #[serde(default)]
    pub invert_direction: bool,
}

fn default_sweep() -> Degrees {
    Degrees(DEFAULT_SWEEP_DEGREES)
}

impl GaugeConfig {
    /// Minimal configuration for a gauge of `total_steps` steps.
    pub fn new(name: &str, total_steps: u32, driver: DriverKind) -> Self {
        Self {
            name: String::try_from(name).unwrap_or_default(),
            total_steps,
            driver,
            profile: None,
            min_step: None,
            max_step: None,
            max_velocity: None,
            homing_period_us: None,
            sweep: default_sweep(),
            invert_direction: false,
        }
    }

    /// Configured range, defaulting to the whole mechanical range.
    ///
    /// Not checked against `total_steps`; see [`validate_config`](super::validate_config).
    pub fn range(&self) -> StepRange {
        StepRange {
            min: self.min_step.unwrap_or(0),
            max: self.max_step.unwrap_or(self.total_steps.saturating_sub(1)),
        }
    }

    /// Homing period, falling back to the driver's default.
    pub fn effective_homing_period_us(&self) -> u32 {
        self.homing_period_us
            .unwrap_or_else(|| self.driver.default_homing_period_us())
    }

    /// Velocity cap, falling back to the driver's default.
    pub fn effective_max_velocity(&self) -> Option<u16> {
        self.max_velocity.or(self.driver.default_max_velocity())
    }

    /// Steps per degree of needle sweep.
    pub fn steps_per_degree(&self) -> f32 {
        self.total_steps as f32 / self.sweep.0
    }
}
