//! Gauge system facade for multi-gauge configuration.
//!
//! Provides a high-level API for building several gauges from one configuration
//! and polling them together.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use heapless::{FnvIndexMap, String};

use crate::actuator::{Actuator, FourWireActuator, StepDirActuator};
use crate::clock::Clock;
use crate::config::{GaugeConfig, StepRange, SystemConfig};
use crate::error::{ConfigError, Error, Result};
use crate::motion::AccelerationProfile;

use super::axis::MotionAxis;
use super::builder::MotionAxisBuilder;

/// Object-safe view of a gauge, for polling axes of different types together.
pub trait Gauge {
    /// Step if due. Returns `true` if the needle moved.
    fn update(&mut self) -> bool;

    /// True once the needle rests on its target.
    fn is_stopped(&self) -> bool;

    /// Current absolute position.
    fn current_step(&self) -> u32;

    /// Commanded position.
    fn target_step(&self) -> u32;

    /// Command a new target position.
    fn set_position(&mut self, position: u32);
}

impl<A, C, P> Gauge for MotionAxis<A, C, P>
where
    A: Actuator,
    C: Clock,
    P: core::borrow::Borrow<AccelerationProfile>,
{
    fn update(&mut self) -> bool {
        MotionAxis::update(self)
    }

    fn is_stopped(&self) -> bool {
        MotionAxis::is_stopped(self)
    }

    fn current_step(&self) -> u32 {
        MotionAxis::current_step(self)
    }

    fn target_step(&self) -> u32 {
        MotionAxis::target_step(self)
    }

    fn set_position(&mut self, position: u32) {
        MotionAxis::set_position(self, position)
    }
}

/// Poll every gauge once. Returns how many of them stepped.
pub fn update_all(gauges: &mut [&mut dyn Gauge]) -> usize {
    let mut moved = 0;
    for gauge in gauges.iter_mut() {
        if gauge.update() {
            moved += 1;
        }
    }
    moved
}

/// A facade for managing multiple gauges from configuration.
///
/// `GaugeSystem` provides a high-level API for:
/// - Building gauges from named configurations
/// - Resolving named acceleration tables
/// - Tracking which gauges have been brought up
///
/// # Example
///
/// ```rust,ignore
/// use gauge_stepper::motor::{update_all, GaugeSystem};
///
/// let config = gauge_stepper::parse_config(CONFIG_TOML)?;
/// let mut system = GaugeSystem::from_config(config);
///
/// // Register gauges with their hardware pins
/// let mut speedo = system.register_four_wire("speedo", speedo_pins, &clock)?;
/// let mut tacho = system.register_step_dir("tacho", step, dir, delay, &clock)?;
///
/// speedo.zero(&mut delay);
/// loop {
///     update_all(&mut [&mut speedo, &mut tacho]);
/// }
/// ```
pub struct GaugeSystem {
    /// The system configuration.
    config: SystemConfig,
    /// Registered gauge names (actual axes are owned by the user due to generic types).
    registered_gauges: FnvIndexMap<String<32>, StepRange, 8>,
}

impl GaugeSystem {
    /// Create a new gauge system from configuration.
    ///
    /// No gauges are created. Register them individually with
    /// `register_gauge()` or create them with `build_gauge()`.
    pub fn from_config(config: SystemConfig) -> Self {
        Self {
            config,
            registered_gauges: FnvIndexMap::new(),
        }
    }

    /// Get the system configuration.
    pub fn config(&self) -> &SystemConfig {
        &self.config
    }

    /// Get a gauge configuration by name.
    ///
    /// Returns `None` if no gauge with that name exists in the configuration.
    pub fn gauge_config(&self, name: &str) -> Option<&GaugeConfig> {
        self.config.gauge(name)
    }

    /// Check if a gauge name exists in the configuration.
    pub fn has_gauge(&self, name: &str) -> bool {
        self.config.gauge(name).is_some()
    }

    /// List all configured gauge names.
    pub fn gauge_names(&self) -> impl Iterator<Item = &str> {
        self.config.gauge_names()
    }

    /// Build a named acceleration table.
    ///
    /// # Errors
    ///
    /// Returns an error if no profile with that name exists or its table is malformed.
    pub fn profile(&self, name: &str) -> Result<AccelerationProfile> {
        self.config
            .profile(name)
            .ok_or_else(|| {
                Error::Config(ConfigError::ProfileNotFound(
                    String::try_from(name).unwrap_or_default(),
                ))
            })?
            .to_profile()
    }

    /// Build a gauge from configuration without registering it.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge name doesn't exist or building fails.
    pub fn build_gauge<A, C>(&self, name: &str, actuator: A, clock: C) -> Result<MotionAxis<A, C>>
    where
        A: Actuator,
        C: Clock,
    {
        MotionAxisBuilder::new()
            .actuator(actuator)
            .clock(clock)
            .from_config(&self.config, name)?
            .build()
    }

    /// Register a gauge as active in the system.
    ///
    /// The axis is returned to the caller; the system only records its range.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge name doesn't exist in the configuration.
    pub fn register_gauge<A, C>(
        &mut self,
        name: &str,
        actuator: A,
        clock: C,
    ) -> Result<MotionAxis<A, C>>
    where
        A: Actuator,
        C: Clock,
    {
        let axis = self.build_gauge(name, actuator, clock)?;

        let gauge_name: String<32> = String::try_from(name).unwrap_or_default();
        if self
            .registered_gauges
            .insert(gauge_name, axis.range())
            .is_err()
        {
            warn!(
                "gauge {} not tracked, {} registrations already",
                name,
                self.registered_gauges.len()
            );
        } else {
            info!("registered gauge {} ({} steps)", name, axis.total_steps());
        }

        Ok(axis)
    }

    /// Register a gauge wired to a step/direction driver.
    ///
    /// Applies the configured DIR inversion.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge name doesn't exist in the configuration.
    pub fn register_step_dir<STEP, DIR, DELAY, C>(
        &mut self,
        name: &str,
        step_pin: STEP,
        dir_pin: DIR,
        delay: DELAY,
        clock: C,
    ) -> Result<MotionAxis<StepDirActuator<STEP, DIR, DELAY>, C>>
    where
        STEP: OutputPin,
        DIR: OutputPin,
        DELAY: DelayNs,
        C: Clock,
    {
        let invert = self.gauge_config(name).is_some_and(|g| g.invert_direction);
        let actuator = StepDirActuator::new(step_pin, dir_pin, delay).invert_direction(invert);
        self.register_gauge(name, actuator, clock)
    }

    /// Register a gauge whose four coil pins are driven directly.
    ///
    /// The coils are energized before the axis is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge name doesn't exist in the configuration.
    pub fn register_four_wire<PIN, C>(
        &mut self,
        name: &str,
        pins: [PIN; 4],
        clock: C,
    ) -> Result<MotionAxis<FourWireActuator<PIN>, C>>
    where
        PIN: OutputPin,
        C: Clock,
    {
        let mut axis = self.register_gauge(name, FourWireActuator::new(pins), clock)?;
        axis.actuator_mut().energize();
        Ok(axis)
    }

    /// Check if a gauge has been registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered_gauges
            .iter()
            .any(|(k, _)| k.as_str() == name)
    }

    /// Get the number of registered gauges.
    pub fn registered_count(&self) -> usize {
        self.registered_gauges.len()
    }

    /// Get the addressable range of a registered gauge.
    ///
    /// Returns `None` if the gauge is not registered.
    pub fn registered_range(&self, name: &str) -> Option<StepRange> {
        self.registered_gauges
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| *v)
    }
}
