//! Builder pattern for MotionAxis.

use crate::actuator::Actuator;
use crate::clock::Clock;
use crate::config::{
    Degrees, DriverKind, GaugeConfig, StepRange, SystemConfig, DEFAULT_SWEEP_DEGREES,
};
use crate::error::{ConfigError, Error, GaugeError, Result};
use crate::motion::AccelerationProfile;

use super::axis::MotionAxis;

impl<A, C> MotionAxis<A, C>
where
    A: Actuator,
    C: Clock,
{
    /// Create a builder for a new axis.
    pub fn builder() -> MotionAxisBuilder<A, C> {
        MotionAxisBuilder::new()
    }
}

/// Builder for creating MotionAxis instances.
///
/// Owns its acceleration table by default. Call
/// [`shared_profile`](Self::shared_profile) to have several axes borrow one
/// table instead.
pub struct MotionAxisBuilder<A, C, P = AccelerationProfile> {
    actuator: Option<A>,
    clock: Option<C>,
    profile: Option<P>,
    name: Option<heapless::String<32>>,
    total_steps: Option<u32>,
    range: Option<(u32, u32)>,
    max_velocity: Option<u16>,
    homing_period_us: Option<u32>,
    sweep: Degrees,
    driver: DriverKind,
}

impl<A, C> Default for MotionAxisBuilder<A, C>
where
    A: Actuator,
    C: Clock,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<A, C> MotionAxisBuilder<A, C>
where
    A: Actuator,
    C: Clock,
{
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            actuator: None,
            clock: None,
            profile: None,
            name: None,
            total_steps: None,
            range: None,
            max_velocity: None,
            homing_period_us: None,
            sweep: Degrees(DEFAULT_SWEEP_DEGREES),
            driver: DriverKind::StepDir,
        }
    }

    /// Use an owned acceleration table.
    pub fn profile(mut self, profile: AccelerationProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Borrow an acceleration table shared with other axes.
    ///
    /// Any table set through [`profile`](Self::profile) is discarded.
    pub fn shared_profile(
        self,
        profile: &AccelerationProfile,
    ) -> MotionAxisBuilder<A, C, &AccelerationProfile> {
        MotionAxisBuilder {
            actuator: self.actuator,
            clock: self.clock,
            profile: Some(profile),
            name: self.name,
            total_steps: self.total_steps,
            range: self.range,
            max_velocity: self.max_velocity,
            homing_period_us: self.homing_period_us,
            sweep: self.sweep,
            driver: self.driver,
        }
    }

    /// Configure from a GaugeConfig.
    ///
    /// Only the built-in table of the gauge's driver is applied; a named
    /// profile must be resolved through [`from_config`](Self::from_config).
    pub fn from_gauge_config(mut self, config: &GaugeConfig) -> Self {
        self.name = Some(config.name.clone());
        self.total_steps = Some(config.total_steps);
        self.driver = config.driver;
        self.max_velocity = config.effective_max_velocity();
        self.homing_period_us = Some(config.effective_homing_period_us());
        self.sweep = config.sweep;

        let range = config.range();
        self.range = Some((range.min, range.max));
        self
    }

    /// Configure from SystemConfig by gauge name, resolving its named profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge or its profile is missing, or the
    /// profile table is malformed.
    pub fn from_config(self, config: &SystemConfig, gauge_name: &str) -> Result<Self> {
        let gauge_config = config.gauge(gauge_name).ok_or_else(|| {
            Error::Config(ConfigError::GaugeNotFound(
                heapless::String::try_from(gauge_name).unwrap_or_default(),
            ))
        })?;

        let mut builder = self.from_gauge_config(gauge_config);

        if let Some(ref profile_name) = gauge_config.profile {
            let profile = config
                .profile(profile_name.as_str())
                .ok_or_else(|| Error::Config(ConfigError::ProfileNotFound(profile_name.clone())))?
                .to_profile()?;
            builder.profile = Some(profile);
        }

        Ok(builder)
    }

    /// Build the MotionAxis.
    ///
    /// Without an explicit table, the driver's built-in one is used.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(mut self) -> Result<MotionAxis<A, C>> {
        let profile = self
            .profile
            .take()
            .unwrap_or_else(|| self.driver.default_profile());
        self.finish(profile)
    }
}

impl<'p, A, C> MotionAxisBuilder<A, C, &'p AccelerationProfile>
where
    A: Actuator,
    C: Clock,
{
    /// Build the MotionAxis around the shared table.
    ///
    /// # Errors
    ///
    /// Returns an error if required fields are missing.
    pub fn build(mut self) -> Result<MotionAxis<A, C, &'p AccelerationProfile>> {
        let profile = self
            .profile
            .take()
            .ok_or(Error::Gauge(GaugeError::MissingField("profile")))?;
        self.finish(profile)
    }
}

impl<A, C, P> MotionAxisBuilder<A, C, P>
where
    A: Actuator,
    C: Clock,
{
    /// Set the winding driver.
    pub fn actuator(mut self, actuator: A) -> Self {
        self.actuator = Some(actuator);
        self
    }

    /// Set the time source.
    pub fn clock(mut self, clock: C) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Set the gauge name.
    pub fn name(mut self, name: &str) -> Self {
        self.name = heapless::String::try_from(name).ok();
        self
    }

    /// Set the full mechanical range in steps.
    pub fn total_steps(mut self, steps: u32) -> Self {
        self.total_steps = Some(steps);
        self
    }

    /// Restrict the addressable range. Forced inside the mechanical range at build.
    pub fn range(mut self, low: u32, high: u32) -> Self {
        self.range = Some((low, high));
        self
    }

    /// Cap the velocity surrogate below the table maximum.
    pub fn max_velocity(mut self, cap: u16) -> Self {
        self.max_velocity = Some(cap);
        self
    }

    /// Set the fixed step period for homing and blocking moves.
    pub fn homing_period_us(mut self, period: u32) -> Self {
        self.homing_period_us = Some(period);
        self
    }

    /// Set the needle sweep over the full mechanical range.
    pub fn sweep_degrees(mut self, sweep: Degrees) -> Self {
        self.sweep = sweep;
        self
    }

    /// Select the driver whose defaults fill unset fields.
    pub fn driver(mut self, driver: DriverKind) -> Self {
        self.driver = driver;
        self
    }

    fn finish<Q>(self, profile: Q) -> Result<MotionAxis<A, C, Q>>
    where
        Q: core::borrow::Borrow<AccelerationProfile>,
    {
        let actuator = self
            .actuator
            .ok_or(Error::Gauge(GaugeError::MissingField("actuator")))?;
        let clock = self
            .clock
            .ok_or(Error::Gauge(GaugeError::MissingField("clock")))?;
        let total_steps = self
            .total_steps
            .ok_or(Error::Gauge(GaugeError::MissingField("total_steps")))?;

        if total_steps < 2 {
            return Err(Error::Gauge(GaugeError::InvalidTotalSteps(total_steps)));
        }

        let name = self
            .name
            .unwrap_or_else(|| heapless::String::try_from("gauge").unwrap_or_default());

        let range = match self.range {
            Some((low, high)) => StepRange::clamped(low, high, total_steps),
            None => StepRange::full(total_steps),
        };

        let homing_period_us = self
            .homing_period_us
            .unwrap_or_else(|| self.driver.default_homing_period_us());

        let sweep = if self.sweep.0 > 0.0 {
            self.sweep
        } else {
            Degrees(DEFAULT_SWEEP_DEGREES)
        };

        let max_velocity = self
            .max_velocity
            .or_else(|| self.driver.default_max_velocity());

        Ok(MotionAxis::new(
            actuator,
            clock,
            profile,
            name,
            total_steps,
            range,
            max_velocity,
            homing_period_us,
            sweep,
        ))
    }
}
