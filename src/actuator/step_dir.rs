//! Step/direction driver chip actuator.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::motion::Direction;

use super::Actuator;

/// STEP pulse width in microseconds.
const STEP_PULSE_US: u32 = 1;

/// Actuator for driver chips with STEP and DIR inputs.
///
/// Generic over:
/// - `STEP`: STEP pin type (must implement `OutputPin`)
/// - `DIR`: DIR pin type (must implement `OutputPin`)
/// - `DELAY`: Delay provider for the pulse width (must implement `DelayNs`)
pub struct StepDirActuator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    step_pin: STEP,
    dir_pin: DIR,
    delay: DELAY,

    /// Direction last written to DIR (cached to avoid unnecessary pin writes).
    current_direction: Option<Direction>,

    /// Whether DIR logic is inverted (high = counter-clockwise).
    invert_direction: bool,

    /// Pin writes that failed since construction.
    faults: u32,
}

impl<STEP, DIR, DELAY> StepDirActuator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    /// Create an actuator. DIR high means clockwise.
    pub fn new(step_pin: STEP, dir_pin: DIR, delay: DELAY) -> Self {
        Self {
            step_pin,
            dir_pin,
            delay,
            current_direction: None,
            invert_direction: false,
            faults: 0,
        }
    }

    /// Invert DIR logic so that low means clockwise.
    ///
    /// X12 style driver boards are wired this way.
    pub fn invert_direction(mut self, invert: bool) -> Self {
        self.invert_direction = invert;
        self
    }

    /// Number of pin writes that have failed.
    #[inline]
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    /// Give the pins and delay back.
    pub fn release(self) -> (STEP, DIR, DELAY) {
        (self.step_pin, self.dir_pin, self.delay)
    }

    fn set_direction(&mut self, direction: Direction) {
        if self.current_direction == Some(direction) {
            return;
        }

        let pin_high = match direction {
            Direction::Clockwise => !self.invert_direction,
            Direction::CounterClockwise => self.invert_direction,
        };

        let result = if pin_high {
            self.dir_pin.set_high()
        } else {
            self.dir_pin.set_low()
        };

        match result {
            Ok(()) => self.current_direction = Some(direction),
            Err(_) => self.fault("DIR"),
        }
    }

    fn fault(&mut self, pin: &'static str) {
        self.faults = self.faults.saturating_add(1);
        warn!("{} pin write failed ({} faults)", pin, self.faults);
    }
}

impl<STEP, DIR, DELAY> Actuator for StepDirActuator<STEP, DIR, DELAY>
where
    STEP: OutputPin,
    DIR: OutputPin,
    DELAY: DelayNs,
{
    fn step(&mut self, direction: Direction) {
        self.set_direction(direction);

        if self.step_pin.set_high().is_err() {
            self.fault("STEP");
        }
        self.delay.delay_us(STEP_PULSE_US);
        if self.step_pin.set_low().is_err() {
            self.fault("STEP");
        }
    }
}
