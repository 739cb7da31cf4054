//! Directly commutated four-wire motor actuator.

use embedded_hal::digital::OutputPin;

use crate::motion::Direction;

use super::Actuator;

/// Number of states in one commutation cycle.
const STATE_COUNT: u8 = 6;

/// Winding pattern per commutation state, bit `i` drives pin `i`.
///
/// ```text
/// State  3 2 1 0   Value
/// 0      1 0 0 1   0x9
/// 1      0 0 0 1   0x1
/// 2      0 1 1 1   0x7
/// 3      0 1 1 0   0x6
/// 4      1 1 1 0   0xE
/// 5      1 0 0 0   0x8
/// ```
const STATE_MAP: [u8; STATE_COUNT as usize] = [0x9, 0x1, 0x7, 0x6, 0xE, 0x8];

/// Actuator for motors whose four coil pins are driven straight from GPIO.
pub struct FourWireActuator<P: OutputPin> {
    pins: [P; 4],
    state: u8,
    faults: u32,
}

impl<P: OutputPin> FourWireActuator<P> {
    /// Create an actuator at commutation state 0 without touching the pins.
    pub fn new(pins: [P; 4]) -> Self {
        Self {
            pins,
            state: 0,
            faults: 0,
        }
    }

    /// Drive the pins to the current commutation state.
    ///
    /// Call once after construction to lock the rotor before homing.
    pub fn energize(&mut self) {
        self.write_io();
    }

    /// Current commutation state (0..6).
    #[inline]
    pub fn state(&self) -> u8 {
        self.state
    }

    /// Number of pin writes that have failed.
    #[inline]
    pub fn fault_count(&self) -> u32 {
        self.faults
    }

    /// Give the pins back.
    pub fn release(self) -> [P; 4] {
        self.pins
    }

    fn write_io(&mut self) {
        let mut mask = STATE_MAP[self.state as usize];
        let mut failed = 0u32;
        for pin in self.pins.iter_mut() {
            let result = if mask & 0x1 != 0 {
                pin.set_high()
            } else {
                pin.set_low()
            };
            if result.is_err() {
                failed += 1;
            }
            mask >>= 1;
        }

        if failed > 0 {
            self.faults = self.faults.saturating_add(failed);
            warn!("coil pin write failed ({} faults)", self.faults);
        }
    }
}

impl<P: OutputPin> Actuator for FourWireActuator<P> {
    fn step(&mut self, direction: Direction) {
        self.state = match direction {
            Direction::Clockwise => (self.state + 1) % STATE_COUNT,
            Direction::CounterClockwise => (self.state + STATE_COUNT - 1) % STATE_COUNT,
        };
        self.write_io();
    }
}
