//! Motion module for gauge-stepper.
//!
//! Provides the acceleration table and the direction/phase vocabulary shared
//! by the axis state machine and the actuators.

mod profile;

pub use profile::{AccelerationProfile, ProfileEntry, MAX_PROFILE_ENTRIES};

/// Direction of needle motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    /// Clockwise (increasing step count).
    Clockwise,
    /// Counter-clockwise (decreasing step count).
    CounterClockwise,
}

impl Direction {
    /// Direction that moves from `from` towards `to`.
    ///
    /// Equal positions resolve to counter-clockwise.
    #[inline]
    pub fn towards(from: u32, to: u32) -> Self {
        if to > from {
            Direction::Clockwise
        } else {
            Direction::CounterClockwise
        }
    }

    /// Get the sign multiplier.
    #[inline]
    pub fn sign(self) -> i8 {
        match self {
            Direction::Clockwise => 1,
            Direction::CounterClockwise => -1,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
        }
    }
}

/// What the velocity rule did on the most recent step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionPhase {
    /// At rest on the target.
    Stopped,
    /// Velocity increased.
    Accelerating,
    /// Velocity held, either at the ceiling or exactly on the braking curve.
    Cruising,
    /// Velocity decreased.
    Decelerating,
}
