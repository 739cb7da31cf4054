//! Physical actuation of a single needle step.
//!
//! The axis state machine only ever asks for "one step, this way". How that
//! reaches the windings is the actuator's business: a pulse on a
//! step/direction driver chip, or one transition of a four-wire commutation
//! sequence.

mod four_wire;
mod step_dir;

pub use four_wire::FourWireActuator;
pub use step_dir::StepDirActuator;

use crate::motion::Direction;

/// An interface to the motor windings.
pub trait Actuator {
    /// Move exactly one step in `direction`.
    ///
    /// Hardware failures are the actuator's own concern and are not reported
    /// back to the motion controller.
    fn step(&mut self, direction: Direction);
}

impl<A: Actuator + ?Sized> Actuator for &mut A {
    fn step(&mut self, direction: Direction) {
        (**self).step(direction)
    }
}

/// An [`Actuator`] which calls a closure for every step.
#[derive(Debug, Clone)]
pub struct FnActuator<F> {
    f: F,
}

impl<F: FnMut(Direction)> FnActuator<F> {
    /// Wrap a closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Recover the closure.
    pub fn into_inner(self) -> F {
        self.f
    }
}

impl<F: FnMut(Direction)> Actuator for FnActuator<F> {
    #[inline]
    fn step(&mut self, direction: Direction) {
        (self.f)(direction)
    }
}
