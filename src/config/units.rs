//! Unit types for needle angles.
//!
//! Positions are commanded in steps internally; [`Degrees`] is the
//! user-facing unit for dials printed in degrees of sweep.

use core::ops::{Add, Sub};

use serde::Deserialize;

/// Needle sweep of the common automotive gauge motors (X25, X27, X12).
pub const DEFAULT_SWEEP_DEGREES: f32 = 315.0;

/// Angular position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f32);

impl Degrees {
    /// Create a new Degrees value.
    #[inline]
    pub const fn new(value: f32) -> Self {
        Self(value)
    }

    /// Get the raw value.
    #[inline]
    pub const fn value(self) -> f32 {
        self.0
    }

    /// Nearest whole step for this angle.
    ///
    /// Negative angles saturate to step 0.
    #[inline]
    pub fn to_steps(self, steps_per_degree: f32) -> u32 {
        libm::roundf(self.0 * steps_per_degree) as u32
    }

    /// Angle of a step position.
    #[inline]
    pub fn from_steps(steps: u32, steps_per_degree: f32) -> Self {
        Self(steps as f32 / steps_per_degree)
    }
}

impl Add for Degrees {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Degrees {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

/// Extension trait for creating unit types from primitives.
pub trait UnitExt {
    /// Convert to Degrees.
    fn degrees(self) -> Degrees;
}

impl UnitExt for f32 {
    #[inline]
    fn degrees(self) -> Degrees {
        Degrees(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degrees_to_steps_rounds() {
        // X25: 945 steps over 315 degrees
        let spd = 945.0 / 315.0;
        assert_eq!(Degrees(90.0).to_steps(spd), 270);
        assert_eq!(Degrees(0.2).to_steps(spd), 1);
        assert_eq!(Degrees(0.1).to_steps(spd), 0);
    }

    #[test]
    fn test_negative_degrees_saturate() {
        assert_eq!(Degrees(-10.0).to_steps(3.0), 0);
    }

    #[test]
    fn test_steps_to_degrees() {
        let d = Degrees::from_steps(450, 3.0);
        assert!((d.value() - 150.0).abs() < 0.001);
        assert_eq!(30.0.degrees() + 15.0.degrees(), Degrees(45.0));
    }
}
