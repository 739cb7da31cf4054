//! Acceleration profile lookup.
//!
//! The profile is an ordered table mapping the velocity surrogate (steps
//! travelled under acceleration since the last stop) to the delay before the
//! next step. Only integer arithmetic and a forward scan are used so the
//! lookup stays cheap enough to run once per step on small controllers.

use heapless::Vec;

use crate::error::{ProfileError, Result};

/// Maximum number of entries in an acceleration table.
pub const MAX_PROFILE_ENTRIES: usize = 16;

/// Table for step/direction driver chips (X12 class gauges).
const STEP_DIR_TABLE: [(u16, u32); 5] = [(20, 800), (50, 400), (100, 200), (150, 150), (300, 90)];

/// Table for directly commutated four-wire motors (X25 class gauges).
///
/// Around 400 µs per step is the practical limit with light needles.
const FOUR_WIRE_TABLE: [(u16, u32); 5] =
    [(20, 3000), (50, 1500), (100, 1000), (150, 800), (300, 600)];

/// One row of an acceleration table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProfileEntry {
    /// Velocity surrogate this row applies up to (inclusive).
    pub velocity: u16,
    /// Delay before the next step, in microseconds.
    pub delay_us: u32,
}

/// Ordered velocity-to-delay table.
///
/// Invariants, checked by [`AccelerationProfile::new`]:
/// - velocities strictly increase
/// - delays never increase
/// - the last velocity is at least 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccelerationProfile {
    entries: Vec<ProfileEntry, MAX_PROFILE_ENTRIES>,
}

impl AccelerationProfile {
    /// Build a profile from `(velocity, delay_us)` pairs.
    ///
    /// # Errors
    ///
    /// Returns a [`ProfileError`] if the table is empty, too long, not
    /// strictly increasing in velocity, increasing in delay, or tops out at
    /// velocity 0.
    pub fn new(table: &[(u16, u32)]) -> Result<Self> {
        if table.is_empty() {
            return Err(ProfileError::Empty.into());
        }
        if table.len() > MAX_PROFILE_ENTRIES {
            return Err(ProfileError::TooManyEntries(table.len()).into());
        }

        for (index, pair) in table.windows(2).enumerate() {
            let (prev, next) = (pair[0], pair[1]);
            if next.0 <= prev.0 {
                return Err(ProfileError::NotIncreasing {
                    index: index + 1,
                    previous: prev.0,
                    velocity: next.0,
                }
                .into());
            }
            if next.1 > prev.1 {
                return Err(ProfileError::DelayIncreases {
                    index: index + 1,
                    previous: prev.1,
                    delay_us: next.1,
                }
                .into());
            }
        }

        if table[table.len() - 1].0 == 0 {
            return Err(ProfileError::ZeroMaxVelocity.into());
        }

        Ok(Self::from_trusted(table))
    }

    /// Built-in table for step/direction driver chips.
    pub fn step_dir_default() -> Self {
        Self::from_trusted(&STEP_DIR_TABLE)
    }

    /// Built-in table for four-wire directly commutated motors.
    pub fn four_wire_default() -> Self {
        Self::from_trusted(&FOUR_WIRE_TABLE)
    }

    fn from_trusted(table: &[(u16, u32)]) -> Self {
        let mut entries = Vec::new();
        for &(velocity, delay_us) in table.iter().take(MAX_PROFILE_ENTRIES) {
            let _ = entries.push(ProfileEntry { velocity, delay_us });
        }
        Self { entries }
    }

    /// Delay in microseconds to wait after a step taken at `velocity`.
    ///
    /// Returns the delay of the first entry whose velocity is at least
    /// `velocity`. Callers must not exceed [`max_velocity`](Self::max_velocity);
    /// debug builds assert on it, release builds fall back to the last entry.
    pub fn delay_for(&self, velocity: u16) -> u32 {
        debug_assert!(
            velocity <= self.max_velocity(),
            "velocity surrogate exceeds the acceleration table"
        );

        self.entries
            .iter()
            .find(|entry| entry.velocity >= velocity)
            .or_else(|| self.entries.last())
            .map(|entry| entry.delay_us)
            .unwrap_or(0)
    }

    /// Highest velocity surrogate the table covers.
    #[inline]
    pub fn max_velocity(&self) -> u16 {
        self.entries.last().map(|entry| entry.velocity).unwrap_or(0)
    }

    /// The table rows in order.
    #[inline]
    pub fn entries(&self) -> &[ProfileEntry] {
        &self.entries
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a constructed profile.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for AccelerationProfile {
    fn default() -> Self {
        Self::step_dir_default()
    }
}
