//! Acceleration table configuration from TOML.

use heapless::Vec;
use serde::Deserialize;

use crate::error::Result;
use crate::motion::{AccelerationProfile, MAX_PROFILE_ENTRIES};

/// A named acceleration table.
///
/// ```toml
/// [profiles.gentle]
/// entries = [[20, 3000], [50, 1500], [100, 1000]]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileConfig {
    /// `(velocity, delay_us)` rows, velocity strictly increasing.
    pub entries: Vec<(u16, u32), MAX_PROFILE_ENTRIES>,
}

impl ProfileConfig {
    /// Build the runtime profile, checking the table invariants.
    ///
    /// # Errors
    ///
    /// Returns a profile error if the table is malformed.
    pub fn to_profile(&self) -> Result<AccelerationProfile> {
        AccelerationProfile::new(&self.entries)
    }
}
