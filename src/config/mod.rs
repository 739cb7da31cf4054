//! Configuration module for gauge-stepper.
//!
//! Provides types for loading and validating gauge and acceleration table
//! configurations from TOML files (with `std` feature) or pre-parsed data.

mod gauge;
mod profile;
mod range;
mod system;
pub mod units;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use gauge::{DriverKind, GaugeConfig};
pub use profile::ProfileConfig;
pub use range::StepRange;
pub use system::SystemConfig;
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

// Re-export unit types at config level
pub use units::{Degrees, DEFAULT_SWEEP_DEGREES};
