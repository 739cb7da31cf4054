//! # gauge-stepper
//!
//! Needle motion control for automotive instrument-cluster stepper motors
//! (Switec X25/X27, X12 and friends) with embedded-hal 1.0 support.
//!
//! ## Features
//!
//! - **Non-blocking**: [`MotionAxis::update`] takes at most one step per call
//! - **Table-driven acceleration**: step delays come from a small velocity/delay table
//! - **Exact arrival**: the needle always comes to rest on the commanded step
//! - **Two drive schemes**: step/direction driver chips and direct four-wire commutation
//! - **Configuration-driven**: define gauges and tables in TOML files
//! - **no_std compatible**: core library works without standard library
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gauge_stepper::{MotionAxis, StepDirActuator};
//!
//! let mut speedo = MotionAxis::builder()
//!     .actuator(StepDirActuator::new(step_pin, dir_pin, delay))
//!     .clock(&clock)
//!     .total_steps(315 * 3)
//!     .build()?;
//!
//! speedo.zero(&mut delay);
//! speedo.set_position(400);
//! loop {
//!     speedo.update();
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O, TOML parsing and [`StdClock`]
//! - `defmt`: Enables defmt logging for embedded targets
//! - `log`: Enables logging through the `log` facade

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

// This mod MUST go first, so that the others see its macros.
#[macro_use]
mod fmt;

// Core modules
pub mod actuator;
pub mod clock;
pub mod config;
pub mod error;
pub mod motion;
pub mod motor;

// Re-exports for ergonomic API
pub use actuator::{Actuator, FnActuator, FourWireActuator, StepDirActuator};
pub use clock::{Clock, ManualClock};
pub use config::{validate_config, DriverKind, GaugeConfig, StepRange, SystemConfig};
pub use error::{Error, Result};
pub use motion::{AccelerationProfile, Direction, MotionPhase, ProfileEntry};
pub use motor::{update_all, Gauge, GaugeSystem, MotionAxis, MotionAxisBuilder};

#[cfg(feature = "std")]
pub use clock::StdClock;

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

// Unit types
pub use config::units::{Degrees, UnitExt};
