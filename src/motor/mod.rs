//! Gauge module for gauge-stepper.
//!
//! Provides the needle motion controller, its builder and a facade for
//! bringing up several gauges from one configuration.

mod axis;
mod builder;
mod system;

pub use axis::MotionAxis;
pub use builder::MotionAxisBuilder;
pub use system::{update_all, Gauge, GaugeSystem};
