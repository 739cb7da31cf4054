//! Basic gauge example.
//!
//! Builds a single X12-style gauge behind a step/direction driver, homes it,
//! sweeps the needle to full scale and back, then polls it towards a reading
//! the way a main loop would.
//!
//! Run with: `cargo run --example basic_gauge`

use gauge_stepper::{Clock, Degrees, MotionAxis, StdClock, StepDirActuator};

/// Delay provider backed by the host scheduler.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        // On hardware this would be a timer
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that only remembers its level.
struct MockPin {
    state: bool,
}

impl MockPin {
    fn new() -> Self {
        Self { state: false }
    }
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

fn main() {
    println!("=== Basic Gauge Example ===\n");

    let clock = StdClock::new();
    let actuator = StepDirActuator::new(MockPin::new(), MockPin::new(), MockDelay);

    let mut speedo = MotionAxis::builder()
        .name("speedo")
        .actuator(actuator)
        .clock(&clock)
        .total_steps(315 * 3)
        .sweep_degrees(Degrees(315.0))
        .build()
        .expect("Failed to build gauge");

    println!(
        "Gauge '{}': {} steps over {:?}, ceiling velocity {}",
        speedo.name(),
        speedo.total_steps(),
        speedo.range(),
        speedo.max_velocity()
    );

    // Homing drives against the stop for the whole range
    println!("\n=== Homing ===");
    let mut delay = MockDelay;
    speedo.zero(&mut delay);
    println!("Homed at step {}", speedo.current_step());

    println!("\n=== Sweep ===");
    let started = clock.now_micros();
    speedo.set_position(speedo.range().max);
    speedo.run_to_completion(&mut delay);
    println!(
        "Full scale (step {}) reached in {} us",
        speedo.current_step(),
        clock.now_micros().wrapping_sub(started)
    );

    speedo.set_position(0);
    speedo.run_to_completion(&mut delay);
    println!("Back to step {}", speedo.current_step());

    println!("\n=== Polling ===");
    speedo.set_degrees(Degrees(120.0));
    println!("Target for 120 degrees: step {}", speedo.target_step());

    let mut steps = 0u32;
    while !speedo.is_stopped() {
        if speedo.update() {
            steps += 1;
            if steps % 50 == 0 {
                println!(
                    "  step {:>4}  velocity {:>3}  {:?}",
                    speedo.current_step(),
                    speedo.velocity(),
                    speedo.phase()
                );
            }
        }
    }
    println!("Resting at step {}", speedo.current_step());

    println!("Pin faults: {}", speedo.actuator().fault_count());

    println!("\n=== Example Complete ===");
}
