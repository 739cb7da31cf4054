//! Example: Configuration-driven dashboard.
//!
//! This example demonstrates how to:
//! - Describe several gauges and a custom acceleration table in TOML
//! - Register gauges by name with the driver each one is wired to
//! - Poll the whole dash from one loop with `update_all`
//!
//! Run with: `cargo run --example config_dash`

use gauge_stepper::{
    parse_config, update_all, validate_config, Clock, Gauge, GaugeSystem, Result, StdClock,
};

/// Delay provider backed by the host scheduler.
struct MockDelay;

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(ns as u64));
    }
}

/// Output pin that only remembers its level.
#[derive(Default)]
struct MockPin {
    state: bool,
}

impl embedded_hal::digital::OutputPin for MockPin {
    fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
        self.state = true;
        Ok(())
    }

    fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
        self.state = false;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for MockPin {
    type Error = core::convert::Infallible;
}

const DASH: &str = r#"
# Gentle table for the small auxiliary gauges
[profiles.aux]
entries = [[20, 3000], [50, 1500], [100, 1000], [150, 800], [300, 600]]

# X25 wired straight to the MCU
[gauges.speedo]
name = "Speedometer"
total_steps = 945
driver = "four_wire"

# X12 behind a driver chip, mounted mirrored
[gauges.tacho]
name = "Tachometer"
total_steps = 3780
driver = "step_dir"
invert_direction = true

[gauges.fuel]
name = "Fuel"
total_steps = 600
driver = "step_dir"
profile = "aux"
min_step = 20
max_step = 580
sweep_degrees = 100.0
"#;

fn main() -> Result<()> {
    println!("=== Configuration-Driven Dash Example ===\n");

    let config = parse_config(DASH)?;
    validate_config(&config)?;

    for name in config.gauge_names() {
        if let Some(gauge) = config.gauge(name) {
            println!(
                "  {:<8} {:<12} {:>5} steps  {:?}",
                name,
                gauge.name.as_str(),
                gauge.total_steps,
                gauge.driver
            );
        }
    }

    let mut system = GaugeSystem::from_config(config);
    let clock = StdClock::new();

    let mut speedo = system.register_four_wire::<MockPin, _>("speedo", Default::default(), &clock)?;
    let mut tacho = system.register_step_dir(
        "tacho",
        MockPin::default(),
        MockPin::default(),
        MockDelay,
        &clock,
    )?;
    let mut fuel = system.register_step_dir(
        "fuel",
        MockPin::default(),
        MockPin::default(),
        MockDelay,
        &clock,
    )?;
    println!("\nRegistered {} gauges", system.registered_count());

    println!("\n=== Homing ===");
    speedo.zero(&mut MockDelay);
    tacho.zero(&mut MockDelay);
    fuel.zero(&mut MockDelay);

    println!("\n=== Readings ===");
    speedo.set_position(600);
    tacho.set_position(1800);
    // below the fuel gauge's range, lands on min_step
    fuel.set_position(0);

    let started = clock.now_micros();
    let mut steps = 0usize;
    {
        let mut dash: [&mut dyn Gauge; 3] = [&mut speedo, &mut tacho, &mut fuel];
        while !dash.iter().all(|gauge| gauge.is_stopped()) {
            steps += update_all(&mut dash);
        }
    }
    let elapsed = clock.now_micros().wrapping_sub(started);

    println!("{} step events in {} us", steps, elapsed);
    println!("  speedo at {}", speedo.current_step());
    println!("  tacho  at {}", tacho.current_step());
    println!("  fuel   at {}", fuel.current_step());

    println!("\n=== Example Complete ===");
    Ok(())
}
