//! Non-blocking gauge needle motion controller.
//!
//! Generic over the actuator, the clock and the acceleration table handle so
//! one implementation serves step/direction and four-wire gauges alike.

use core::borrow::Borrow;
use core::cmp::Ordering;

use embedded_hal::delay::DelayNs;

use crate::actuator::Actuator;
use crate::clock::{elapsed_micros, Clock};
use crate::config::{Degrees, StepRange};
use crate::motion::{AccelerationProfile, Direction, MotionPhase};

/// Open-loop motion controller for one gauge needle.
///
/// Generic over:
/// - `A`: winding driver (must implement [`Actuator`])
/// - `C`: microsecond time source (must implement [`Clock`])
/// - `P`: acceleration table handle, owned by default or borrowed when
///   several gauges share one table
///
/// Call [`update`](Self::update) as often as possible from the main loop.
/// Each call either returns immediately or takes exactly one step.
pub struct MotionAxis<A, C, P = AccelerationProfile>
where
    A: Actuator,
    C: Clock,
    P: Borrow<AccelerationProfile>,
{
    actuator: A,
    clock: C,
    profile: P,

    /// Gauge name for logging/debugging.
    name: heapless::String<32>,

    /// Mechanical range is `0..total_steps`.
    total_steps: u32,

    /// Addressable sub-range, targets are clamped into it.
    range: StepRange,

    current_step: u32,
    target_step: u32,

    /// Steps travelled under acceleration since the last stop. Zero only at rest.
    velocity: u16,

    /// Ceiling applied on top of the table's own maximum.
    velocity_cap: u16,

    /// `None` only at rest.
    direction: Option<Direction>,

    phase: MotionPhase,
    stopped: bool,

    /// Clock reading when the last state transition happened.
    last_step_at: u32,

    /// Time that must elapse after `last_step_at` before the next step.
    next_delay_us: u32,

    /// Fixed step period for homing and blocking moves.
    homing_period_us: u32,

    steps_per_degree: f32,
}

impl<A, C, P> MotionAxis<A, C, P>
where
    A: Actuator,
    C: Clock,
    P: Borrow<AccelerationProfile>,
{
    /// Create an axis at rest on step 0.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        actuator: A,
        clock: C,
        profile: P,
        name: heapless::String<32>,
        total_steps: u32,
        range: StepRange,
        velocity_cap: Option<u16>,
        homing_period_us: u32,
        sweep: Degrees,
    ) -> Self {
        let now = clock.now_micros();
        Self {
            actuator,
            clock,
            profile,
            name,
            total_steps,
            range,
            current_step: 0,
            target_step: 0,
            velocity: 0,
            velocity_cap: velocity_cap.unwrap_or(u16::MAX).max(1),
            direction: None,
            phase: MotionPhase::Stopped,
            stopped: true,
            last_step_at: now,
            next_delay_us: 0,
            homing_period_us,
            steps_per_degree: total_steps as f32 / sweep.0,
        }
    }

    /// Get the gauge name.
    #[inline]
    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// Full mechanical range in steps.
    #[inline]
    pub fn total_steps(&self) -> u32 {
        self.total_steps
    }

    /// Addressable range.
    #[inline]
    pub fn range(&self) -> StepRange {
        self.range
    }

    /// Current absolute position (dead reckoning).
    #[inline]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    /// Position the needle is heading for.
    #[inline]
    pub fn target_step(&self) -> u32 {
        self.target_step
    }

    /// Current velocity surrogate.
    #[inline]
    pub fn velocity(&self) -> u16 {
        self.velocity
    }

    /// Direction of travel, `None` at rest.
    #[inline]
    pub fn direction(&self) -> Option<Direction> {
        self.direction
    }

    /// Direction of travel as -1, 0 or +1.
    #[inline]
    pub fn direction_sign(&self) -> i8 {
        self.direction.map(Direction::sign).unwrap_or(0)
    }

    /// What the velocity rule did on the most recent step.
    #[inline]
    pub fn phase(&self) -> MotionPhase {
        self.phase
    }

    /// True once the needle has come to rest on its target.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Delay that must pass before the next step.
    #[inline]
    pub fn next_delay_us(&self) -> u32 {
        self.next_delay_us
    }

    /// The acceleration table in use.
    #[inline]
    pub fn profile(&self) -> &AccelerationProfile {
        self.profile.borrow()
    }

    /// Effective velocity ceiling: the cap or the table maximum, whichever is lower.
    #[inline]
    pub fn max_velocity(&self) -> u16 {
        self.velocity_ceiling()
    }

    /// True while running at the velocity ceiling.
    #[inline]
    pub fn is_at_max_velocity(&self) -> bool {
        self.velocity != 0 && self.velocity == self.velocity_ceiling()
    }

    /// Step period used by [`zero`](Self::zero) and [`step_to`](Self::step_to).
    #[inline]
    pub fn homing_period_us(&self) -> u32 {
        self.homing_period_us
    }

    /// Current position in degrees of sweep.
    #[inline]
    pub fn position_degrees(&self) -> Degrees {
        Degrees::from_steps(self.current_step, self.steps_per_degree)
    }

    /// Borrow the actuator.
    #[inline]
    pub fn actuator(&self) -> &A {
        &self.actuator
    }

    /// Mutably borrow the actuator.
    #[inline]
    pub fn actuator_mut(&mut self) -> &mut A {
        &mut self.actuator
    }

    /// Take the axis apart.
    pub fn release(self) -> (A, C, P) {
        (self.actuator, self.clock, self.profile)
    }

    /// Command a new target position.
    ///
    /// Out-of-range positions are clamped to the nearest bound. A stopped
    /// axis restarts its timing so the next [`update`](Self::update) steps
    /// immediately; a moving axis keeps its velocity and adjusts on its next
    /// step.
    pub fn set_position(&mut self, position: u32) {
        let target = self.range.clamp(position);
        if target != position {
            debug!("{}: target {} clamped to {}", self.name.as_str(), position, target);
        }

        self.target_step = target;

        if self.stopped {
            // a stale timestamp could read as a huge elapsed time after a long idle
            self.stopped = false;
            self.last_step_at = self.clock.now_micros();
            self.next_delay_us = 0;
            debug!(
                "{}: moving from {} to {}",
                self.name.as_str(),
                self.current_step,
                target
            );
        }
    }

    /// Command a new target in degrees of sweep.
    pub fn set_degrees(&mut self, degrees: Degrees) {
        self.set_position(degrees.to_steps(self.steps_per_degree));
    }

    /// Change the addressable range.
    ///
    /// `high` is limited to the last mechanical step and `low` to `high`. If
    /// the current target falls outside, the needle is retargeted to the
    /// nearest bound.
    pub fn set_range(&mut self, low: u32, high: u32) {
        self.range = StepRange::clamped(low, high, self.total_steps);
        if !self.range.contains(self.target_step) {
            self.set_position(self.target_step);
        }
    }

    /// Replace the acceleration table.
    ///
    /// Legal while moving; the new table applies from the next step.
    pub fn set_profile(&mut self, profile: P) {
        self.profile = profile;
        debug!(
            "{}: profile replaced, ceiling {}",
            self.name.as_str(),
            self.velocity_ceiling()
        );
    }

    /// Cap the velocity surrogate below the table maximum. Zero is treated as one.
    pub fn set_max_velocity(&mut self, cap: u16) {
        self.velocity_cap = cap.max(1);
    }

    /// Poll the axis and step it if a step is due.
    ///
    /// Never blocks beyond one step. Elapsed time is measured with wrapping
    /// subtraction so clock wraparound is harmless. Returns `true` if the
    /// axis advanced.
    pub fn update(&mut self) -> bool {
        if self.stopped {
            return false;
        }

        let elapsed = elapsed_micros(self.clock.now_micros(), self.last_step_at);
        if elapsed < self.next_delay_us {
            return false;
        }

        self.advance();
        true
    }

    /// Drive the needle to rest on its target (blocking).
    ///
    /// Sleeps out each remaining step delay on `delay` instead of polling the
    /// clock, so timing matches [`update`](Self::update) called in a tight loop.
    pub fn run_to_completion<D: DelayNs>(&mut self, delay: &mut D) {
        while !self.stopped {
            let elapsed = elapsed_micros(self.clock.now_micros(), self.last_step_at);
            delay.delay_us(self.next_delay_us.saturating_sub(elapsed));
            self.advance();
        }
    }

    /// Take one step towards the target, ignoring the clock.
    ///
    /// [`update`](Self::update) calls this when a step is due. Calling it
    /// directly is useful for simulation.
    pub fn advance(&mut self) {
        if self.current_step == self.target_step && self.velocity == 0 {
            if !self.stopped {
                info!("{}: stopped at {}", self.name.as_str(), self.current_step);
            }
            self.stopped = true;
            self.direction = None;
            self.phase = MotionPhase::Stopped;
            self.last_step_at = self.clock.now_micros();
            return;
        }

        let direction = match self.direction {
            Some(direction) if self.velocity > 0 => direction,
            _ => {
                let direction = Direction::towards(self.current_step, self.target_step);
                self.direction = Some(direction);
                // starting at 1 keeps the braking branch from going below zero
                self.velocity = 1;
                direction
            }
        };

        self.step_once(direction);

        let previous = self.velocity;
        let velocity = self.clamp_velocity(self.next_velocity(direction));
        self.phase = match velocity.cmp(&previous) {
            Ordering::Greater => MotionPhase::Accelerating,
            Ordering::Equal => MotionPhase::Cruising,
            Ordering::Less => MotionPhase::Decelerating,
        };
        self.velocity = velocity;

        self.next_delay_us = self.profile.borrow().delay_for(self.velocity);
        self.last_step_at = self.clock.now_micros();
    }

    /// Home the needle against its end stop (blocking).
    ///
    /// Drives the full mechanical range counter-clockwise at the fixed homing
    /// period regardless of the believed position, then declares step 0.
    /// Meant to run once at startup.
    pub fn zero<D: DelayNs>(&mut self, delay: &mut D) {
        info!(
            "{}: homing over {} steps",
            self.name.as_str(),
            self.total_steps
        );

        for _ in 0..self.total_steps {
            self.actuator.step(Direction::CounterClockwise);
            delay.delay_us(self.homing_period_us);
        }

        self.current_step = 0;
        self.target_step = 0;
        self.settle();
        debug!("{}: homed", self.name.as_str());
    }

    /// Move to a position at the fixed homing period, without acceleration
    /// (blocking).
    pub fn step_to<D: DelayNs>(&mut self, position: u32, delay: &mut D) {
        let target = self.range.clamp(position);
        let direction = Direction::towards(self.current_step, target);
        let count = self.current_step.abs_diff(target);

        for _ in 0..count {
            self.step_once(direction);
            delay.delay_us(self.homing_period_us);
        }

        self.target_step = target;
        self.settle();
    }

    /// Enter the stopped state where the needle is.
    fn settle(&mut self) {
        self.velocity = 0;
        self.direction = None;
        self.phase = MotionPhase::Stopped;
        self.stopped = true;
        self.next_delay_us = 0;
        self.last_step_at = self.clock.now_micros();
    }

    /// Step once unless the needle is already against a mechanical end.
    fn step_once(&mut self, direction: Direction) {
        let next = match direction {
            Direction::Clockwise if self.current_step + 1 < self.total_steps => {
                self.current_step + 1
            }
            Direction::CounterClockwise if self.current_step > 0 => self.current_step - 1,
            _ => {
                trace!("{}: at end stop {}", self.name.as_str(), self.current_step);
                return;
            }
        };

        self.actuator.step(direction);
        self.current_step = next;
    }

    /// Steps left to the target in the direction of travel, negative once past it.
    fn remaining(&self, direction: Direction) -> i64 {
        let (current, target) = (i64::from(self.current_step), i64::from(self.target_step));
        match direction {
            Direction::Clockwise => target - current,
            Direction::CounterClockwise => current - target,
        }
    }

    /// Velocity after a step, before the ceiling is applied.
    ///
    /// While approaching the target the velocity never exceeds the steps
    /// remaining, so the needle arrives with velocity 1 and the arrival step
    /// brings it to 0 exactly on target.
    fn next_velocity(&self, direction: Direction) -> u16 {
        let velocity = self.velocity;
        let remaining = self.remaining(direction);

        if remaining <= 0 {
            // at or past the target, brake
            return velocity.saturating_sub(1);
        }

        let remaining = u16::try_from(remaining).unwrap_or(u16::MAX);
        match remaining.cmp(&velocity) {
            Ordering::Less => remaining,
            Ordering::Equal => velocity,
            Ordering::Greater if velocity < self.velocity_ceiling() => velocity + 1,
            Ordering::Greater => velocity,
        }
    }

    fn velocity_ceiling(&self) -> u16 {
        self.velocity_cap.min(self.profile.borrow().max_velocity())
    }

    /// Single point where the velocity ceiling is enforced.
    fn clamp_velocity(&self, velocity: u16) -> u16 {
        velocity.min(self.velocity_ceiling())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use std::vec::Vec;

    #[derive(Debug, Default)]
    struct Recorder {
        steps: Vec<Direction>,
    }

    impl Actuator for Recorder {
        fn step(&mut self, direction: Direction) {
            self.steps.push(direction);
        }
    }

    fn axis(clock: &ManualClock, total_steps: u32) -> MotionAxis<Recorder, &ManualClock> {
        MotionAxis::new(
            Recorder::default(),
            clock,
            AccelerationProfile::default(),
            heapless::String::try_from("test").unwrap(),
            total_steps,
            StepRange::full(total_steps),
            None,
            300,
            Degrees(315.0),
        )
    }

    /// Advance until stopped, returning the velocity seen after every step.
    fn run(axis: &mut MotionAxis<Recorder, &ManualClock>) -> Vec<u16> {
        let mut velocities = Vec::new();
        for _ in 0..100_000 {
            axis.advance();
            if axis.is_stopped() {
                return velocities;
            }
            velocities.push(axis.velocity());
        }
        panic!("axis never stopped");
    }

    #[test]
    fn test_first_step_from_rest() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(100);
        axis.advance();

        assert_eq!(axis.direction(), Some(Direction::Clockwise));
        assert_eq!(axis.direction_sign(), 1);
        assert_eq!(axis.current_step(), 1);
        assert_eq!(axis.velocity(), 2);
        assert_eq!(axis.next_delay_us(), 800);
        assert_eq!(axis.phase(), MotionPhase::Accelerating);
    }

    #[test]
    fn test_move_arrives_exactly_on_target() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(100);
        let velocities = run(&mut axis);

        assert_eq!(axis.current_step(), 100);
        assert_eq!(axis.velocity(), 0);
        assert_eq!(axis.direction(), None);
        assert_eq!(axis.phase(), MotionPhase::Stopped);
        assert_eq!(axis.actuator().steps.len(), 100);
        assert!(axis.actuator().steps.iter().all(|d| *d == Direction::Clockwise));

        // zero only on the arrival step
        assert_eq!(velocities.last(), Some(&0));
        assert!(velocities[..velocities.len() - 1].iter().all(|v| *v > 0));
        // symmetric ramp peaks half way
        assert_eq!(velocities.iter().max(), Some(&50));
    }

    #[test]
    fn test_reverse_move() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);
        axis.step_to(200, &mut NoopDelay::new());

        axis.set_position(150);
        run(&mut axis);

        assert_eq!(axis.current_step(), 150);
        let reverse = axis
            .actuator()
            .steps
            .iter()
            .filter(|d| **d == Direction::CounterClockwise)
            .count();
        assert_eq!(reverse, 50);
    }

    #[test]
    fn test_update_waits_for_delay() {
        let clock = ManualClock::new(1_000);
        let mut axis = axis(&clock, 315);

        assert!(!axis.update(), "stopped axis must not step");

        axis.set_position(50);
        assert!(axis.update(), "first step is immediate");
        assert_eq!(axis.current_step(), 1);

        assert!(!axis.update());
        clock.advance(799);
        assert!(!axis.update());
        clock.advance(1);
        assert!(axis.update());
        assert_eq!(axis.current_step(), 2);
    }

    #[test]
    fn test_set_position_clamps_to_range() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(10_000);
        assert_eq!(axis.target_step(), 314);

        axis.set_range(20, 200);
        assert_eq!(axis.target_step(), 200);

        axis.set_position(3);
        assert_eq!(axis.target_step(), 20);
    }

    #[test]
    fn test_set_range_retargets_stopped_axis() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);
        axis.set_position(5);
        run(&mut axis);
        assert!(axis.is_stopped());

        axis.set_range(10, 50);
        assert_eq!(axis.target_step(), 10);
        assert!(!axis.is_stopped());

        run(&mut axis);
        assert_eq!(axis.current_step(), 10);
    }

    #[test]
    fn test_retarget_behind_overshoots_and_returns() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(300);
        while axis.velocity() < 70 {
            axis.advance();
        }
        let passed = axis.current_step();
        assert!(passed > 60);

        axis.set_position(60);
        axis.advance();
        assert_eq!(axis.phase(), MotionPhase::Decelerating);
        assert_eq!(axis.velocity(), 69);
        assert_eq!(axis.direction(), Some(Direction::Clockwise));

        run(&mut axis);
        assert_eq!(axis.current_step(), 60);
        assert_eq!(axis.velocity(), 0);
    }

    #[test]
    fn test_retarget_close_ahead_brakes_onto_target() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(300);
        while axis.velocity() < 50 {
            axis.advance();
        }
        let here = axis.current_step();

        axis.set_position(here + 11);
        let velocities = run(&mut axis);

        assert_eq!(axis.current_step(), here + 11);
        assert_eq!(velocities.first(), Some(&10));
        assert_eq!(velocities.last(), Some(&0));
    }

    #[test]
    fn test_velocity_cap() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);
        axis.set_max_velocity(15);

        axis.set_position(300);
        let velocities = run(&mut axis);

        assert_eq!(velocities.iter().max(), Some(&15));
        assert_eq!(axis.max_velocity(), 15);
    }

    #[test]
    fn test_at_max_velocity_flag() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);
        axis.set_max_velocity(5);
        axis.set_position(100);

        let mut seen = false;
        while !axis.is_stopped() {
            axis.advance();
            seen |= axis.is_at_max_velocity();
        }
        assert!(seen);
        assert!(!axis.is_at_max_velocity());
    }

    #[test]
    fn test_smaller_profile_applies_next_step() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(300);
        while axis.velocity() < 40 {
            axis.advance();
        }

        axis.set_profile(AccelerationProfile::new(&[(10, 900), (25, 500)]).unwrap());
        axis.advance();
        assert_eq!(axis.velocity(), 25);
        assert_eq!(axis.next_delay_us(), 500);
        assert_eq!(axis.phase(), MotionPhase::Decelerating);

        let velocities = run(&mut axis);
        assert!(velocities.iter().all(|v| *v <= 25));
        assert_eq!(axis.current_step(), 300);
    }

    #[test]
    fn test_end_stop_blocks_step() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 20);
        axis.step_to(19, &mut NoopDelay::new());
        let issued = axis.actuator().steps.len();

        // travelling clockwise past a target behind us while on the end stop
        axis.stopped = false;
        axis.direction = Some(Direction::Clockwise);
        axis.velocity = 3;
        axis.target_step = 10;
        axis.advance();

        assert_eq!(axis.current_step(), 19);
        assert_eq!(axis.actuator().steps.len(), issued);
        assert_eq!(axis.velocity(), 2);

        run(&mut axis);
        assert_eq!(axis.current_step(), 10);
    }

    #[test]
    fn test_zero_drives_full_range() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);
        axis.set_position(120);
        run(&mut axis);

        let before = axis.actuator().steps.len();
        axis.zero(&mut NoopDelay::new());

        let homing = &axis.actuator().steps[before..];
        assert_eq!(homing.len(), 315);
        assert!(homing.iter().all(|d| *d == Direction::CounterClockwise));
        assert_eq!(axis.current_step(), 0);
        assert_eq!(axis.target_step(), 0);
        assert!(axis.is_stopped());
        assert_eq!(axis.direction_sign(), 0);
    }

    #[test]
    fn test_step_to_is_fixed_rate() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.step_to(42, &mut NoopDelay::new());
        assert_eq!(axis.current_step(), 42);
        assert_eq!(axis.target_step(), 42);
        assert_eq!(axis.actuator().steps.len(), 42);
        assert!(axis.is_stopped());
        assert!(!axis.update());
    }

    #[test]
    fn test_run_to_completion() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(77);
        axis.run_to_completion(&mut NoopDelay::new());

        assert!(axis.is_stopped());
        assert_eq!(axis.current_step(), 77);
        assert_eq!(axis.actuator().steps.len(), 77);
    }

    #[test]
    fn test_degrees() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 945);

        axis.set_degrees(Degrees(90.0));
        assert_eq!(axis.target_step(), 270);

        run(&mut axis);
        assert!((axis.position_degrees().value() - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_stale_timestamp_reset_on_restart() {
        let clock = ManualClock::new(0);
        let mut axis = axis(&clock, 315);

        axis.set_position(3);
        while !axis.is_stopped() {
            clock.advance(1_000);
            axis.update();
        }

        // long idle, then a new command: exactly one immediate step
        clock.advance(4_000_000_000);
        axis.set_position(100);
        assert!(axis.update());
        assert!(!axis.update());
    }
}
