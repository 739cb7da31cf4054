//! Monotonic microsecond time sources.

use core::cell::Cell;

/// Something which reports a free-running microsecond counter.
///
/// The counter wraps at `u32::MAX`. Consumers must measure intervals with
/// wrapping subtraction, never by comparing absolute readings.
///
/// This uses shared references because one clock is normally shared by every
/// gauge on the board.
pub trait Clock {
    /// Current counter value in microseconds.
    fn now_micros(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_micros(&self) -> u32 {
        (**self).now_micros()
    }
}

/// Microseconds elapsed from `earlier` to `now`, tolerant of one wraparound.
#[inline]
pub fn elapsed_micros(now: u32, earlier: u32) -> u32 {
    now.wrapping_sub(earlier)
}

/// A clock that only moves when told to.
///
/// Useful for simulating motion and in tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    /// Create a clock reading `start`.
    pub const fn new(start: u32) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Jump to an absolute reading.
    pub fn set(&self, micros: u32) {
        self.now.set(micros);
    }

    /// Move forward, wrapping like a hardware counter.
    pub fn advance(&self, micros: u32) {
        self.now.set(self.now.get().wrapping_add(micros));
    }
}

impl Clock for ManualClock {
    fn now_micros(&self) -> u32 {
        self.now.get()
    }
}

/// A monotonically non-decreasing clock backed by the operating system.
///
/// Requires the `std` feature.
#[cfg(feature = "std")]
#[derive(Debug, Clone)]
pub struct StdClock {
    created_at: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Create a clock whose counter starts at zero now.
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self {
            created_at: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now_micros(&self) -> u32 {
        // truncation gives the same wrap a 32-bit hardware counter has
        self.created_at.elapsed().as_micros() as u32
    }
}
