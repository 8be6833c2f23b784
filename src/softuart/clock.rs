//! # Timing Source
//!
//! The transmitter needs two things from a clock: a monotonic timestamp and
//! a busy-wait with sub-microsecond resolution. A coarse sleep cannot hold
//! serial bit timing, so the production clock spins. The trait keeps the
//! spin out of unit tests: [`ManualClock`] satisfies every wait instantly by
//! fast-forwarding virtual time.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Monotonic time source with busy-wait support.
pub trait Clock: Clone {
    /// Current monotonic timestamp.
    fn now(&self) -> Instant;

    /// Spins until `deadline` has passed. Returns immediately if it already
    /// has.
    fn busy_wait_until(&self, deadline: Instant);

    /// Spins for `duration` from now.
    fn busy_wait(&self, duration: Duration) {
        self.busy_wait_until(self.now() + duration);
    }
}

/// Production clock: `std::time::Instant` plus a spin loop.
///
/// The wait never yields to the scheduler; on a dedicated core or a pinned
/// high-priority thread this holds bit timing to the resolution of the
/// underlying monotonic counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpinClock;

impl SpinClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SpinClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn busy_wait_until(&self, deadline: Instant) {
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}

/// Virtual clock for tests and the simulated line.
///
/// Time only moves when something waits on it or a test advances it, so a
/// transmission that would spin for milliseconds on hardware completes
/// immediately while still producing exact per-bit timestamps.
///
/// Clones share the same underlying time, which lets a transmitter and the
/// test driving it observe one timeline.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// The instant this clock started at; all timestamps are offsets from it.
    pub fn origin(&self) -> Instant {
        self.origin
    }

    /// Moves time forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut offset = self.offset.lock().unwrap();
        *offset += duration;
    }

    /// Moves time forward to `duration` past the origin. Earlier targets are
    /// ignored; virtual time never runs backwards.
    pub fn advance_to(&self, duration: Duration) {
        let mut offset = self.offset.lock().unwrap();
        *offset = (*offset).max(duration);
    }

    /// Virtual time elapsed since the origin.
    pub fn elapsed(&self) -> Duration {
        *self.offset.lock().unwrap()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + *self.offset.lock().unwrap()
    }

    fn busy_wait_until(&self, deadline: Instant) {
        let mut offset = self.offset.lock().unwrap();
        let target = deadline - self.origin;
        *offset = (*offset).max(target);
    }
}
