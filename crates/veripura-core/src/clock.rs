//! `Clock` implementations.

use std::{
    cell::Cell,
    time::{Duration, Instant},
};

use crate::traits::Clock;

/// The wall clock. Sleeps the calling thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep_until(&self, deadline: Instant) {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !remaining.is_zero() {
            std::thread::sleep(remaining);
        }
    }
}

/// A clock that only moves when told to.
///
/// `sleep_until` jumps straight to the deadline, so a full six-step playback
/// runs instantly while every transition still observes its delay.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
    slept: Cell<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::now()),
            slept: Cell::new(Duration::ZERO),
        }
    }

    /// Total time spent in `sleep_until`.
    pub fn slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }

    fn sleep_until(&self, deadline: Instant) {
        let now = self.now.get();
        if deadline > now {
            self.slept.set(self.slept.get() + (deadline - now));
            self.now.set(deadline);
        }
    }
}
