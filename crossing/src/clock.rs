//! Time as seen by the simulation.

use std::thread;
use std::time::{Duration, Instant};

pub trait Clock: Sync {
    /// Time passed since the simulation started.
    fn elapsed(&self) -> Duration;
    /// Blocks the calling thread.
    fn sleep(&self, dt: Duration);
}

pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn start() -> SystemClock {
        SystemClock { start: Instant::now() }
    }
}

impl Clock for SystemClock {
    fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&self, dt: Duration) {
        if dt > Duration::from_secs(0) {
            thread::sleep(dt);
        }
    }
}

/// Wall clock running `factor` times faster than real time.
pub struct ScaledClock {
    inner: SystemClock,
    factor: u32,
}

impl ScaledClock {
    pub fn start(factor: u32) -> ScaledClock {
        ScaledClock { inner: SystemClock::start(), factor: factor.max(1) }
    }
}

impl Clock for ScaledClock {
    fn elapsed(&self) -> Duration {
        self.inner.elapsed() * self.factor
    }

    fn sleep(&self, dt: Duration) {
        self.inner.sleep(dt / self.factor)
    }
}
