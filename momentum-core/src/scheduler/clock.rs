//! Time sources.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// A monotonic source of timestamps in milliseconds.
pub trait Clock {
    /// The current time in milliseconds.
    fn now(&self) -> f64;
}

/// Wall-clock time measured from when the clock was created.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    /// Create a clock reading 0 now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same time, so a test can hold one handle and give
/// another to the code under test.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    time: Rc<Cell<f64>>,
}

impl ManualClock {
    /// Create a clock reading 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the clock forward by `ms` milliseconds.
    pub fn advance(&self, ms: f64) {
        self.time.set(self.time.get() + ms);
    }

    /// Set the clock to an absolute time.
    pub fn set(&self, ms: f64) {
        self.time.set(ms);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> f64 {
        self.time.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new();
        let handle = clock.clone();

        clock.advance(5.0);
        handle.advance(10.0);

        assert_eq!(clock.now(), 15.0);

        handle.set(2.0);
        assert_eq!(clock.now(), 2.0);
    }

    #[test]
    fn system_clock_does_not_go_backwards() {
        let clock = SystemClock::new();
        let first = clock.now();
        let second = clock.now();

        assert!(second >= first);
    }
}
