// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Millisecond time sources.

use alloc::rc::Rc;
use core::cell::Cell;

/// A monotonic millisecond time source.
pub trait Clock {
    /// Returns the current time in milliseconds.
    fn now(&self) -> u64;
}

impl<F> Clock for F
where
    F: Fn() -> u64,
{
    fn now(&self) -> u64 {
        self()
    }
}

/// A manually advanced clock.
///
/// Clones share the same underlying time, so a test can hand one clone to a
/// state machine and keep another to move time forward.
///
/// ```
/// use understory_timing::{Clock, ManualClock};
///
/// let clock = ManualClock::new(10);
/// let handle = clock.clone();
/// handle.advance(5);
/// assert_eq!(clock.now(), 15);
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    /// Creates a clock starting at `start` milliseconds.
    #[must_use]
    pub fn new(start: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start)),
        }
    }

    /// Moves time forward by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get().saturating_add(ms));
    }

    /// Sets the current time.
    ///
    /// Time never runs backwards: values earlier than the current time are ignored.
    pub fn set(&self, now: u64) {
        if now > self.now.get() {
            self.now.set(now);
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.now.get()
    }
}

/// Wall-clock time measured from the moment the clock was created.
#[cfg(feature = "std")]
#[derive(Clone, Copy, Debug)]
pub struct StdClock {
    origin: std::time::Instant,
}

#[cfg(feature = "std")]
impl StdClock {
    /// Creates a clock whose time zero is now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: std::time::Instant::now(),
        }
    }
}

#[cfg(feature = "std")]
impl Default for StdClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "std")]
impl Clock for StdClock {
    fn now(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_is_shared_between_clones() {
        let clock = ManualClock::new(0);
        let other = clock.clone();
        other.advance(250);
        assert_eq!(clock.now(), 250);
    }

    #[test]
    fn manual_clock_never_runs_backwards() {
        let clock = ManualClock::new(100);
        clock.set(40);
        assert_eq!(clock.now(), 100);
        clock.set(140);
        assert_eq!(clock.now(), 140);
    }

    #[test]
    fn advance_saturates() {
        let clock = ManualClock::new(u64::MAX - 1);
        clock.advance(10);
        assert_eq!(clock.now(), u64::MAX);
    }

    #[test]
    fn closures_are_clocks() {
        let fixed = || 42_u64;
        assert_eq!(fixed.now(), 42);
    }

    #[cfg(feature = "std")]
    #[test]
    fn std_clock_starts_near_zero() {
        let clock = StdClock::new();
        assert!(clock.now() < 1_000, "fresh clock should report elapsed time since creation");
    }
}
