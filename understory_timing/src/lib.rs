// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_timing --heading-base-level=0

//! Understory Timing: host-agnostic timer queue primitives for UI runtimes.
//!
//! UI state machines often need "after N milliseconds, do X" behavior: status
//! banners that dwell before dismissing, long-press recognition, debounced
//! input. This crate provides the bookkeeping for such timers without owning
//! an event loop:
//!
//! - [`TimerQueue`]: an ordered set of pending deadlines, each tagged with a
//!   caller-defined key. Hosts ask for the [next deadline](TimerQueue::next_deadline)
//!   to schedule a wakeup, then [pop expired](TimerQueue::pop_expired) timers.
//! - [`Clock`]: a millisecond time source. [`ManualClock`] is a shared, manually
//!   advanced clock for tests and scripted hosts; `StdClock` (with the `std`
//!   feature) reads wall-clock time.
//!
//! Timestamps are plain `u64` milliseconds on a monotonic timeline chosen by
//! the host. The queue never reads a clock itself; callers pass `now`.
//!
//! ## Minimal example
//!
//! ```rust
//! use understory_timing::{Clock, ManualClock, TimerQueue};
//!
//! let clock = ManualClock::new(0);
//! let mut timers = TimerQueue::new();
//!
//! timers.schedule(clock.now() + 600, "dismiss");
//! timers.schedule(clock.now() + 100, "blink");
//! assert_eq!(timers.next_deadline(), Some(100));
//!
//! clock.advance(100);
//! let fired = timers.pop_expired(clock.now()).unwrap();
//! assert_eq!(fired.key, "blink");
//! assert!(timers.pop_expired(clock.now()).is_none());
//! ```
//!
//! ## Cancellation
//!
//! Timers can be cancelled individually by [`TimerId`], or in bulk with
//! [`TimerQueue::cancel_where`]. State machines typically key timers by the
//! state that scheduled them and cancel every timer whose state was exited.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

mod clock;
mod queue;

#[cfg(feature = "std")]
pub use clock::StdClock;
pub use clock::{Clock, ManualClock};
pub use queue::{Expired, TimerId, TimerQueue};
