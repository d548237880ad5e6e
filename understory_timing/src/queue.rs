// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deadline-ordered timer queue.
//!
//! ## Usage
//!
//! 1) [`TimerQueue::schedule`] a deadline with a key describing what should happen.
//! 2) Ask for [`TimerQueue::next_deadline`] to know when to wake up next.
//! 3) When time has passed, call [`TimerQueue::pop_expired`] until it returns `None`.
//!
//! Timers sharing a deadline expire in the order they were scheduled.

use smallvec::SmallVec;

/// Identifies one scheduled timer.
///
/// Ids are unique for the lifetime of the queue that issued them.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// A timer that reached its deadline.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expired<K> {
    /// The id returned by [`TimerQueue::schedule`].
    pub id: TimerId,
    /// The deadline the timer was scheduled for, which may be earlier than `now`.
    pub deadline: u64,
    /// The caller-defined key.
    pub key: K,
}

#[derive(Clone, Debug)]
struct Entry<K> {
    id: TimerId,
    deadline: u64,
    key: K,
}

/// An ordered set of pending timers tagged with keys of type `K`.
#[derive(Clone, Debug)]
pub struct TimerQueue<K> {
    // Sorted by (deadline, id).
    entries: SmallVec<[Entry<K>; 4]>,
    next_id: u64,
}

impl<K> Default for TimerQueue<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TimerQueue<K> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
            next_id: 0,
        }
    }

    /// Number of pending timers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no timers are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Schedules `key` to expire at `deadline`.
    pub fn schedule(&mut self, deadline: u64, key: K) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let at = self.entries.partition_point(|e| e.deadline <= deadline);
        self.entries.insert(at, Entry { id, deadline, key });
        id
    }

    /// Returns `true` if the timer is still pending.
    #[must_use]
    pub fn contains(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Cancels a single timer, returning its key if it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> Option<K> {
        let index = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(index).key)
    }

    /// Cancels every timer whose key matches `predicate`, returning how many were removed.
    pub fn cancel_where(&mut self, mut predicate: impl FnMut(&K) -> bool) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| !predicate(&e.key));
        before - self.entries.len()
    }

    /// Cancels all timers.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// The earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.entries.first().map(|e| e.deadline)
    }

    /// Removes and returns the earliest timer whose deadline is at or before `now`.
    pub fn pop_expired(&mut self, now: u64) -> Option<Expired<K>> {
        if self.entries.first()?.deadline > now {
            return None;
        }
        let Entry { id, deadline, key } = self.entries.remove(0);
        Some(Expired { id, deadline, key })
    }

    /// Iterates pending timers in expiry order.
    pub fn iter(&self) -> impl Iterator<Item = (TimerId, u64, &K)> + '_ {
        self.entries.iter().map(|e| (e.id, e.deadline, &e.key))
    }
}
