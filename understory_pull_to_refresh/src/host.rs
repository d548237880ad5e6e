// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborators supplied by the host.
//!
//! The machine never touches the UI directly. It asks a [`ScrollSource`] for
//! the surface's scroll offset when a gesture begins, and hands a
//! [`RefreshTicket`] to a [`Refresher`] when a refresh is due. Closures
//! implement both traits.

use core::fmt;

/// Reports the scroll offset of the gesture surface.
pub trait ScrollSource {
    /// The current vertical scroll offset; `0.0` means scrolled to the top.
    fn scroll_top(&self) -> f64;
}

impl<F> ScrollSource for F
where
    F: Fn() -> f64,
{
    fn scroll_top(&self) -> f64 {
        self()
    }
}

/// Identifies one refresh request.
///
/// Tickets are issued in increasing order by a [`PullService`](crate::PullService).
/// Only the most recent, unsettled ticket is accepted by
/// [`PullService::settle`](crate::PullService::settle).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RefreshTicket(pub(crate) u64);

impl RefreshTicket {
    /// The raw sequence number.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RefreshTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refresh#{}", self.0)
    }
}

/// Starts the refresh operation.
///
/// Called once per entry into `loading.pending`. The operation runs outside
/// the machine; report its outcome with
/// [`PullService::settle`](crate::PullService::settle) using the same ticket.
pub trait Refresher {
    /// Begins a refresh identified by `ticket`.
    fn refresh(&mut self, ticket: RefreshTicket);
}

impl<F> Refresher for F
where
    F: FnMut(RefreshTicket),
{
    fn refresh(&mut self, ticket: RefreshTicket) {
        self(ticket);
    }
}
