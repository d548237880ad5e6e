// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Running a [`PullMachine`] against a host.
//!
//! [`PullService`] owns the current [`Snapshot`] and carries out the effects of
//! each transition:
//!
//! - [`Effect::RequestRefresh`] issues a fresh [`RefreshTicket`] to the
//!   [`Refresher`]. The host reports the outcome with [`PullService::settle`].
//! - [`Effect::StartDwell`] schedules a timer keyed by the state that asked for
//!   it. Leaving that state cancels the timer. Hosts call
//!   [`PullService::update`] when [`PullService::next_deadline`] has passed.
//!
//! Listeners registered with [`PullService::on_transition`] run after every
//! event that changed the snapshot.
//!
//! ## Minimal example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use understory_pull_to_refresh::{GestureEvent, PullConfig, PullService, RefreshTicket};
//! use understory_timing::ManualClock;
//!
//! let clock = ManualClock::new(0);
//! let requested = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&requested);
//!
//! let mut service = PullService::<&str, _, _, _>::new(
//!     PullConfig::default(),
//!     || 0.0,
//!     move |ticket: RefreshTicket| sink.borrow_mut().push(ticket),
//!     clock.clone(),
//! )
//! .unwrap();
//! service.start();
//!
//! service.send(GestureEvent::TouchStart { starting_distance: 0.0 });
//! service.send(GestureEvent::TouchMove { distance: 120.0 });
//! service.send(GestureEvent::TouchEnd);
//! assert!(service.snapshot().matches("loading.pending"));
//!
//! let ticket = requested.borrow()[0];
//! service.settle(ticket, Ok(())).unwrap();
//! assert!(service.snapshot().matches("loading.resolved"));
//!
//! clock.advance(600);
//! service.update();
//! assert!(service.snapshot().matches("loading.restoring"));
//!
//! clock.advance(600);
//! service.update();
//! assert!(service.snapshot().matches("listening"));
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use thiserror::Error;
use understory_timing::{Clock, TimerQueue};

use crate::config::{ConfigError, PullConfig};
use crate::context::PullContext;
use crate::event::{GestureEvent, PullEvent};
use crate::host::{RefreshTicket, Refresher, ScrollSource};
use crate::machine::{Effect, PullMachine, Snapshot};
use crate::state::PullState;

/// Identifies a listener registered with [`PullService::on_transition`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Error returned by [`PullService::settle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum SettleError {
    /// The service is stopped.
    #[error("the pull-to-refresh service is not running")]
    NotRunning,
    /// The ticket is not the outstanding refresh request.
    #[error("{0} is not the outstanding refresh request")]
    StaleTicket(RefreshTicket),
}

type Listener<E> = Box<dyn FnMut(&Snapshot<E>)>;

/// An interpreter for [`PullMachine`].
///
/// - `E`: the refresh error type, kept in [`PullContext::error`].
/// - `S`: the [`ScrollSource`] queried when a gesture begins.
/// - `R`: the [`Refresher`] asked to start each refresh.
/// - `C`: the [`Clock`] dwell timers are measured against.
pub struct PullService<E, S, R, C> {
    machine: PullMachine,
    snapshot: Snapshot<E>,
    scroll: S,
    refresher: R,
    clock: C,
    timers: TimerQueue<PullState>,
    listeners: Vec<(ListenerId, Listener<E>)>,
    next_listener: u64,
    next_ticket: u64,
    outstanding: Option<RefreshTicket>,
    running: bool,
}

impl<E: fmt::Debug, S, R, C> fmt::Debug for PullService<E, S, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullService")
            .field("machine", &self.machine)
            .field("snapshot", &self.snapshot)
            .field("timers", &self.timers)
            .field("listeners", &self.listeners.len())
            .field("outstanding", &self.outstanding)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<E, S, R, C> PullService<E, S, R, C>
where
    S: ScrollSource,
    R: Refresher,
    C: Clock,
{
    /// Creates a stopped service.
    pub fn new(config: PullConfig, scroll: S, refresher: R, clock: C) -> Result<Self, ConfigError> {
        let machine = PullMachine::new(config)?;
        Ok(Self {
            snapshot: machine.initial_snapshot(),
            machine,
            scroll,
            refresher,
            clock,
            timers: TimerQueue::new(),
            listeners: Vec::new(),
            next_listener: 0,
            next_ticket: 0,
            outstanding: None,
            running: false,
        })
    }

    /// Enters the initial `listening` state and notifies listeners.
    ///
    /// Does nothing if already running. After [`PullService::stop`], starts
    /// over from a fresh snapshot.
    pub fn start(&mut self) -> &Snapshot<E> {
        if self.running {
            return &self.snapshot;
        }
        self.running = true;
        self.snapshot = self.machine.initial_snapshot();
        tracing::debug!(state = %self.snapshot.value(), "pull-to-refresh started");
        self.notify();
        &self.snapshot
    }

    /// Stops processing, cancelling dwell timers and the outstanding refresh ticket.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.timers.clear();
        self.outstanding = None;
        tracing::debug!(state = %self.snapshot.value(), "pull-to-refresh stopped");
    }

    /// Returns `true` between [`PullService::start`] and [`PullService::stop`].
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> &Snapshot<E> {
        &self.snapshot
    }

    /// The current state.
    #[must_use]
    pub fn state(&self) -> PullState {
        self.snapshot.value()
    }

    /// The current context.
    #[must_use]
    pub fn context(&self) -> &PullContext<E> {
        self.snapshot.context()
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &PullConfig {
        self.machine.config()
    }

    /// The refresh request awaiting [`PullService::settle`], if any.
    #[must_use]
    pub fn outstanding_refresh(&self) -> Option<RefreshTicket> {
        self.outstanding
    }

    /// Delivers a pointer event and returns the resulting snapshot.
    ///
    /// Ignored while stopped.
    pub fn send(&mut self, event: GestureEvent) -> &Snapshot<E> {
        if !self.running {
            tracing::warn!(
                event = event.name(),
                "event sent to a stopped pull-to-refresh service"
            );
            return &self.snapshot;
        }
        let now = self.clock.now();
        self.process(event.into(), now);
        &self.snapshot
    }

    /// Reports the outcome of the refresh identified by `ticket`.
    ///
    /// A failed refresh is not an error here: it moves the machine to
    /// `loading.rejected` and is kept in [`PullContext::error`].
    pub fn settle(
        &mut self,
        ticket: RefreshTicket,
        outcome: Result<(), E>,
    ) -> Result<(), SettleError> {
        if !self.running {
            tracing::warn!(%ticket, "refresh settled after stop");
            return Err(SettleError::NotRunning);
        }
        if self.outstanding != Some(ticket) {
            tracing::warn!(%ticket, outstanding = ?self.outstanding, "stale refresh settled");
            return Err(SettleError::StaleTicket(ticket));
        }
        self.outstanding = None;
        tracing::debug!(%ticket, ok = outcome.is_ok(), "refresh settled");
        let now = self.clock.now();
        self.process(outcome.into(), now);
        Ok(())
    }

    /// Fires every dwell timer that is due, returning how many fired.
    ///
    /// A dwell started by an expiring timer counts from that timer's deadline,
    /// so a late call still replays the full sequence.
    pub fn update(&mut self) -> usize {
        if !self.running {
            return 0;
        }
        let now = self.clock.now();
        let mut fired = 0;
        while let Some(expired) = self.timers.pop_expired(now) {
            fired += 1;
            if expired.key != self.snapshot.value() {
                tracing::trace!(timer = %expired.key, "dropping timer for exited state");
                continue;
            }
            self.process(PullEvent::DwellElapsed, expired.deadline);
        }
        fired
    }

    /// The earliest pending dwell deadline, to schedule the next [`PullService::update`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<u64> {
        self.timers.next_deadline()
    }

    /// Registers a listener called with the new snapshot after every change.
    pub fn on_transition(&mut self, listener: impl FnMut(&Snapshot<E>) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregisters a listener, returning `true` if it was registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    fn process(&mut self, event: PullEvent<E>, now: u64) {
        let source = self.snapshot.value();
        let effects = self.machine.apply(&mut self.snapshot, event, &self.scroll);
        if !self.snapshot.changed() {
            return;
        }

        let target = self.snapshot.value();
        if target != source {
            let cancelled = self.timers.cancel_where(|state| *state != target);
            if cancelled > 0 {
                tracing::trace!(cancelled, state = %source, "cancelled dwell timers on exit");
            }
        }

        for effect in effects {
            match effect {
                Effect::RequestRefresh => {
                    let ticket = RefreshTicket(self.next_ticket);
                    self.next_ticket += 1;
                    self.outstanding = Some(ticket);
                    tracing::debug!(%ticket, "requesting refresh");
                    self.refresher.refresh(ticket);
                }
                Effect::StartDwell { state, ms } => {
                    self.timers.schedule(now.saturating_add(ms), state);
                }
            }
        }

        let ctx = self.snapshot.context();
        tracing::debug!(
            state = %target,
            distance = ctx.distance(),
            starting_distance = ctx.starting_distance(),
            scroll_top = ctx.scroll_top(),
            has_error = ctx.error().is_some(),
            "transition"
        );
        self.notify();
    }

    fn notify(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener(&self.snapshot);
        }
    }
}
