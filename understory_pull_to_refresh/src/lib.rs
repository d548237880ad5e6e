// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pull_to_refresh --heading-base-level=0

//! Understory Pull to Refresh: a host-agnostic pull-to-refresh gesture state machine.
//!
//! A user drags content down past a threshold; the gesture triggers a refresh
//! and then shows its outcome for a while before the content settles back.
//! This crate holds the logic that decides when that happens. It does not
//! render anything, read input devices, or perform the refresh itself.
//!
//! ## States
//!
//! ```text
//! listening
//!   TOUCH_START                         -> touching.idle
//! touching.idle
//!   TOUCH_MOVE, pulling down from top   -> touching.pulling
//!   TOUCH_MOVE otherwise, TOUCH_END     -> listening
//! touching.pulling
//!   TOUCH_MOVE                          -> touching.pulling (distance updated)
//!   TOUCH_END, pulled far enough        -> loading.pending (refresh requested)
//!   TOUCH_END otherwise                 -> listening
//! loading.pending
//!   refresh succeeded                   -> loading.resolved
//!   refresh failed                      -> loading.rejected
//! loading.resolved, loading.rejected
//!   dwell elapsed                       -> loading.restoring
//! loading.restoring
//!   dwell elapsed                       -> listening
//! ```
//!
//! ## Layers
//!
//! - [`PullMachine`]: the pure transition function. Feed it a [`Snapshot`] and a
//!   [`PullEvent`]; get the next snapshot plus the [`Effect`]s to carry out.
//! - [`PullService`]: an interpreter that carries out those effects. It asks a
//!   [`Refresher`] to start refreshes, keeps dwell timers in an
//!   [`understory_timing::TimerQueue`] measured against an injected
//!   [`Clock`](understory_timing::Clock), and notifies transition listeners.
//! - [`pointer`] (with the `pointer` feature): maps mouse and touch input on a
//!   surface into [`GestureEvent`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! use understory_pull_to_refresh::{GestureEvent, PullConfig, PullService, RefreshTicket};
//! use understory_timing::ManualClock;
//!
//! let pending = Rc::new(Cell::new(None));
//! let slot = Rc::clone(&pending);
//!
//! let mut service = PullService::<String, _, _, _>::new(
//!     PullConfig::default().with_distance_required(80.0),
//!     || 0.0,
//!     move |ticket: RefreshTicket| slot.set(Some(ticket)),
//!     ManualClock::new(0),
//! )
//! .unwrap();
//! service.start();
//!
//! service.send(GestureEvent::TouchStart { starting_distance: 12.0 });
//! service.send(GestureEvent::TouchMove { distance: 52.0 });
//! assert_eq!(service.context().distance(), 40.0);
//! assert_eq!(service.context().progress(), 0.5);
//!
//! service.send(GestureEvent::TouchMove { distance: 300.0 });
//! service.send(GestureEvent::TouchEnd);
//! assert!(service.snapshot().matches("loading.pending"));
//!
//! // The refresh runs elsewhere; report its outcome with the ticket.
//! let ticket = pending.take().unwrap();
//! service.settle(ticket, Err("timed out".to_string())).unwrap();
//! assert!(service.snapshot().matches("loading.rejected"));
//! assert_eq!(service.context().error().map(String::as_str), Some("timed out"));
//! ```
//!
//! ## Features
//!
//! - `std` (default): forward `std` to dependencies.
//! - `pointer` (default): enable the [`pointer`] adapter (requires `kurbo`).
//! - `libm`: use `kurbo`'s `libm` backend in `no_std` builds.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod context;
mod event;
mod host;
mod machine;
mod service;
mod state;

#[cfg(feature = "pointer")]
pub mod pointer;

pub use config::{ConfigError, PullConfig};
pub use context::PullContext;
pub use event::{GestureEvent, PullEvent};
pub use host::{RefreshTicket, Refresher, ScrollSource};
pub use machine::{Effect, Effects, PullMachine, Snapshot, Step};
pub use service::{ListenerId, PullService, SettleError};
pub use state::{LoadingPhase, PullState, TouchPhase};
