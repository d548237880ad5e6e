// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The pure transition function.
//!
//! [`PullMachine`] maps `(snapshot, event)` to the next snapshot plus a list
//! of [`Effect`]s for the host to carry out. It owns no timers, performs no
//! I/O and never reads a clock; [`PullService`](crate::PullService) wraps it
//! with those concerns.
//!
//! | From | Event | Guard | To |
//! |---|---|---|---|
//! | `listening` | `TOUCH_START` | | `touching.idle` |
//! | `touching.idle` | `TOUCH_MOVE` | pulling down from top | `touching.pulling` |
//! | `touching.idle` | `TOUCH_MOVE` | otherwise | `listening` |
//! | `touching.idle` | `TOUCH_END` | | `listening` |
//! | `touching.pulling` | `TOUCH_MOVE` | | `touching.pulling` |
//! | `touching.pulling` | `TOUCH_END` | pulled far enough | `loading.pending` |
//! | `touching.pulling` | `TOUCH_END` | otherwise | `listening` |
//! | `loading.pending` | refresh resolved | | `loading.resolved` |
//! | `loading.pending` | refresh rejected | | `loading.rejected` |
//! | `loading.resolved` | dwell elapsed | | `loading.restoring` |
//! | `loading.rejected` | dwell elapsed | | `loading.restoring` |
//! | `loading.restoring` | dwell elapsed | | `listening` |
//!
//! Entering `listening` or `loading.restoring` resets the pull distances.
//! Entering `loading.pending` emits [`Effect::RequestRefresh`]; entering any
//! timed state emits [`Effect::StartDwell`]. Any other event is ignored.
//!
//! ## Minimal example
//!
//! ```
//! use understory_pull_to_refresh::{
//!     Effect, GestureEvent, LoadingPhase, PullConfig, PullEvent, PullMachine, PullState,
//! };
//!
//! let machine = PullMachine::new(PullConfig::default()).unwrap();
//! let at_top = || 0.0;
//!
//! let s = machine.initial_snapshot::<()>();
//! let s = machine
//!     .transition(s, GestureEvent::TouchStart { starting_distance: 10.0 }.into(), &at_top)
//!     .snapshot;
//! let s = machine
//!     .transition(s, GestureEvent::TouchMove { distance: 150.0 }.into(), &at_top)
//!     .snapshot;
//! assert!(s.matches("touching.pulling"));
//! assert_eq!(s.context().distance(), 100.0);
//!
//! let step = machine.transition(s, GestureEvent::TouchEnd.into(), &at_top);
//! assert_eq!(step.snapshot.value(), PullState::Loading(LoadingPhase::Pending));
//! assert_eq!(step.effects.as_slice(), [Effect::RequestRefresh]);
//! ```

use smallvec::SmallVec;

use crate::config::{ConfigError, PullConfig};
use crate::context::PullContext;
use crate::event::{GestureEvent, PullEvent};
use crate::host::ScrollSource;
use crate::state::{LoadingPhase, PullState, TouchPhase};

/// Work the host must perform after a transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Start the refresh operation and report its outcome as
    /// [`PullEvent::RefreshResolved`] or [`PullEvent::RefreshRejected`].
    RequestRefresh,
    /// Deliver [`PullEvent::DwellElapsed`] after `ms` milliseconds, unless
    /// `state` has been exited by then.
    StartDwell {
        /// The state the timer belongs to.
        state: PullState,
        /// Dwell duration.
        ms: u64,
    },
}

/// Effects produced by one transition.
pub type Effects = SmallVec<[Effect; 2]>;

/// The machine's observable state: the active state plus its context.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot<E> {
    value: PullState,
    context: PullContext<E>,
    changed: bool,
}

impl<E> Snapshot<E> {
    /// The active state.
    #[must_use]
    pub fn value(&self) -> PullState {
        self.value
    }

    /// The extended state.
    #[must_use]
    pub fn context(&self) -> &PullContext<E> {
        &self.context
    }

    /// Whether the event that produced this snapshot changed the state or context.
    #[must_use]
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// See [`PullState::matches`].
    #[must_use]
    pub fn matches(&self, pattern: &str) -> bool {
        self.value.matches(pattern)
    }

    /// See [`PullState::to_strings`].
    #[must_use]
    pub fn to_strings(&self) -> SmallVec<[&'static str; 2]> {
        self.value.to_strings()
    }
}

/// The result of [`PullMachine::transition`].
#[derive(Clone, Debug, PartialEq)]
pub struct Step<E> {
    /// The next snapshot.
    pub snapshot: Snapshot<E>,
    /// Work to carry out, in order.
    pub effects: Effects,
}

/// The pull-to-refresh state chart.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PullMachine {
    config: PullConfig,
}

impl PullMachine {
    /// Creates a machine, validating `config`.
    pub fn new(config: PullConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &PullConfig {
        &self.config
    }

    /// The snapshot of a freshly started machine: `listening` with a reset context.
    #[must_use]
    pub fn initial_snapshot<E>(&self) -> Snapshot<E> {
        Snapshot {
            value: PullState::Listening,
            context: PullContext::new(self.config.px_distance_required),
            changed: true,
        }
    }

    /// Computes the next snapshot for `event`.
    ///
    /// Events without a transition from the current state return the snapshot
    /// unchanged, with [`Snapshot::changed`] cleared and no effects.
    pub fn transition<E, S>(
        &self,
        mut snapshot: Snapshot<E>,
        event: PullEvent<E>,
        scroll: &S,
    ) -> Step<E>
    where
        S: ScrollSource + ?Sized,
    {
        let effects = self.apply(&mut snapshot, event, scroll);
        Step { snapshot, effects }
    }

    /// In-place form of [`PullMachine::transition`].
    pub fn apply<E, S>(
        &self,
        snapshot: &mut Snapshot<E>,
        event: PullEvent<E>,
        scroll: &S,
    ) -> Effects
    where
        S: ScrollSource + ?Sized,
    {
        let source = snapshot.value;
        let before = snapshot.context.metrics();
        let event_name = event.name();
        let mut error_written = false;
        let ctx = &mut snapshot.context;

        let target = match (source, event) {
            (
                PullState::Listening,
                PullEvent::Gesture(GestureEvent::TouchStart { starting_distance }),
            ) => {
                ctx.store_scroll_top(scroll.scroll_top());
                ctx.store_starting_distance(starting_distance);
                Some(PullState::Touching(TouchPhase::Idle))
            }
            (
                PullState::Touching(TouchPhase::Idle),
                PullEvent::Gesture(GestureEvent::TouchMove { distance }),
            ) => {
                if is_pulling_down_from_top(ctx, distance) {
                    ctx.store_distance(distance);
                    Some(PullState::Touching(TouchPhase::Pulling))
                } else {
                    Some(PullState::Listening)
                }
            }
            (PullState::Touching(TouchPhase::Idle), PullEvent::Gesture(GestureEvent::TouchEnd)) => {
                Some(PullState::Listening)
            }
            (
                PullState::Touching(TouchPhase::Pulling),
                PullEvent::Gesture(GestureEvent::TouchMove { distance }),
            ) => {
                ctx.store_distance(distance);
                Some(PullState::Touching(TouchPhase::Pulling))
            }
            (
                PullState::Touching(TouchPhase::Pulling),
                PullEvent::Gesture(GestureEvent::TouchEnd),
            ) => {
                if ctx.has_pulled_far_enough() {
                    Some(PullState::Loading(LoadingPhase::Pending))
                } else {
                    Some(PullState::Listening)
                }
            }
            (PullState::Loading(LoadingPhase::Pending), PullEvent::RefreshResolved) => {
                ctx.clear_error();
                error_written = true;
                Some(PullState::Loading(LoadingPhase::Resolved))
            }
            (PullState::Loading(LoadingPhase::Pending), PullEvent::RefreshRejected(error)) => {
                ctx.store_error(error);
                error_written = true;
                Some(PullState::Loading(LoadingPhase::Rejected))
            }
            (
                PullState::Loading(LoadingPhase::Resolved | LoadingPhase::Rejected),
                PullEvent::DwellElapsed,
            ) => Some(PullState::Loading(LoadingPhase::Restoring)),
            (PullState::Loading(LoadingPhase::Restoring), PullEvent::DwellElapsed) => {
                Some(PullState::Listening)
            }
            _ => None,
        };

        let mut effects = Effects::new();
        let Some(target) = target else {
            tracing::trace!(state = %source, event = event_name, "event ignored");
            snapshot.changed = false;
            return effects;
        };

        if target != source {
            self.enter(target, &mut snapshot.context, &mut effects);
        }
        snapshot.value = target;
        snapshot.changed =
            target != source || error_written || snapshot.context.metrics() != before;
        effects
    }

    /// Runs the entry actions of `state`.
    fn enter<E>(&self, state: PullState, ctx: &mut PullContext<E>, effects: &mut Effects) {
        match state {
            PullState::Listening => ctx.reset(),
            PullState::Touching(_) => {}
            PullState::Loading(LoadingPhase::Pending) => effects.push(Effect::RequestRefresh),
            PullState::Loading(LoadingPhase::Resolved | LoadingPhase::Rejected) => {
                effects.push(self.dwell(state));
            }
            PullState::Loading(LoadingPhase::Restoring) => {
                ctx.reset();
                effects.push(self.dwell(state));
            }
        }
    }

    fn dwell(&self, state: PullState) -> Effect {
        Effect::StartDwell {
            state,
            ms: self.config.ms_status_display,
        }
    }
}

/// A pull may only begin when the surface was at the top when the gesture
/// started and the pointer has not moved above its starting point.
fn is_pulling_down_from_top<E>(ctx: &PullContext<E>, distance: f64) -> bool {
    ctx.scroll_top() == 0.0 && distance >= ctx.starting_distance()
}
