// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Events accepted by the gesture machine.

/// Pointer events a host sends while the user touches the surface.
///
/// Distances are vertical offsets from the top edge of the scrollable
/// surface, in pixels: `pointer_y - surface_top`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GestureEvent {
    /// A pointer went down.
    TouchStart {
        /// Offset of the pointer from the top of the surface.
        starting_distance: f64,
    },
    /// The pointer moved while down.
    TouchMove {
        /// Offset of the pointer from the top of the surface.
        distance: f64,
    },
    /// The pointer was released.
    TouchEnd,
}

impl GestureEvent {
    /// A short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::TouchStart { .. } => "TOUCH_START",
            Self::TouchMove { .. } => "TOUCH_MOVE",
            Self::TouchEnd => "TOUCH_END",
        }
    }
}

/// Every input of the transition function.
///
/// Gesture events come from the host; the rest are produced by the
/// [`PullService`](crate::PullService) when a refresh settles or a dwell
/// timer expires. Hosts driving [`PullMachine`](crate::PullMachine) directly
/// produce them themselves.
#[derive(Clone, Debug, PartialEq)]
pub enum PullEvent<E> {
    /// A pointer event.
    Gesture(GestureEvent),
    /// The refresh operation succeeded.
    RefreshResolved,
    /// The refresh operation failed with the given error.
    RefreshRejected(E),
    /// The current state's dwell timer expired.
    DwellElapsed,
}

impl<E> PullEvent<E> {
    /// A short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Gesture(gesture) => gesture.name(),
            Self::RefreshResolved => "REFRESH_RESOLVED",
            Self::RefreshRejected(_) => "REFRESH_REJECTED",
            Self::DwellElapsed => "DWELL_ELAPSED",
        }
    }
}

impl<E> From<GestureEvent> for PullEvent<E> {
    fn from(gesture: GestureEvent) -> Self {
        Self::Gesture(gesture)
    }
}

impl<E> From<Result<(), E>> for PullEvent<E> {
    fn from(outcome: Result<(), E>) -> Self {
        match outcome {
            Ok(()) => Self::RefreshResolved,
            Err(error) => Self::RefreshRejected(error),
        }
    }
}
