// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Extended state carried alongside [`PullState`](crate::PullState).

/// Distances and refresh outcome tracked by the machine.
///
/// Only the machine writes to the context; consumers read it through
/// [`Snapshot::context`](crate::Snapshot::context).
#[derive(Clone, Debug, PartialEq)]
pub struct PullContext<E> {
    distance: f64,
    starting_distance: f64,
    scroll_top: f64,
    error: Option<E>,
    px_distance_required: f64,
}

/// The numeric part of a context, used to detect no-op transitions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Metrics {
    distance: f64,
    starting_distance: f64,
    scroll_top: f64,
}

impl<E> PullContext<E> {
    pub(crate) fn new(px_distance_required: f64) -> Self {
        Self {
            distance: 0.0,
            starting_distance: 0.0,
            scroll_top: 0.0,
            error: None,
            px_distance_required,
        }
    }

    /// How far the content is pulled, always within `[0, px_distance_required]`.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// The pointer's offset from the top of the surface when the gesture began.
    #[must_use]
    pub fn starting_distance(&self) -> f64 {
        self.starting_distance
    }

    /// The surface's scroll offset when the gesture began.
    #[must_use]
    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    /// The failure of the most recent refresh, until a later refresh succeeds.
    #[must_use]
    pub fn error(&self) -> Option<&E> {
        self.error.as_ref()
    }

    /// The pull threshold.
    #[must_use]
    pub fn px_distance_required(&self) -> f64 {
        self.px_distance_required
    }

    /// Pull progress towards the threshold, in `[0, 1]`.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.distance / self.px_distance_required
    }

    /// Returns `true` once the pull has reached the threshold.
    #[must_use]
    pub fn has_pulled_far_enough(&self) -> bool {
        self.distance >= self.px_distance_required
    }

    pub(crate) fn metrics(&self) -> Metrics {
        Metrics {
            distance: self.distance,
            starting_distance: self.starting_distance,
            scroll_top: self.scroll_top,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.distance = 0.0;
        self.starting_distance = 0.0;
    }

    pub(crate) fn store_scroll_top(&mut self, scroll_top: f64) {
        self.scroll_top = scroll_top;
    }

    pub(crate) fn store_starting_distance(&mut self, starting_distance: f64) {
        self.starting_distance = starting_distance;
    }

    /// Records a pointer position as a pull offset from the starting point.
    pub(crate) fn store_distance(&mut self, pointer_distance: f64) {
        self.distance = within_range(
            0.0,
            self.px_distance_required,
            pointer_distance - self.starting_distance,
        );
    }

    pub(crate) fn store_error(&mut self, error: E) {
        self.error = Some(error);
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Clamps `value` to `[floor, ceiling]`; NaN maps to `floor`.
fn within_range(floor: f64, ceiling: f64, value: f64) -> f64 {
    ceiling.min(floor.max(value))
}
