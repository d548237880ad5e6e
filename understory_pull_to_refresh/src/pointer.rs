// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer adapter: turn raw mouse and touch input into [`GestureEvent`]s.
//!
//! ## Usage
//!
//! 1) Create a [`PointerAdapter`] with the bounds of the scrollable surface, and
//!    keep them current with [`PointerAdapter::set_surface`] after layout.
//! 2) Forward mouse and touch callbacks to the matching methods.
//! 3) Send every returned event to the service.
//!
//! Distances are measured from the surface's top edge: `pointer.y - surface.y0`.
//! Mouse input only counts while the primary button alone is held; touch
//! input only counts while exactly one finger is down. Releases always end
//! the gesture.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_pull_to_refresh::GestureEvent;
//! use understory_pull_to_refresh::pointer::{PointerAdapter, PointerButtons};
//!
//! let adapter = PointerAdapter::new(Rect::new(0.0, 80.0, 320.0, 560.0));
//!
//! let down = adapter.mouse_down(Point::new(40.0, 100.0), PointerButtons::PRIMARY);
//! assert_eq!(down, Some(GestureEvent::TouchStart { starting_distance: 20.0 }));
//!
//! // Right-button drags are not pulls.
//! assert_eq!(adapter.mouse_move(Point::new(40.0, 160.0), PointerButtons::SECONDARY), None);
//!
//! // Pinches are not pulls either.
//! let fingers = [Point::new(10.0, 120.0), Point::new(90.0, 140.0)];
//! assert_eq!(adapter.touch_move(&fingers), None);
//! ```

use kurbo::{Point, Rect};

use crate::event::GestureEvent;

bitflags::bitflags! {
    /// Buttons held during a mouse event, laid out like the DOM `MouseEvent.buttons` mask.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct PointerButtons: u16 {
        /// Usually the left button.
        const PRIMARY = 1;
        /// Usually the right button.
        const SECONDARY = 1 << 1;
        /// Usually the wheel button.
        const AUXILIARY = 1 << 2;
        /// Browser back.
        const BACK = 1 << 3;
        /// Browser forward.
        const FORWARD = 1 << 4;
    }
}

/// Maps pointer positions on a surface to gesture events.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct PointerAdapter {
    surface: Option<Rect>,
}

impl PointerAdapter {
    /// Creates an adapter for a surface with the given bounds.
    #[must_use]
    pub fn new(surface: Rect) -> Self {
        Self {
            surface: Some(surface),
        }
    }

    /// The current surface bounds, if known.
    #[must_use]
    pub fn surface(&self) -> Option<Rect> {
        self.surface
    }

    /// Updates the surface bounds; `None` while the surface is not laid out.
    pub fn set_surface(&mut self, surface: Option<Rect>) {
        self.surface = surface;
    }

    /// Vertical offset of `pos` from the surface's top edge.
    ///
    /// Returns `0.0` when the surface bounds are unknown.
    #[must_use]
    pub fn distance_from_top(&self, pos: Point) -> f64 {
        self.surface.map_or(0.0, |surface| pos.y - surface.y0)
    }

    /// A mouse button was pressed.
    #[must_use]
    pub fn mouse_down(&self, pos: Point, buttons: PointerButtons) -> Option<GestureEvent> {
        is_primary_only(buttons).then(|| GestureEvent::TouchStart {
            starting_distance: self.distance_from_top(pos),
        })
    }

    /// The mouse moved.
    #[must_use]
    pub fn mouse_move(&self, pos: Point, buttons: PointerButtons) -> Option<GestureEvent> {
        is_primary_only(buttons).then(|| GestureEvent::TouchMove {
            distance: self.distance_from_top(pos),
        })
    }

    /// A mouse button was released.
    #[must_use]
    pub fn mouse_up(&self) -> GestureEvent {
        GestureEvent::TouchEnd
    }

    /// Touches changed; `touches` holds every finger currently down.
    #[must_use]
    pub fn touch_start(&self, touches: &[Point]) -> Option<GestureEvent> {
        single_touch(touches).map(|pos| GestureEvent::TouchStart {
            starting_distance: self.distance_from_top(pos),
        })
    }

    /// Fingers moved; `touches` holds every finger currently down.
    #[must_use]
    pub fn touch_move(&self, touches: &[Point]) -> Option<GestureEvent> {
        single_touch(touches).map(|pos| GestureEvent::TouchMove {
            distance: self.distance_from_top(pos),
        })
    }

    /// A finger was lifted.
    #[must_use]
    pub fn touch_end(&self) -> GestureEvent {
        GestureEvent::TouchEnd
    }
}

fn is_primary_only(buttons: PointerButtons) -> bool {
    buttons == PointerButtons::PRIMARY
}

fn single_touch(touches: &[Point]) -> Option<Point> {
    match touches {
        [only] => Some(*only),
        _ => None,
    }
}
