// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hierarchical gesture states.
//!
//! The machine has three top-level states, two of which have sub-states:
//!
//! ```text
//! listening
//! touching.idle      touching.pulling
//! loading.pending    loading.resolved    loading.rejected    loading.restoring
//! ```
//!
//! Views usually branch on a partial path with [`PullState::matches`]:
//!
//! ```
//! use understory_pull_to_refresh::{LoadingPhase, PullState};
//!
//! let state = PullState::Loading(LoadingPhase::Rejected);
//! assert!(state.matches("loading"));
//! assert!(state.matches("loading.rejected"));
//! assert!(!state.matches("loading.resolved"));
//! assert_eq!(state.to_string(), "loading.rejected");
//! ```

use core::fmt;

use smallvec::SmallVec;

/// Sub-states of `touching`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    /// The pointer is down but has not yet been recognized as a pull.
    Idle,
    /// The pointer is dragging the content down.
    Pulling,
}

impl TouchPhase {
    /// The sub-state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Pulling => "pulling",
        }
    }
}

/// Sub-states of `loading`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoadingPhase {
    /// The refresh has been requested and has not settled.
    Pending,
    /// The refresh succeeded; the success status is on display.
    Resolved,
    /// The refresh failed; the failure status is on display.
    Rejected,
    /// The content is moving back into place.
    Restoring,
}

impl LoadingPhase {
    /// The sub-state name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
            Self::Restoring => "restoring",
        }
    }
}

/// The active state of a pull-to-refresh gesture.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PullState {
    /// Waiting for a pointer to go down.
    #[default]
    Listening,
    /// A pointer is down.
    Touching(TouchPhase),
    /// A refresh is in flight or its outcome is on display.
    Loading(LoadingPhase),
}

impl PullState {
    /// The state path from the root, e.g. `["touching", "pulling"]`.
    #[must_use]
    pub const fn path(self) -> &'static [&'static str] {
        match self {
            Self::Listening => &["listening"],
            Self::Touching(TouchPhase::Idle) => &["touching", "idle"],
            Self::Touching(TouchPhase::Pulling) => &["touching", "pulling"],
            Self::Loading(LoadingPhase::Pending) => &["loading", "pending"],
            Self::Loading(LoadingPhase::Resolved) => &["loading", "resolved"],
            Self::Loading(LoadingPhase::Rejected) => &["loading", "rejected"],
            Self::Loading(LoadingPhase::Restoring) => &["loading", "restoring"],
        }
    }

    /// The full dotted name, e.g. `"touching.pulling"`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Listening => "listening",
            Self::Touching(TouchPhase::Idle) => "touching.idle",
            Self::Touching(TouchPhase::Pulling) => "touching.pulling",
            Self::Loading(LoadingPhase::Pending) => "loading.pending",
            Self::Loading(LoadingPhase::Resolved) => "loading.resolved",
            Self::Loading(LoadingPhase::Rejected) => "loading.rejected",
            Self::Loading(LoadingPhase::Restoring) => "loading.restoring",
        }
    }

    /// Returns `true` if `pattern` is a prefix of this state's path.
    ///
    /// `pattern` is a dotted path such as `"loading"` or `"touching.pulling"`.
    #[must_use]
    pub fn matches(self, pattern: &str) -> bool {
        let mut segments = pattern.split('.');
        for part in self.path() {
            match segments.next() {
                None => return true,
                Some(segment) if segment == *part => {}
                Some(_) => return false,
            }
        }
        segments.next().is_none()
    }

    /// Every dotted path from the root down to this state.
    ///
    /// `loading.pending` yields `["loading", "loading.pending"]`; the last
    /// entry is always [`PullState::name`].
    #[must_use]
    pub fn to_strings(self) -> SmallVec<[&'static str; 2]> {
        let mut out = SmallVec::new();
        match self {
            Self::Listening => {}
            Self::Touching(_) => out.push("touching"),
            Self::Loading(_) => out.push("loading"),
        }
        out.push(self.name());
        out
    }

    /// The `loading` sub-state, if loading.
    #[must_use]
    pub const fn loading_phase(self) -> Option<LoadingPhase> {
        match self {
            Self::Loading(phase) => Some(phase),
            _ => None,
        }
    }

    /// Returns `true` for states that advance on their own after a dwell timer.
    #[must_use]
    pub const fn is_timed(self) -> bool {
        matches!(
            self,
            Self::Loading(LoadingPhase::Resolved | LoadingPhase::Rejected | LoadingPhase::Restoring)
        )
    }
}

impl fmt::Display for PullState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
