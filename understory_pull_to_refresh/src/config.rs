// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture configuration.

use thiserror::Error;

/// Configuration fixed for the lifetime of a machine.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PullConfig {
    /// How long each post-refresh status (`resolved`, `rejected`, `restoring`) stays on display.
    pub ms_status_display: u64,
    /// How far, in pixels, the content must be pulled to trigger a refresh.
    pub px_distance_required: f64,
}

impl Default for PullConfig {
    fn default() -> Self {
        Self {
            ms_status_display: 600,
            px_distance_required: 100.0,
        }
    }
}

impl PullConfig {
    /// Sets the dwell time of each post-refresh status.
    #[must_use]
    pub fn with_status_display(mut self, ms: u64) -> Self {
        self.ms_status_display = ms;
        self
    }

    /// Sets the pull threshold in pixels.
    #[must_use]
    pub fn with_distance_required(mut self, px: f64) -> Self {
        self.px_distance_required = px;
        self
    }

    /// Checks that the threshold can bound a pull distance.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let px = self.px_distance_required;
        if !px.is_finite() {
            return Err(ConfigError::NonFiniteDistance(px));
        }
        if px <= 0.0 {
            return Err(ConfigError::NonPositiveDistance(px));
        }
        Ok(())
    }
}

/// Error returned for a [`PullConfig`] that cannot drive a gesture.
#[derive(Copy, Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The pull threshold is NaN or infinite.
    #[error("pull distance threshold must be finite, got {0}")]
    NonFiniteDistance(f64),
    /// The pull threshold is zero or negative.
    #[error("pull distance threshold must be greater than zero, got {0}")]
    NonPositiveDistance(f64),
}
