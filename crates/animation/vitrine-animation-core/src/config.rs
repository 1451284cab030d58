//! Controller configuration.

use serde::{Deserialize, Serialize};

use crate::easing::Ease;

/// Defaults and frame-clock policy for a [`crate::TimelineController`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Duration in seconds used when a request gives none (or a non-positive one).
    pub default_duration: f32,
    pub default_easing: Ease,

    /// Frame deltas above this many seconds are treated as a stall and replaced
    /// by `lag_adjusted_dt`. Zero or less disables smoothing.
    pub lag_threshold: f32,
    pub lag_adjusted_dt: f32,

    /// Maximum events retained per tick; extra events still reach observers.
    pub max_events_per_tick: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            default_duration: 1.0,
            default_easing: Ease::default(),
            lag_threshold: 0.5,
            lag_adjusted_dt: 0.033,
            max_events_per_tick: 256,
        }
    }
}

impl ControllerConfig {
    /// Clamp a raw frame delta: non-finite or negative becomes zero, stalls are smoothed.
    pub fn smooth_dt(&self, dt: f32) -> f32 {
        if !dt.is_finite() || dt < 0.0 {
            return 0.0;
        }
        if self.lag_threshold > 0.0 && dt > self.lag_threshold {
            return self.lag_adjusted_dt;
        }
        dt
    }
}
