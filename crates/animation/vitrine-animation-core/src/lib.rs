//! Vitrine Animation Core (engine-agnostic)
//!
//! A [`TimelineController`] owns at most one [`Timeline`] of property tweens
//! and drives it from the host's frame clock via [`TimelineController::tick`].
//! Hosts expose their objects through [`PropertyAccess`]; the crate ships an
//! implementation for [`vitrine_scene_core::Scene`]. Adapters (Bevy/WASM)
//! implement it over their own object models.

pub mod access;
pub mod config;
pub mod controller;
pub mod easing;
pub mod error;
pub mod events;
pub mod outputs;
pub mod props;
pub mod request;
pub mod timeline;
pub mod tween;

// Re-exports for consumers (adapters, slices)
pub use access::{PropertyAccess, TargetHandle};
pub use config::ControllerConfig;
pub use controller::{PlaybackPhase, TimelineController};
pub use easing::{Ease, EaseDirection, EaseFamily};
pub use error::AnimationError;
pub use events::{Callbacks, TimelineEvent};
pub use outputs::{Change, TickOutputs};
pub use props::{AnimProp, Channel};
pub use request::{AnimationRequest, AnimationDesc};
pub use timeline::{Timeline, TimelineId};
pub use tween::Tween;
