//! Error types for slices

use vitrine_animation_core::AnimationError;
use vitrine_scene_core::SceneError;

/// Errors raised while mounting a slice from its configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SliceError {
    /// Configuration is structurally valid JSON but unusable
    #[error("Invalid slice config: {reason}")]
    InvalidConfig { reason: String },

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SliceError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "config",
            Self::Animation(err) => err.category(),
            Self::Scene(err) => err.category(),
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for SliceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
