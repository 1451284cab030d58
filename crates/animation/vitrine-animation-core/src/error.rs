//! Error types for the animation core

/// Errors raised while building timelines.
///
/// Playback itself never fails: runtime problems (missing targets, bad time
/// deltas) are logged and reported as `TimelineEvent::Diagnostic`.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    /// Property name outside the animatable set
    #[error("Unknown animatable property: {name}")]
    UnknownProperty { name: String },

    /// Easing name that does not map to a curve
    #[error("Unknown easing: {name}")]
    UnknownEasing { name: String },

    /// Request carries no property to tween
    #[error("Animation request has no properties")]
    EmptyProperties,

    /// Serialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl AnimationError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnknownProperty { .. } | Self::EmptyProperties => "request",
            Self::UnknownEasing { .. } => "easing",
            Self::SerializationError { .. } => "serialization",
        }
    }
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
