//! Error types for scene operations

use crate::scene::NodeId;

/// Errors raised by scene graph and model operations.
///
/// Geometry utilities never let these escape; they are surfaced by the
/// lower-level `Scene`/`Model` APIs so callers can decide.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SceneError {
    /// Node id does not resolve to a live node
    #[error("Node not found: {id:?}")]
    NodeNotFound { id: NodeId },

    /// Geometry buffers were released before use
    #[error("Geometry of node '{node}' has been disposed")]
    GeometryDisposed { node: String },

    /// A vertex contains NaN or infinity
    #[error("Non-finite vertex {index} in node '{node}'")]
    NonFiniteVertex { node: String, index: usize },

    /// A parent transform cannot be inverted (zero scale)
    #[error("Transform of node '{node}' is not invertible")]
    SingularTransform { node: String },

    /// Model descriptor is structurally invalid
    #[error("Invalid model: {reason}")]
    InvalidModel { reason: String },

    /// Descriptor failed to parse
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl SceneError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NodeNotFound { .. } => "graph",
            Self::GeometryDisposed { .. } | Self::NonFiniteVertex { .. } => "geometry",
            Self::SingularTransform { .. } => "transform",
            Self::InvalidModel { .. } | Self::SerializationError { .. } => "model",
        }
    }
}

impl From<serde_json::Error> for SceneError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError {
            reason: err.to_string(),
        }
    }
}
