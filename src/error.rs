//! Error types.

use thiserror::Error;

/// Failure reported by a perception collaborator.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PerceptionError {
    /// The model ran out of memory or a similar device resource.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),
    #[error("inference failed: {0}")]
    Inference(String),
    /// The model is not loaded or the input is not readable.
    #[error("model unavailable: {0}")]
    Unavailable(String),
}

impl PerceptionError {
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, PerceptionError::ResourceExhausted(_))
    }
}

/// Which collaborator a tick failure came from.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TickError {
    #[error("object detector: {0}")]
    Detector(#[source] PerceptionError),
    #[error("hand landmarker: {0}")]
    Hands(#[source] PerceptionError),
}

impl TickError {
    pub fn perception(&self) -> &PerceptionError {
        match self {
            TickError::Detector(e) | TickError::Hands(e) => e,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("confidence threshold {0} is outside [0, 1]")]
    InvalidThreshold(f32),
    #[error("performance history capacity must be non-zero")]
    InvalidCapacity,
    #[error("target fps must be positive, got {0}")]
    InvalidTargetFps(f32),
}
