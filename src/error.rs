//! Error types shared by the engine, session and progress layers

use thiserror::Error;

use crate::engine::AlgorithmId;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid seed dataset: {reason}")]
    InvalidSeed { reason: String },

    #[error("unknown algorithm: {name}")]
    UnknownAlgorithm { name: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    #[must_use]
    pub fn invalid_seed(reason: impl Into<String>) -> Self {
        Self::InvalidSeed {
            reason: reason.into(),
        }
    }
}

/// A per-step invariant that no longer holds. Always a bug in a state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{algorithm} invariant violated: {message}")]
pub struct InvariantViolation {
    pub algorithm: AlgorithmId,
    pub message: String,
}

impl InvariantViolation {
    pub fn new(algorithm: AlgorithmId, message: impl Into<String>) -> Self {
        Self {
            algorithm,
            message: message.into(),
        }
    }
}
