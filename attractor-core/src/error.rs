//! Error type shared by the attractor core.
//!
//! Only construction and control inputs can fail. Stepping never returns
//! an error: unstable parameters simply produce runaway or non-finite
//! states, which are left for the renderer to tolerate.

use crate::types::Dimension;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("trail capacity must be at least 1")]
    ZeroCapacity,

    #[error("speed multiplier must be at least 1")]
    ZeroSpeed,

    #[error("unknown attractor variant `{0}`")]
    UnknownVariant(String),

    #[error("{kind} takes {expected} coefficients, got {found}")]
    CoefficientCount {
        kind: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: Dimension, found: Dimension },

    #[error("a state vector has 2 or 3 coordinates, got {0}")]
    InvalidStateLength(usize),

    #[error("dimension must be 2 or 3, got {0}")]
    InvalidDimension(u8),

    #[error("failed to access session file: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed session file: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns `true` for errors caused by invalid setup or control input,
    /// as opposed to file access failures.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::Json(_))
    }
}
