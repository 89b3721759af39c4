//! Error types for the prize wheel.

use thiserror::Error;

/// Errors raised by the wheel engine and its collaborators.
#[derive(Debug, Error)]
pub enum WheelError {
    /// The operation is not valid in the current state (e.g. an empty wheel
    /// or a spin that is already running).
    #[error("invalid state: {0}")]
    InvalidState(&'static str),

    /// A participant label was empty after trimming.
    #[error("participant label must not be empty")]
    EmptyLabel,

    /// Font data could not be parsed.
    #[error("font error: {0}")]
    Font(String),

    /// A drawing surface could not be allocated.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// A rendered frame could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl WheelError {
    pub(crate) const NO_PARTICIPANTS: Self = Self::InvalidState("wheel has no participants");
    pub(crate) const SPIN_IN_PROGRESS: Self = Self::InvalidState("a spin is already in progress");

    /// Whether this error signals an invalid-state precondition.
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvalidState(_))
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, WheelError>;
