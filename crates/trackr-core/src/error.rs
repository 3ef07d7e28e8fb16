//! Error types for the tracker

use thiserror::Error;

/// Core tracker errors
#[derive(Error, Debug)]
pub enum TrackerError {
    // Positioning errors
    #[error("GPS fix not available")]
    FixUnavailable,

    #[error("Positioning fault: {0}")]
    FixReadFault(String),

    // Wire errors
    #[error("Sample encoding failed: {0}")]
    WireEncode(String),

    // Transport errors
    #[error("Transport error: {0}")]
    Transport(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl TrackerError {
    /// Is this the expected cold-start state of the receiver, rather than a
    /// fault that should stop the tracker?
    pub fn is_transient(&self) -> bool {
        matches!(self, TrackerError::FixUnavailable)
    }
}

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;
