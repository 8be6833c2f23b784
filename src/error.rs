//! # Error Types
//!
//! Crate error type, using `thiserror`.
//!
//! The transmit path itself is infallible by design (unacknowledged,
//! fire-and-forget downlink); errors only arise at the ambient surface.

use thiserror::Error;

/// Main error type for the transmitter crate
#[derive(Debug, Error)]
pub enum SoftTxError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the transmitter crate
pub type Result<T> = std::result::Result<T, SoftTxError>;
