//! Error types for the operator console.

use thiserror::Error;

/// Client-specific errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection error (handshake failure or lost connection)
    #[error("Connection error: {0}")]
    ConnectionError(String),
}
