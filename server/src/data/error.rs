//! Error type for protocol client implementations
//!
//! Implementations of [`LqlClient`](super::LqlClient) report failures through
//! this type. The query layer logs it and hands it to the caller unchanged.

use thiserror::Error;

/// Error reported by the external LQL client
#[derive(Error, Debug)]
pub enum ClientError {
    /// Could not reach the monitoring core
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response could not be understood
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The monitoring core answered with an error status
    #[error("Query rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Anything else the client wants to surface
    #[error("{0}")]
    Other(String),
}

impl ClientError {
    /// Create a rejected error with upstream status and message
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }
}
