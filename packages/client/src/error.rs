//! Error types for the wscat client.

use thiserror::Error;

/// Failures reported by a [`Connector`](crate::transport::Connector) or a
/// [`Connection`](crate::transport::Connection).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The connection attempt or handshake failed
    #[error("Connection failed: {0}")]
    ConnectFailed(String),

    /// A frame could not be written
    #[error("Send failed: {0}")]
    SendFailed(String),

    /// The close frame could not be written
    #[error("Close failed: {0}")]
    CloseFailed(String),
}

/// Process-level errors
#[derive(Debug, Error)]
pub enum ClientError {
    /// Wrong command-line arguments; carries the usage text
    #[error("{0}")]
    Usage(String),

    /// The async runtime could not be started
    #[error("Failed to start runtime: {0}")]
    Runtime(#[from] std::io::Error),
}
