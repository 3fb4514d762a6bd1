//! Transport abstraction.
//!
//! The session only needs four capabilities from a WebSocket library:
//! connect, send, close and waiting for the next event. They are expressed
//! as traits so the session can run against an in-memory fake in tests.

use async_trait::async_trait;

use crate::{error::TransportError, frame::Frame};

/// Close code sent for a locally initiated close.
pub const CLOSE_NORMAL: u16 = 1000;
/// Close code reported when the peer sent a close frame without a status.
pub const CLOSE_NO_STATUS: u16 = 1005;
/// Close code reported when the transport failed without a close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;

/// Something that happened on an established connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// A data frame arrived
    Message(Frame),
    /// The connection is gone. Reported once; transport faults are reported
    /// here with [`CLOSE_ABNORMAL`].
    Disconnected { code: u16, reason: Option<String> },
}

/// Opens connections.
#[async_trait]
pub trait Connector: Send + Sync {
    type Connection: Connection;

    /// Perform the handshake with `url`.
    async fn connect(&self, url: &str) -> Result<Self::Connection, TransportError>;
}

/// One established connection.
#[async_trait]
pub trait Connection: Send {
    /// Send one frame without waiting for any acknowledgement.
    async fn send(&mut self, frame: Frame) -> Result<(), TransportError>;

    /// Start a close handshake. Closing twice is a no-op.
    async fn close(&mut self) -> Result<(), TransportError>;

    /// Wait for the next event.
    ///
    /// Must be cancel safe: dropping the future before it completes loses no
    /// event.
    async fn next_event(&mut self) -> ConnectionEvent;
}
