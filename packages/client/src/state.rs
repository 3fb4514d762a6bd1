//! Session lifecycle state machine.
//!
//! Pure transition logic without side effects, kept apart from the session
//! so it can be tested on its own.

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Connecting,
    Connected,
    Disconnecting,
    Closed,
}

/// Something that happened to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The single connection attempt was started
    ConnectStarted,
    /// The handshake completed
    HandshakeCompleted,
    /// The connection attempt failed
    ConnectFailed,
    /// The peer closed the connection or the transport failed
    RemoteClosed,
    /// Standard input reached end-of-file or failed
    InputEnded,
    /// Both the connection and the input stream have been released
    Released,
}

impl SessionState {
    /// Compute the next state for `event`.
    ///
    /// # Returns
    ///
    /// `Some(next)` if the event is valid in this state, `None` otherwise.
    /// There is no way back to `Connecting`.
    pub fn transition(self, event: SessionEvent) -> Option<SessionState> {
        use SessionEvent::*;
        use SessionState::*;

        match (self, event) {
            (Idle, ConnectStarted) => Some(Connecting),
            (Connecting, HandshakeCompleted) => Some(Connected),
            (Connecting, ConnectFailed) => Some(Closed),
            (Connected, RemoteClosed) | (Connected, InputEnded) => Some(Disconnecting),
            (Disconnecting, RemoteClosed) | (Disconnecting, InputEnded) => Some(Disconnecting),
            (Disconnecting, Released) => Some(Closed),
            _ => None,
        }
    }

    /// Whether the session still has work for the event loop.
    pub fn is_active(self) -> bool {
        matches!(
            self,
            SessionState::Connecting | SessionState::Connected | SessionState::Disconnecting
        )
    }
}
