//! Frames exchanged over the connection.

/// Kind of a WebSocket data frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Text,
    Binary,
}

impl FrameKind {
    /// Single-character tag printed in front of inbound frames.
    pub fn tag(self) -> char {
        match self {
            FrameKind::Text => 'T',
            FrameKind::Binary => 'B',
        }
    }
}

/// Kind used for every frame read from the terminal.
pub const OUTBOUND_KIND: FrameKind = FrameKind::Binary;

/// One WebSocket data frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub kind: FrameKind,
    pub payload: Vec<u8>,
}

impl Frame {
    pub fn text(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: FrameKind::Text,
            payload: payload.into(),
        }
    }

    pub fn binary(payload: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: FrameKind::Binary,
            payload: payload.into(),
        }
    }

    /// Build the outbound frame for one terminal read.
    ///
    /// Exactly one trailing `\n` is removed. The result may be empty and is
    /// still a frame to send.
    pub fn from_terminal_read(buffer: Vec<u8>) -> Self {
        Self {
            kind: OUTBOUND_KIND,
            payload: trim_trailing_newline(buffer),
        }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Remove a single trailing `\n` byte, if present.
pub fn trim_trailing_newline(mut buffer: Vec<u8>) -> Vec<u8> {
    if buffer.last() == Some(&b'\n') {
        buffer.pop();
    }
    buffer
}
