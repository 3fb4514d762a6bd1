//! Formatting utilities for terminal output and log lines.

use crate::frame::Frame;

/// Placeholder printed when a close frame carries no reason
pub const NO_REASON: &str = "<none>";

/// Formatter for what the client shows to the user
pub struct FrameFormatter;

impl FrameFormatter {
    /// Format an inbound frame for standard output
    ///
    /// The result is `[<kind>:<length>]>` followed by the raw payload bytes
    /// and a newline. The payload is not decoded, so binary data is passed
    /// through untouched.
    ///
    /// # Arguments
    ///
    /// * `frame` - The frame received from the peer
    ///
    /// # Returns
    ///
    /// The bytes to write to standard output
    pub fn format_inbound(frame: &Frame) -> Vec<u8> {
        let header = format!("[{}:{}]>", frame.kind.tag(), frame.len());
        let mut output = Vec::with_capacity(header.len() + frame.len() + 1);
        output.extend_from_slice(header.as_bytes());
        output.extend_from_slice(&frame.payload);
        output.push(b'\n');
        output
    }

    /// Format a disconnect notice
    ///
    /// # Arguments
    ///
    /// * `code` - Close code reported for the connection
    /// * `reason` - Close reason, if the peer sent a non-empty one
    pub fn format_disconnected(code: u16, reason: Option<&str>) -> String {
        let reason = reason.filter(|r| !r.is_empty()).unwrap_or(NO_REASON);
        format!("Disconnected (code={}, msg='{}')", code, reason)
    }

    /// Format the hint shown once the handshake completes
    pub fn format_connected(url: &str) -> String {
        format!("Connected to [{}] - use Ctrl+D to disconnect", url)
    }

    /// Format a failed connection attempt
    pub fn format_connect_failed(url: &str, cause: &str) -> String {
        format!("ERROR: Connection to [{}] failed: {}", url, cause)
    }
}
