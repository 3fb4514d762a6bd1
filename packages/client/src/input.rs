//! Terminal input stream handle.

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};

/// Size of the buffer allocated for each read.
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Result of one read on the input stream.
#[derive(Debug)]
pub enum InputEvent {
    /// Bytes read; never empty
    Data(Vec<u8>),
    /// End of input (Ctrl+D on a terminal)
    Eof,
    /// The read failed
    Failed(io::Error),
}

/// Handle for the stream the user types into.
///
/// Reads allocate a fresh buffer each time and hand it over with the event,
/// so no bytes are retained between reads. Once closed, the handle never
/// reads again and further closes are no-ops.
pub struct InputStream<R> {
    reader: R,
    closed: bool,
}

impl<R: AsyncRead + Unpin> InputStream<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            closed: false,
        }
    }

    /// Wait for the next chunk of input.
    ///
    /// Cancel safe: if the future is dropped before completing, no data was
    /// consumed from the reader.
    pub async fn read_chunk(&mut self) -> InputEvent {
        if self.closed {
            return InputEvent::Eof;
        }

        let mut buffer = vec![0u8; READ_BUFFER_SIZE];
        match self.reader.read(&mut buffer).await {
            Ok(0) => InputEvent::Eof,
            Ok(n) => {
                buffer.truncate(n);
                InputEvent::Data(buffer)
            }
            Err(e) => InputEvent::Failed(e),
        }
    }

    /// Close the stream.
    ///
    /// # Returns
    ///
    /// `true` if this call closed it, `false` if it was already closed
    pub fn close(&mut self) -> bool {
        !std::mem::replace(&mut self.closed, true)
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}
