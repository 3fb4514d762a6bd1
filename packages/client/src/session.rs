//! Session context: one connection bridged to one input stream.
//!
//! Every handler takes the session explicitly; nothing is stored in globals.
//! The session is driven from a single task, so the connection and the input
//! stream are never touched concurrently.

use std::io::Write;

use tokio::io::AsyncRead;

use crate::{
    error::TransportError,
    formatter::FrameFormatter,
    frame::Frame,
    input::{InputEvent, InputStream},
    state::{SessionEvent, SessionState},
    transport::{Connection, ConnectionEvent, Connector},
};

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The single connection attempt failed
    ConnectFailed(String),
    /// The connection was established and later torn down
    Disconnected { code: u16, reason: Option<String> },
}

/// Summary of a finished session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub connect_attempts: u32,
    pub frames_sent: usize,
    pub frames_received: usize,
    pub outcome: Option<SessionOutcome>,
}

enum Step {
    Remote(ConnectionEvent),
    Input(InputEvent),
    Drained,
}

/// Bridges one connection `C` to an input reader `R`, printing to `W`.
pub struct Session<C, R, W> {
    url: String,
    state: SessionState,
    connection: Option<C>,
    /// Reader waiting for the handshake; reads never start before it.
    reader: Option<R>,
    input: Option<InputStream<R>>,
    output: W,
    report: SessionReport,
}

impl<C, R, W> Session<C, R, W>
where
    C: Connection,
    R: AsyncRead + Unpin,
    W: Write,
{
    pub fn new(url: impl Into<String>, reader: R, output: W) -> Self {
        Self {
            url: url.into(),
            state: SessionState::Idle,
            connection: None,
            reader: Some(reader),
            input: None,
            output,
            report: SessionReport::default(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn report(&self) -> &SessionReport {
        &self.report
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Make the single connection attempt.
    ///
    /// Dispatches to [`Session::on_connected`] or [`Session::on_error`].
    /// Calling it again after the first attempt does nothing.
    pub async fn connect<K>(&mut self, connector: &K)
    where
        K: Connector<Connection = C>,
    {
        if self.state != SessionState::Idle {
            tracing::debug!("Connection already attempted, not reconnecting");
            return;
        }

        self.advance(SessionEvent::ConnectStarted);
        self.report.connect_attempts += 1;
        tracing::debug!("Connecting to [{}]", self.url);

        match connector.connect(&self.url).await {
            Ok(connection) => self.on_connected(connection),
            Err(e) => self.on_error(&e),
        }
    }

    /// Handshake completed: keep the connection and open the input stream.
    pub fn on_connected(&mut self, connection: C) {
        if self.state != SessionState::Connecting {
            tracing::debug!(
                "Unexpected connection in state {:?}, dropping it",
                self.state
            );
            return;
        }

        tracing::info!("{}", FrameFormatter::format_connected(&self.url));
        self.connection = Some(connection);
        self.input = self.reader.take().map(InputStream::new);
        self.advance(SessionEvent::HandshakeCompleted);
    }

    /// Print one inbound frame.
    pub fn on_message(&mut self, frame: Frame) {
        self.report.frames_received += 1;

        let bytes = FrameFormatter::format_inbound(&frame);
        if let Err(e) = self
            .output
            .write_all(&bytes)
            .and_then(|()| self.output.flush())
        {
            tracing::warn!("Failed to print received frame: {}", e);
        }
    }

    /// The connection is gone: release it and close the input stream.
    pub fn on_disconnected(&mut self, code: u16, reason: Option<&str>) {
        if self.connection.take().is_none() {
            tracing::debug!("Connection already released, ignoring disconnect");
            return;
        }

        tracing::info!("{}", FrameFormatter::format_disconnected(code, reason));
        self.report.outcome = Some(SessionOutcome::Disconnected {
            code,
            reason: reason.filter(|r| !r.is_empty()).map(str::to_string),
        });

        self.close_input();
        self.advance(SessionEvent::RemoteClosed);
        self.release_if_drained();
    }

    /// The connection attempt failed. Input is never read.
    pub fn on_error(&mut self, error: &TransportError) {
        let cause = match error {
            TransportError::ConnectFailed(cause) => cause.clone(),
            other => other.to_string(),
        };

        tracing::error!("{}", FrameFormatter::format_connect_failed(&self.url, &cause));
        self.report.outcome = Some(SessionOutcome::ConnectFailed(cause));
        self.reader = None;
        self.advance(SessionEvent::ConnectFailed);
    }

    /// Forward one terminal read, or tear down on end-of-input and errors.
    pub async fn on_input_ready(&mut self, event: InputEvent) {
        match event {
            InputEvent::Data(buffer) => {
                let frame = Frame::from_terminal_read(buffer);
                let Some(connection) = self.connection.as_mut() else {
                    tracing::debug!("No connection, dropping {} bytes of input", frame.len());
                    return;
                };

                tracing::trace!(len = frame.len(), "Sending frame");
                match connection.send(frame).await {
                    Ok(()) => self.report.frames_sent += 1,
                    Err(e) => tracing::warn!("{}", e),
                }
            }
            InputEvent::Eof => {
                tracing::info!("EOF from terminal, disconnecting and exiting...");
                self.shutdown_local().await;
            }
            InputEvent::Failed(e) => {
                tracing::warn!("Terminal read error [{}], disconnecting...", e);
                self.shutdown_local().await;
            }
        }
    }

    /// Dispatch events until both the connection and the input stream are
    /// released.
    pub async fn run(&mut self) -> SessionReport {
        while self.state.is_active() {
            match self.next_step().await {
                Step::Remote(ConnectionEvent::Message(frame)) => self.on_message(frame),
                Step::Remote(ConnectionEvent::Disconnected { code, reason }) => {
                    self.on_disconnected(code, reason.as_deref())
                }
                Step::Input(event) => self.on_input_ready(event).await,
                Step::Drained => {
                    self.close_input();
                    self.advance(SessionEvent::InputEnded);
                    self.release_if_drained();
                    if self.state.is_active() {
                        tracing::warn!("Nothing left to drive in state {:?}", self.state);
                        break;
                    }
                }
            }
        }

        self.report.clone()
    }

    async fn next_step(&mut self) -> Step {
        let input = self.input.as_mut().filter(|input| !input.is_closed());

        match (self.connection.as_mut(), input) {
            (Some(connection), Some(input)) => tokio::select! {
                event = connection.next_event() => Step::Remote(event),
                event = input.read_chunk() => Step::Input(event),
            },
            (Some(connection), None) => Step::Remote(connection.next_event().await),
            (None, _) => Step::Drained,
        }
    }

    async fn shutdown_local(&mut self) {
        self.close_input();

        if let Some(connection) = self.connection.as_mut()
            && let Err(e) = connection.close().await
        {
            tracing::warn!("{}", e);
        }

        self.advance(SessionEvent::InputEnded);
    }

    fn close_input(&mut self) {
        if let Some(input) = self.input.as_mut()
            && input.close()
        {
            tracing::debug!("Input stream closed");
        }
    }

    fn release_if_drained(&mut self) {
        let input_released = self.input.as_ref().is_none_or(InputStream::is_closed);
        if self.connection.is_none() && input_released {
            self.input = None;
            self.advance(SessionEvent::Released);
        }
    }

    fn advance(&mut self, event: SessionEvent) {
        match self.state.transition(event) {
            Some(next) => {
                if next != self.state {
                    tracing::debug!("Session state {:?} -> {:?}", self.state, next);
                }
                self.state = next;
            }
            None => tracing::debug!("Ignoring {:?} in state {:?}", event, self.state),
        }
    }
}

/// Connect once and bridge `reader` to the connection until it is torn down.
pub async fn run_session<K, R, W>(
    connector: &K,
    url: &str,
    reader: R,
    output: W,
) -> (SessionReport, W)
where
    K: Connector,
    R: AsyncRead + Unpin,
    W: Write,
{
    let mut session = Session::new(url, reader, output);
    session.connect(connector).await;
    let report = session.run().await;
    (report, session.into_output())
}
