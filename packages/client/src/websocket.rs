//! `tokio-tungstenite` implementation of the transport traits.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::{
    io::{AsyncRead, AsyncWrite},
    net::TcpStream,
};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{
        self, Message, Utf8Bytes,
        protocol::{CloseFrame, frame::coding::CloseCode},
    },
};

use crate::{
    error::TransportError,
    frame::{Frame, FrameKind},
    transport::{CLOSE_ABNORMAL, CLOSE_NO_STATUS, Connection, ConnectionEvent, Connector},
};

/// Opens connections with `tokio_tungstenite::connect_async`.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebSocketConnector;

#[async_trait]
impl Connector for WebSocketConnector {
    type Connection = WebSocketConnection;

    async fn connect(&self, url: &str) -> Result<Self::Connection, TransportError> {
        let (stream, response) = connect_async(url)
            .await
            .map_err(|e| TransportError::ConnectFailed(e.to_string()))?;

        tracing::debug!("Handshake completed with status {}", response.status());

        Ok(WebSocketConnection::new(stream))
    }
}

/// An established `tokio-tungstenite` connection over `S`.
pub struct WebSocketConnection<S = MaybeTlsStream<TcpStream>> {
    stream: WebSocketStream<S>,
    closing: bool,
    /// Set once a write failed; the next event reports it as a disconnect.
    failure: Option<String>,
    /// Peer close decoded but not yet handed out.
    pending: Option<ConnectionEvent>,
    terminated: bool,
}

impl<S> WebSocketConnection<S> {
    fn new(stream: WebSocketStream<S>) -> Self {
        Self {
            stream,
            closing: false,
            failure: None,
            pending: None,
            terminated: false,
        }
    }

    fn disconnected(&mut self, code: u16, reason: Option<String>) -> ConnectionEvent {
        self.terminated = true;
        ConnectionEvent::Disconnected { code, reason }
    }
}

#[async_trait]
impl<S> Connection for WebSocketConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn send(&mut self, frame: Frame) -> Result<(), TransportError> {
        let message = match frame.kind {
            FrameKind::Binary => Message::Binary(frame.payload.into()),
            FrameKind::Text => {
                let text = String::from_utf8(frame.payload)
                    .map_err(|e| TransportError::SendFailed(e.to_string()))?;
                Message::Text(text.into())
            }
        };

        if let Err(e) = self.stream.send(message).await {
            self.failure.get_or_insert_with(|| e.to_string());
            return Err(TransportError::SendFailed(e.to_string()));
        }
        Ok(())
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        if self.closing || self.terminated {
            return Ok(());
        }
        self.closing = true;

        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: Utf8Bytes::from_static(""),
        };
        match self.stream.close(Some(frame)).await {
            Ok(()) => Ok(()),
            Err(tungstenite::Error::ConnectionClosed | tungstenite::Error::AlreadyClosed) => Ok(()),
            Err(e) => {
                self.failure.get_or_insert_with(|| e.to_string());
                Err(TransportError::CloseFailed(e.to_string()))
            }
        }
    }

    async fn next_event(&mut self) -> ConnectionEvent {
        if let Some(event) = self.pending.take() {
            return event;
        }
        if let Some(reason) = self.failure.take() {
            return self.disconnected(CLOSE_ABNORMAL, Some(reason));
        }
        if self.terminated {
            return ConnectionEvent::Disconnected {
                code: CLOSE_ABNORMAL,
                reason: Some("connection already terminated".to_string()),
            };
        }

        loop {
            match self.stream.next().await {
                Some(Ok(Message::Text(text))) => {
                    return ConnectionEvent::Message(Frame::text(text.as_bytes()));
                }
                Some(Ok(Message::Binary(data))) => {
                    return ConnectionEvent::Message(Frame::binary(data.to_vec()));
                }
                Some(Ok(Message::Close(frame))) => {
                    let (code, reason) = match frame {
                        Some(frame) => {
                            let reason = frame.reason.as_str();
                            (
                                u16::from(frame.code),
                                (!reason.is_empty()).then(|| reason.to_string()),
                            )
                        }
                        None => (CLOSE_NO_STATUS, None),
                    };
                    // kept until the flush below completes, in case this
                    // future is dropped while the reply is still pending
                    self.pending = Some(self.disconnected(code, reason));
                    if let Err(e) = self.stream.flush().await {
                        tracing::debug!("Failed to flush close reply: {}", e);
                    }
                    return self
                        .pending
                        .take()
                        .unwrap_or_else(|| self.disconnected(CLOSE_ABNORMAL, None));
                }
                Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {
                    // control frames are answered by tungstenite
                    tracing::trace!("Control frame received");
                }
                Some(Err(e)) => {
                    tracing::debug!("WebSocket read error: {}", e);
                    return self.disconnected(CLOSE_ABNORMAL, Some(e.to_string()));
                }
                None => {
                    return self.disconnected(
                        CLOSE_ABNORMAL,
                        Some("connection closed without a close frame".to_string()),
                    );
                }
            }
        }
    }
}
