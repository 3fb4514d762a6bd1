//! Helpers shared by the integration tests.

#![allow(dead_code)]

use std::{
    net::SocketAddr,
    pin::Pin,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    task::{Context, Poll},
    time::Duration,
};

use axum::{
    Router,
    extract::{
        State,
        ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
    routing::get,
};
use tokio::{
    io::{AsyncRead, ReadBuf},
    net::TcpListener,
    sync::mpsc,
};

/// What the test server saw
#[derive(Debug)]
pub enum ServerEvent {
    Connected,
    Received(Message),
}

/// How the test server treats each connection
#[derive(Debug, Clone, Default)]
pub struct Behavior {
    /// Text frame sent right after the handshake
    pub greeting: Option<&'static str>,
    /// Close with this code and reason after the greeting
    pub close_with: Option<(u16, &'static str)>,
}

#[derive(Clone)]
struct ServerState {
    events: mpsc::UnboundedSender<ServerEvent>,
    behavior: Behavior,
}

/// In-process WebSocket server listening on an ephemeral port
pub struct TestServer {
    pub addr: SocketAddr,
    pub events: mpsc::UnboundedReceiver<ServerEvent>,
}

impl TestServer {
    pub async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to read local address");

        let (tx, rx) = mpsc::unbounded_channel();
        let state = ServerState {
            events: tx,
            behavior,
        };
        let app = Router::new()
            .route("/ws", get(websocket_handler))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Test server failed");
        });

        TestServer { addr, events: rx }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }

    /// Wait for the next event, or `None` after `timeout`
    pub async fn next_event(&mut self, timeout: Duration) -> Option<ServerEvent> {
        tokio::time::timeout(timeout, self.events.recv())
            .await
            .ok()
            .flatten()
    }

    /// Collect events until none arrives for `quiet`
    pub async fn drain_events(&mut self, quiet: Duration) -> Vec<ServerEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.next_event(quiet).await {
            events.push(event);
        }
        events
    }
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<ServerState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: ServerState) {
    let _ = state.events.send(ServerEvent::Connected);

    if let Some(text) = state.behavior.greeting {
        let _ = socket.send(Message::Text(text.to_string().into())).await;
    }

    if let Some((code, reason)) = state.behavior.close_with {
        let frame = CloseFrame {
            code,
            reason: reason.to_string().into(),
        };
        let _ = socket.send(Message::Close(Some(frame))).await;
    }

    // keep reading after a close so the close reply gets flushed
    while let Some(Ok(message)) = socket.recv().await {
        let _ = state.events.send(ServerEvent::Received(message));
    }
}

/// Listener that accepts TCP connections and drops them before any handshake
pub struct ResettingListener {
    pub addr: SocketAddr,
    pub accepted: Arc<AtomicUsize>,
}

impl ResettingListener {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind resetting listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let accepted = Arc::new(AtomicUsize::new(0));

        let counter = accepted.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                counter.fetch_add(1, Ordering::SeqCst);
                drop(stream);
            }
        });

        ResettingListener { addr, accepted }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

/// Listener that completes the WebSocket handshake, then drops the socket
/// without a close frame
pub struct DroppingListener {
    pub addr: SocketAddr,
}

impl DroppingListener {
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind dropping listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let socket = tokio_tungstenite::accept_async(stream)
                        .await
                        .expect("Failed to accept WebSocket handshake");
                    tokio::time::sleep(Duration::from_millis(100)).await;
                    drop(socket);
                });
            }
        });

        DroppingListener { addr }
    }

    pub fn url(&self) -> String {
        format!("ws://{}/ws", self.addr)
    }
}

/// Reader that never yields data and records whether it was polled
#[derive(Clone, Default)]
pub struct SilentReader {
    pub polled: Arc<AtomicBool>,
}

impl AsyncRead for SilentReader {
    fn poll_read(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        _buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        self.polled.store(true, Ordering::SeqCst);
        Poll::Pending
    }
}
