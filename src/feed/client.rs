//! Feed client — `tokio-tungstenite`.
//!
//! A background tokio task owns the connection; the public API talks to it
//! over mpsc channels and consumes events as a stream. The feed is
//! receive-only: other than transport-level pong replies and the close frame
//! on shutdown, the client never writes to the socket.
//!
//! There is no reconnection. When the connection drops the task emits
//! [`FeedEvent::Disconnected`] and exits; restarting is the caller's call.

use std::pin::Pin;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::{SplitSink, SplitStream, Stream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

use crate::error::WsError;
use crate::feed::{FeedConfig, FeedEvent, ReadyState};
use crate::wire::MemStatsUpdate;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// ─── Commands from public API to background task ─────────────────────────────

enum Command {
    Disconnect,
}

// ─── Background task state ───────────────────────────────────────────────────

struct TaskState {
    config: FeedConfig,
    event_tx: mpsc::Sender<FeedEvent>,
    cmd_rx: mpsc::Receiver<Command>,
    ready_state: Arc<AtomicU16>,
}

impl TaskState {
    fn emit(&self, event: FeedEvent) {
        let _ = self.event_tx.try_send(event);
    }
}

// ─── Public FeedClient ───────────────────────────────────────────────────────

/// WebSocket client for the live data feed.
///
/// One connection per client. The public API communicates with the
/// background task via mpsc channels.
pub struct FeedClient {
    config: FeedConfig,
    cmd_tx: Option<mpsc::Sender<Command>>,
    event_rx: tokio::sync::Mutex<mpsc::Receiver<FeedEvent>>,
    event_tx: mpsc::Sender<FeedEvent>,
    task_handle: Option<JoinHandle<()>>,
    ready_state: Arc<AtomicU16>,
}

impl FeedClient {
    /// Create a new feed client. Does not connect yet.
    pub fn new(config: FeedConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(256);
        Self {
            config,
            cmd_tx: None,
            event_rx: tokio::sync::Mutex::new(event_rx),
            event_tx,
            task_handle: None,
            ready_state: Arc::new(AtomicU16::new(ReadyState::Closed as u16)),
        }
    }

    /// Connect to the feed.
    ///
    /// Spawns a background tokio task that manages the connection and
    /// delivers events. Calling this on an already-connected client is a
    /// no-op.
    pub async fn connect(&mut self) -> Result<(), WsError> {
        if self.cmd_tx.is_some() {
            return Ok(());
        }

        if !self.config.url.starts_with("ws://") && !self.config.url.starts_with("wss://") {
            return Err(WsError::ConnectionFailed(format!(
                "invalid feed URL: {}",
                self.config.url
            )));
        }

        let (cmd_tx, cmd_rx) = mpsc::channel(16);
        self.cmd_tx = Some(cmd_tx);
        self.ready_state
            .store(ReadyState::Connecting as u16, Ordering::SeqCst);

        let state = TaskState {
            config: self.config.clone(),
            event_tx: self.event_tx.clone(),
            cmd_rx,
            ready_state: Arc::clone(&self.ready_state),
        };

        let handle = tokio::spawn(run_task(state));
        self.task_handle = Some(handle);

        Ok(())
    }

    /// Disconnect from the feed.
    ///
    /// Sends a graceful close to the background task and waits for it to
    /// finish. Safe to call when not connected.
    pub async fn disconnect(&mut self) -> Result<(), WsError> {
        if let Some(tx) = self.cmd_tx.take() {
            let _ = tx.send(Command::Disconnect).await;
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
        }

        self.ready_state
            .store(ReadyState::Closed as u16, Ordering::SeqCst);
        Ok(())
    }

    /// Whether the feed is currently open.
    pub fn is_connected(&self) -> bool {
        self.ready_state() == ReadyState::Open
    }

    /// Current connection state.
    pub fn ready_state(&self) -> ReadyState {
        ReadyState::from(self.ready_state.load(Ordering::SeqCst))
    }

    /// Get a stream of events from the feed.
    ///
    /// The returned stream borrows `self`, so it must be dropped before
    /// calling `disconnect()`.
    pub fn events(&self) -> Pin<Box<dyn Stream<Item = FeedEvent> + Send + '_>> {
        Box::pin(futures_util::stream::unfold(
            &self.event_rx,
            |rx| async move {
                let mut guard = rx.lock().await;
                guard.recv().await.map(|event| (event, rx))
            },
        ))
    }
}

impl Drop for FeedClient {
    fn drop(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
        }
    }
}

// ─── Background task ─────────────────────────────────────────────────────────

async fn run_task(mut state: TaskState) {
    let timeout = Duration::from_millis(state.config.connect_timeout_ms);

    let (sink, stream) = match attempt_connect(&state.config.url, timeout).await {
        Ok(parts) => parts,
        Err(e) => {
            tracing::error!("Feed connection failed: {}", e);
            state.emit(FeedEvent::Error(format!("Connection failed: {}", e)));
            // The feed never opened, but consumers still need the terminal
            // event or they would wait on the stream forever.
            state.emit(FeedEvent::Disconnected {
                code: None,
                reason: format!("Connection failed: {}", e),
            });
            state
                .ready_state
                .store(ReadyState::Closed as u16, Ordering::SeqCst);
            return;
        }
    };

    state
        .ready_state
        .store(ReadyState::Open as u16, Ordering::SeqCst);
    state.emit(FeedEvent::Connected);
    tracing::info!("Feed connected: {}", state.config.url);

    run_connected(&mut state, sink, stream).await;

    state
        .ready_state
        .store(ReadyState::Closed as u16, Ordering::SeqCst);
}

/// The inner connected loop — runs until the connection breaks or the
/// client asks for a disconnect.
async fn run_connected(
    state: &mut TaskState,
    mut sink: SplitSink<WsStream, Message>,
    mut stream: SplitStream<WsStream>,
) {
    loop {
        tokio::select! {
            // ── a) Incoming WS message ───────────────────────────────────
            msg = stream.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        let text_str: &str = text.as_ref();
                        match serde_json::from_str::<MemStatsUpdate>(text_str) {
                            Ok(update) => {
                                state.emit(FeedEvent::Sample(update));
                            }
                            Err(e) => {
                                tracing::warn!(
                                    "Feed deserialization error: {} — raw: {}",
                                    e,
                                    text_str
                                );
                                state.emit(FeedEvent::Error(format!(
                                    "Deserialization error: {}",
                                    e
                                )));
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Pong(_))) => {
                        // Server-initiated pong — ignore
                    }
                    Some(Ok(Message::Close(frame))) => {
                        let (code, reason) = extract_close(frame.as_ref());
                        tracing::info!("Feed closed by server: code={} reason={}", code, reason);
                        state.emit(FeedEvent::Disconnected {
                            code: Some(code),
                            reason,
                        });
                        return;
                    }
                    Some(Ok(_)) => {} // Binary, Frame — ignore
                    Some(Err(e)) => {
                        let reason = e.to_string();
                        tracing::error!("Feed error: {}", reason);
                        state.emit(FeedEvent::Disconnected { code: None, reason });
                        return;
                    }
                    None => {
                        state.emit(FeedEvent::Disconnected {
                            code: None,
                            reason: "Stream ended".into(),
                        });
                        return;
                    }
                }
            }

            // ── b) Command from public API ───────────────────────────────
            cmd = state.cmd_rx.recv() => {
                match cmd {
                    Some(Command::Disconnect) => {
                        let _ = sink.send(Message::Close(Some(CloseFrame {
                            code: CloseCode::Normal,
                            reason: "Client disconnect".into(),
                        }))).await;
                        return;
                    }
                    None => {
                        // FeedClient dropped — clean exit
                        return;
                    }
                }
            }
        }
    }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

/// Attempt to establish the connection within the configured timeout.
async fn attempt_connect(
    url: &str,
    timeout: Duration,
) -> Result<(SplitSink<WsStream, Message>, SplitStream<WsStream>), String> {
    let (ws_stream, _) = tokio::time::timeout(timeout, connect_async(url))
        .await
        .map_err(|_| "Connection timeout".to_string())?
        .map_err(|e| e.to_string())?;

    Ok(ws_stream.split())
}

/// Extract close code and reason from an optional CloseFrame.
fn extract_close(frame: Option<&CloseFrame>) -> (u16, String) {
    match frame {
        Some(f) => (f.code.into(), f.reason.to_string()),
        None => (1006, "No close frame".into()),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
