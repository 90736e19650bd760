//! WebSocket transport for the command channel.
//!
//! Bridges the socket to the rest of the client through bounded channels: a
//! background task owns the connection, forwards parsed incoming commands,
//! drains outgoing commands, and reconnects with exponential backoff when
//! the server drops. Malformed incoming payloads are logged and skipped -
//! nothing the server sends may crash the page.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use super::messages::{IncomingCommand, OutgoingCommand};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Socket-level errors.
#[derive(Debug, Clone, Error)]
pub enum SocketError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("disconnected from server")]
    Disconnected,
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("parse error: {0}")]
    ParseError(String),
}

/// Connection state, observable through a watch channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketState {
    Connected,
    Reconnecting { attempt: u8 },
    Disconnected,
}

/// Configuration for the socket client.
#[derive(Debug, Clone)]
pub struct SocketConfig {
    /// Server host and port.
    pub host: String,
    /// Connect parameters appended to the socket url (session token etc).
    pub params: Vec<(String, String)>,
    /// Reconnection attempts before giving up.
    pub max_retries: u8,
    /// Cap on the exponential backoff, in seconds.
    pub max_backoff_secs: u64,
}

impl Default for SocketConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1:4000".to_string(),
            params: Vec::new(),
            max_retries: 5,
            max_backoff_secs: 30,
        }
    }
}

impl SocketConfig {
    fn url(&self) -> String {
        let base = format!("ws://{}/socket", self.host);
        if self.params.is_empty() {
            return base;
        }
        let query = self
            .params
            .iter()
            .map(|(key, value)| format!("{key}={value}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("{base}?{query}")
    }
}

/// Seam for the opaque bidirectional channel.
///
/// The driver only needs these two operations; tests substitute an
/// in-memory implementation.
#[async_trait]
pub trait Transport: Send {
    /// Sends a command upstream.
    async fn send(&mut self, command: OutgoingCommand) -> Result<(), SocketError>;
    /// Receives the next downstream command. `None` means the channel is
    /// gone for good.
    async fn recv(&mut self) -> Option<IncomingCommand>;
}

/// WebSocket client for the command channel.
pub struct SocketClient {
    outgoing_tx: mpsc::Sender<OutgoingCommand>,
    incoming_rx: mpsc::Receiver<IncomingCommand>,
    state_rx: watch::Receiver<SocketState>,
    shutdown: Arc<AtomicBool>,
}

impl SocketClient {
    /// Connects to the server and spawns the background connection task.
    pub async fn connect(config: SocketConfig) -> Result<Self, SocketError> {
        let url = config.url();

        let ws_stream = connect_async(&url)
            .await
            .map_err(|e| SocketError::ConnectionFailed(e.to_string()))?;

        info!("connected to command channel at {}", url);

        let (ws_sink, ws_stream) = ws_stream.0.split();

        let (incoming_tx, incoming_rx) = mpsc::channel::<IncomingCommand>(100);
        let (outgoing_tx, outgoing_rx) = mpsc::channel::<OutgoingCommand>(100);
        let (state_tx, state_rx) = watch::channel(SocketState::Connected);

        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            run_connection_loop(
                url,
                config,
                ws_sink,
                ws_stream,
                incoming_tx,
                outgoing_rx,
                state_tx,
                shutdown_clone,
            )
            .await;
        });

        Ok(Self {
            outgoing_tx,
            incoming_rx,
            state_rx,
            shutdown,
        })
    }

    /// Whether the socket is currently connected.
    pub fn is_connected(&self) -> bool {
        matches!(*self.state_rx.borrow(), SocketState::Connected)
    }

    /// The current connection state.
    pub fn state(&self) -> SocketState {
        self.state_rx.borrow().clone()
    }

    /// Subscribes to connection state changes.
    pub fn state_receiver(&self) -> watch::Receiver<SocketState> {
        self.state_rx.clone()
    }

    /// Gracefully shuts down the connection task.
    pub fn shutdown(&self) {
        info!("shutting down command channel");
        self.shutdown.store(true, Ordering::SeqCst);
    }
}

impl Drop for SocketClient {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[async_trait]
impl Transport for SocketClient {
    async fn send(&mut self, command: OutgoingCommand) -> Result<(), SocketError> {
        self.outgoing_tx
            .send(command)
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn recv(&mut self) -> Option<IncomingCommand> {
        self.incoming_rx.recv().await
    }
}

/// Runs the connection loop with reconnection handling.
#[allow(clippy::too_many_arguments)]
async fn run_connection_loop(
    url: String,
    config: SocketConfig,
    mut ws_sink: WsSink,
    mut ws_stream: WsStream,
    incoming_tx: mpsc::Sender<IncomingCommand>,
    mut outgoing_rx: mpsc::Receiver<OutgoingCommand>,
    state_tx: watch::Sender<SocketState>,
    shutdown: Arc<AtomicBool>,
) {
    loop {
        if shutdown.load(Ordering::SeqCst) {
            debug!("shutdown signal received, closing connection");
            let _ = ws_sink.close().await;
            break;
        }

        tokio::select! {
            message = ws_stream.next() => {
                let mut reconnect = false;
                match message {
                    Some(Ok(Message::Text(text))) => {
                        match serde_json::from_str::<IncomingCommand>(&text) {
                            Ok(command) => {
                                debug!("received command: {:?}", command);
                                if incoming_tx.send(command).await.is_err() {
                                    warn!("incoming channel closed, shutting down");
                                    break;
                                }
                            }
                            Err(e) => {
                                // skip malformed payloads, never crash the page
                                warn!("failed to parse command: {} - {}", e, text);
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        debug!("received ping, sending pong");
                        let _ = ws_sink.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Close(_))) => {
                        info!("server closed the connection");
                        reconnect = true;
                    }
                    Some(Ok(_)) => {
                        // ignore pong, binary, and raw frames
                    }
                    Some(Err(e)) => {
                        error!("socket error: {}", e);
                        reconnect = true;
                    }
                    None => {
                        info!("socket stream ended");
                        reconnect = true;
                    }
                }
                if reconnect {
                    let _ = state_tx.send(SocketState::Disconnected);
                    match attempt_reconnect(&url, &config, &state_tx, &shutdown).await {
                        Some((new_sink, new_stream)) => {
                            ws_sink = new_sink;
                            ws_stream = new_stream;
                            let _ = state_tx.send(SocketState::Connected);
                        }
                        None => break,
                    }
                }
            }
            command = outgoing_rx.recv() => {
                match command {
                    Some(command) => {
                        match serde_json::to_string(&command) {
                            Ok(json) => {
                                debug!("sending command: {}", json);
                                if let Err(e) = ws_sink.send(Message::Text(json)).await {
                                    // the connection may recover on its own
                                    error!("failed to send command: {}", e);
                                }
                            }
                            Err(e) => {
                                error!("failed to serialize command: {}", e);
                            }
                        }
                    }
                    None => {
                        debug!("outgoing channel closed, shutting down");
                        break;
                    }
                }
            }
        }
    }

    info!("connection loop ended");
    let _ = state_tx.send(SocketState::Disconnected);
}

/// Attempts to reconnect with exponential backoff: 1s, 2s, 4s, ... capped
/// at `max_backoff_secs`.
async fn attempt_reconnect(
    url: &str,
    config: &SocketConfig,
    state_tx: &watch::Sender<SocketState>,
    shutdown: &Arc<AtomicBool>,
) -> Option<(WsSink, WsStream)> {
    for attempt in 1..=config.max_retries {
        if shutdown.load(Ordering::SeqCst) {
            debug!("shutdown requested during reconnection");
            return None;
        }

        let _ = state_tx.send(SocketState::Reconnecting { attempt });

        let backoff_secs = std::cmp::min(1u64 << (attempt - 1), config.max_backoff_secs);
        info!(
            "reconnection attempt {} of {}, waiting {}s",
            attempt, config.max_retries, backoff_secs
        );

        tokio::time::sleep(Duration::from_secs(backoff_secs)).await;

        if shutdown.load(Ordering::SeqCst) {
            debug!("shutdown requested during backoff");
            return None;
        }

        match connect_async(url).await {
            Ok((ws_stream, _)) => {
                info!("reconnected on attempt {}", attempt);
                return Some(ws_stream.split());
            }
            Err(e) => {
                warn!("reconnection attempt {} failed: {}", attempt, e);
            }
        }
    }

    error!(
        "failed to reconnect after {} attempts, giving up",
        config.max_retries
    );
    None
}
