//! Per-connection request cycle.
//!
//! # Responsibilities
//! - Track connection identity and state for tracing
//! - Read framed requests with a read-inactivity timeout
//! - Drive decode, validate, route, encode for each frame
//! - Keep the connection open across request cycles
//!
//! # Design Decisions
//! - A bad request produces a response, never a disconnect; only
//!   transport failure or inactivity closes the connection
//! - A timeout with buffered, undelimited bytes flushes them as one
//!   legacy burst frame; a timeout with nothing buffered closes
//! - Blank frames are a no-op and loop back to waiting

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_util::codec::Framed;

use crate::protocol::codec::CjtpCodec;
use crate::routing::Dispatcher;

/// Process-wide counter for connection IDs.
/// Relaxed ordering is sufficient: only uniqueness matters.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Allocate the next unique connection ID.
    pub fn next() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Connection state within the request cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Waiting for the next request frame.
    AwaitingRequest,
    /// Running the request through the dispatcher.
    Processing,
    /// Writing the response back.
    Responding,
    /// Done; the handler has returned.
    Closed,
}

/// Drives the request cycle for one accepted connection.
pub struct ConnectionHandler {
    framed: Framed<TcpStream, CjtpCodec>,
    id: ConnectionId,
    state: ConnectionState,
    dispatcher: Arc<Dispatcher>,
    read_timeout: Duration,
}

impl ConnectionHandler {
    pub fn new(stream: TcpStream, dispatcher: Arc<Dispatcher>, read_timeout: Duration) -> Self {
        Self {
            framed: Framed::new(stream, CjtpCodec::new()),
            id: ConnectionId::next(),
            state: ConnectionState::AwaitingRequest,
            dispatcher,
            read_timeout,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    fn transition(&mut self, next: ConnectionState) {
        tracing::trace!(
            connection_id = %self.id,
            from = ?self.state,
            to = ?next,
            "State transition"
        );
        self.state = next;
    }

    /// Run request cycles until the peer disconnects, the stream goes
    /// idle past the read timeout, or a transport error occurs.
    pub async fn run(mut self) {
        loop {
            self.transition(ConnectionState::AwaitingRequest);

            let frame = match timeout(self.read_timeout, self.framed.next()).await {
                Ok(Some(Ok(frame))) => frame,
                Ok(Some(Err(error))) => {
                    tracing::warn!(connection_id = %self.id, %error, "Frame error, closing connection");
                    break;
                }
                Ok(None) => {
                    tracing::debug!(connection_id = %self.id, "Peer disconnected");
                    break;
                }
                Err(_elapsed) => {
                    let buffered = self.framed.read_buffer_mut();
                    if buffered.is_empty() {
                        tracing::debug!(connection_id = %self.id, "Read timeout with no pending data, closing");
                        break;
                    }
                    // Legacy burst framing: the peer sent a request with
                    // no delimiter. Everything buffered is one frame.
                    tracing::debug!(
                        connection_id = %self.id,
                        bytes = buffered.len(),
                        "Flushing undelimited burst as one frame"
                    );
                    buffered.split()
                }
            };

            // Blank frame: keep waiting.
            if frame.iter().all(|b| b.is_ascii_whitespace()) {
                continue;
            }

            self.transition(ConnectionState::Processing);
            let response = self.dispatcher.process(&frame);

            self.transition(ConnectionState::Responding);
            if let Err(error) = self.framed.send(&response).await {
                tracing::warn!(connection_id = %self.id, %error, "Failed to write response");
                break;
            }
            tracing::debug!(connection_id = %self.id, status = %response.status, "Response sent");
        }

        self.transition(ConnectionState::Closed);
        tracing::debug!(connection_id = %self.id, "Connection closed");
    }
}
