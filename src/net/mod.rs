//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (accept loop, connection limits)
//!     → connection.rs (request cycle, framing, timeout policy)
//!     → Hand off frames to the routing layer
//!
//! Connection states:
//!     AwaitingRequest → Processing → Responding → (AwaitingRequest | Closed)
//! ```
//!
//! # Design Decisions
//! - Bounded accept queue prevents resource exhaustion
//! - One handler task per connection; handlers share only the store
//! - Transport errors close the connection silently; they are never
//!   surfaced as protocol responses

pub mod connection;
pub mod listener;

pub use connection::{ConnectionHandler, ConnectionId, ConnectionState};
pub use listener::{ConnectionPermit, Listener, ListenerError};
