//! Observability subsystem.
//!
//! Structured logging via the `tracing` crate. Every per-connection
//! event carries a `connection_id` field; request outcomes log their
//! status line.

pub mod logging;
