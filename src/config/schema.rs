//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! server. All types derive Serde traits for deserialization from
//! config files.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration for the CJTP server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, connection limit).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address. Loopback by default.
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            max_connections: 1024,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Read-inactivity timeout per connection, in milliseconds. A
    /// connection with no complete frame and no pending bytes for this
    /// long is closed.
    pub read_idle_ms: u64,
}

impl TimeoutConfig {
    /// The read-inactivity timeout as a `Duration`.
    pub fn read_idle(&self) -> Duration {
        Duration::from_millis(self.read_idle_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { read_idle_ms: 5000 }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter, overridden by `RUST_LOG` when set.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "cjtp_server=debug".to_string(),
        }
    }
}
