//! CJTP Category Server Library
//!
//! A JSON-over-TCP request/response server built with Tokio.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌───────────────────────────────────────────────┐
//!                     │                 CJTP SERVER                    │
//!                     │                                                │
//!   Client Request    │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ──────────────────┼─▶│   net   │──▶│ protocol │──▶│  routing   │  │
//!                     │  │listener │   │  codec + │   │ dispatcher │  │
//!                     │  │ + conn  │   │ validate │   └─────┬──────┘  │
//!                     │  └─────────┘   └──────────┘         │         │
//!                     │                                     ▼         │
//!   Client Response   │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ◀─────────────────┼──│  codec  │◀──│ response │◀──│   store    │  │
//!                     │  │ encode  │   │  status  │   │ categories │  │
//!                     │  └─────────┘   └──────────┘   └────────────┘  │
//!                     │                                                │
//!                     │  ┌──────────────────────────────────────────┐ │
//!                     │  │          Cross-Cutting Concerns           │ │
//!                     │  │  ┌────────┐ ┌─────────────┐ ┌──────────┐ │ │
//!                     │  │  │ config │ │observability│ │lifecycle │ │ │
//!                     │  │  └────────┘ └─────────────┘ └──────────┘ │ │
//!                     │  └──────────────────────────────────────────┘ │
//!                     └───────────────────────────────────────────────┘
//! ```

// Core subsystems
pub mod config;
pub mod net;
pub mod protocol;
pub mod routing;
pub mod server;
pub mod store;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::ServerConfig;
pub use lifecycle::Shutdown;
pub use server::CjtpServer;
