//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (main.rs):
//!     Load config → Validate → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Ctrl-C → Broadcast signal → Stop accepting → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
