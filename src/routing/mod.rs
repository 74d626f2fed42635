//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Validated request
//!     → url.rs (resource path + optional id, hard-fail on malformed)
//!     → dispatcher.rs (method rules, store calls, status mapping)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - URL parse failures are class 4, never class 5: a malformed path
//!   must not be mistaken for an unknown resource
//! - Exactly one collection endpoint; everything else is `5 Not Found`

pub mod dispatcher;
pub mod url;

pub use dispatcher::{Dispatcher, CATEGORIES_PATH};
pub use url::{ParsedUrl, UrlError};
