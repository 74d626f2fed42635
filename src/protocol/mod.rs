//! CJTP protocol subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound bytes
//!     → codec.rs (newline-delimited frames, size cap)
//!     → request.rs (envelope decode, method parse)
//!     → validator.rs (structural checks, ordered reasons)
//!     → [routing layer dispatches]
//!     → response.rs (status line + optional body)
//!     → codec.rs (encode, delimit)
//! ```

pub mod codec;
pub mod request;
pub mod response;
pub mod validator;

pub use codec::{CjtpCodec, CodecError};
pub use request::{Method, Request};
pub use response::{Response, StatusClass};
pub use validator::{validate, Violation};
