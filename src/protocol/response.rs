//! Response envelope and status lines.
//!
//! # Responsibilities
//! - Serialize the wire-level response object
//! - Render the status taxonomy as `<class digit> <reason>` lines
//!
//! # Design Decisions
//! - `body` is omitted entirely when absent: `update` answers exactly
//!   `{"status":"3 Updated"}`, not `{"status":"3 Updated","body":null}`
//! - Validation failures carry their reason list in the status line

use serde::{Deserialize, Serialize};

/// A CJTP response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Status line, `<class digit> <reason text>`.
    pub status: String,

    /// Response payload: JSON text for category results, raw text for echo.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Response {
    fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            body: None,
        }
    }

    /// `1 Ok` with no body (`delete`).
    pub fn ok() -> Self {
        Self::with_status("1 Ok")
    }

    /// `1 Ok` carrying a body (`read`, `echo`).
    pub fn ok_with(body: impl Into<String>) -> Self {
        Self {
            body: Some(body.into()),
            ..Self::ok()
        }
    }

    /// `2 Created` carrying the new record.
    pub fn created(body: impl Into<String>) -> Self {
        Self {
            status: "2 Created".to_string(),
            body: Some(body.into()),
        }
    }

    /// `3 Updated`, no body.
    pub fn updated() -> Self {
        Self::with_status("3 Updated")
    }

    /// `4 Bad Request` for malformed envelopes, paths, ids, and payloads.
    pub fn bad_request() -> Self {
        Self::with_status("4 Bad Request")
    }

    /// Class-4 rejection carrying validator reasons, e.g.
    /// `4 missing method, missing date`.
    pub fn rejected(reasons: impl std::fmt::Display) -> Self {
        Self::with_status(format!("4 {reasons}"))
    }

    /// `5 Not Found` for unsupported paths and lookup misses.
    pub fn not_found() -> Self {
        Self::with_status("5 Not Found")
    }

    /// `6 Error` for unexpected internal failures. Detail stays in the
    /// log, never in the response.
    pub fn internal_error() -> Self {
        Self::with_status("6 Error")
    }

    /// The status class, if the status line is well-formed.
    pub fn class(&self) -> Option<StatusClass> {
        self.status.chars().next().and_then(StatusClass::from_digit)
    }
}

/// The leading digit of a status line, partitioning outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// `1`: success, no error.
    Success,
    /// `2`: resource created.
    Created,
    /// `3`: resource updated.
    Updated,
    /// `4`: malformed/invalid request.
    BadRequest,
    /// `5`: resource not found.
    NotFound,
    /// `6`: internal server error.
    ServerError,
}

impl StatusClass {
    /// Map a status-line digit to its class.
    pub fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '1' => Some(StatusClass::Success),
            '2' => Some(StatusClass::Created),
            '3' => Some(StatusClass::Updated),
            '4' => Some(StatusClass::BadRequest),
            '5' => Some(StatusClass::NotFound),
            '6' => Some(StatusClass::ServerError),
            _ => None,
        }
    }
}
