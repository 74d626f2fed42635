//! Request envelope and method set.
//!
//! # Responsibilities
//! - Deserialize the wire-level request object
//! - Model the closed method set with case-insensitive parsing
//! - Expose per-method body requirements to the validator
//!
//! # Design Decisions
//! - Every envelope field is an `Option`: a missing field must survive
//!   decoding so the validator can report it as `missing ...` instead
//!   of the whole envelope failing to parse

use serde::Deserialize;

/// A decoded CJTP request envelope.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Request {
    /// Operation to perform (`read`, `create`, `update`, `delete`, `echo`).
    pub method: Option<String>,

    /// Resource path, e.g. `/api/categories/1`.
    pub path: Option<String>,

    /// Decimal Unix timestamp, as a string.
    pub date: Option<String>,

    /// Raw body text; JSON for `create`/`update`, opaque for `echo`.
    pub body: Option<String>,
}

impl Request {
    /// The parsed method, if present and recognized.
    pub fn method(&self) -> Option<Method> {
        self.method.as_deref().and_then(Method::parse)
    }
}

/// The CJTP method set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Read,
    Create,
    Update,
    Delete,
    Echo,
}

impl Method {
    /// Parse a method name, case-insensitively.
    ///
    /// Returns `None` for anything outside the supported set.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "read" => Some(Method::Read),
            "create" => Some(Method::Create),
            "update" => Some(Method::Update),
            "delete" => Some(Method::Delete),
            "echo" => Some(Method::Echo),
            _ => None,
        }
    }

    /// Methods that must carry a body.
    pub fn requires_body(self) -> bool {
        matches!(self, Method::Create | Method::Update | Method::Echo)
    }

    /// Methods whose body must be syntactically valid JSON.
    ///
    /// `echo` carries opaque text and is exempt.
    pub fn requires_json_body(self) -> bool {
        matches!(self, Method::Create | Method::Update)
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Method::Read => "read",
            Method::Create => "create",
            Method::Update => "update",
            Method::Delete => "delete",
            Method::Echo => "echo",
        };
        f.write_str(name)
    }
}
