//! URL-path parsing.
//!
//! # Responsibilities
//! - Split a raw path into a canonical resource path and optional id
//! - Distinguish "no id provided" from "malformed trailing segment"
//!
//! # Design Decisions
//! - A three-segment path whose tail is not all digits fails outright:
//!   conflating it with "no id" would let malformed paths route as
//!   collection-level requests
//! - Parse failures always surface as malformed-request, never not-found
//! - The id stays a digit string here; numeric range is re-checked at
//!   dispatch time

/// A parsed resource path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    resource_path: String,
    id: Option<String>,
}

impl ParsedUrl {
    /// Normalized resource path: leading slash, no trailing slash, no id.
    pub fn resource_path(&self) -> &str {
        &self.resource_path
    }

    /// Whether a trailing id segment was present.
    pub fn has_id(&self) -> bool {
        self.id.is_some()
    }

    /// The id segment, digits only.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

/// Error type for URL parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    /// The path was empty.
    Empty,
    /// Fewer than two non-empty segments.
    TooFewSegments,
    /// More than three non-empty segments.
    TooManySegments,
    /// Three segments, but the tail is not a numeric id.
    MalformedId,
}

impl std::fmt::Display for UrlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            UrlError::Empty => "empty path",
            UrlError::TooFewSegments => "path has fewer than two segments",
            UrlError::TooManySegments => "path has more than three segments",
            UrlError::MalformedId => "trailing segment is not a numeric id",
        };
        f.write_str(text)
    }
}

impl std::error::Error for UrlError {}

/// Parse a raw request path.
///
/// Repeated slashes collapse (`/api//categories` parses like
/// `/api/categories`).
pub fn parse(raw: &str) -> Result<ParsedUrl, UrlError> {
    if raw.is_empty() {
        return Err(UrlError::Empty);
    }

    let segments: Vec<&str> = raw
        .strip_prefix('/')
        .unwrap_or(raw)
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect();

    match segments.as_slice() {
        [] | [_] => Err(UrlError::TooFewSegments),
        [root, collection] => Ok(ParsedUrl {
            resource_path: format!("/{root}/{collection}"),
            id: None,
        }),
        [root, collection, tail] => {
            if tail.bytes().all(|b| b.is_ascii_digit()) {
                Ok(ParsedUrl {
                    resource_path: format!("/{root}/{collection}"),
                    id: Some(tail.to_string()),
                })
            } else {
                Err(UrlError::MalformedId)
            }
        }
        _ => Err(UrlError::TooManySegments),
    }
}
