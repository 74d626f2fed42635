//! Request dispatch.
//!
//! # Responsibilities
//! - Decode the request envelope and reject malformed JSON early
//! - Run validation, URL parsing, and the per-method handlers
//! - Map every failure to its status class
//!
//! # Design Decisions
//! - `echo` is handled before URL parsing: it is not resource-scoped
//! - An unsupported resource path is `5 Not Found` for every method
//! - Create/update payloads go through a typed decode step with a
//!   distinguishable error instead of ad-hoc JSON probing
//! - Store failures surface as client statuses; only encoding failures
//!   are internal errors

use std::sync::Arc;

use serde::Deserialize;

use crate::protocol::request::{Method, Request};
use crate::protocol::response::Response;
use crate::protocol::validator;
use crate::routing::url::{self, ParsedUrl};
use crate::store::{CategoryId, CategoryStore};

/// The single supported collection path.
pub const CATEGORIES_PATH: &str = "/api/categories";

/// Routes validated requests to their handlers.
///
/// One dispatcher is shared by all connection handlers; it owns no
/// mutable state of its own, only a handle to the store.
pub struct Dispatcher {
    store: Arc<CategoryStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<CategoryStore>) -> Self {
        Self { store }
    }

    /// Process one raw frame: envelope decode, then dispatch.
    ///
    /// A frame that is not a JSON request object short-circuits to
    /// `4 Bad Request` without touching the validator or router.
    pub fn process(&self, raw: &[u8]) -> Response {
        let request: Request = match serde_json::from_slice(raw) {
            Ok(request) => request,
            Err(error) => {
                tracing::debug!(%error, "Malformed request envelope");
                return Response::bad_request();
            }
        };
        self.dispatch(&request)
    }

    /// Dispatch a decoded request.
    pub fn dispatch(&self, request: &Request) -> Response {
        if let Err(violations) = validator::validate(request) {
            return Response::rejected(validator::join_reasons(&violations));
        }

        // Validation guarantees the method is present and recognized.
        let Some(method) = request.method() else {
            return Response::bad_request();
        };

        if method == Method::Echo {
            // Not resource-scoped; body presence was validated.
            return Response::ok_with(request.body.clone().unwrap_or_default());
        }

        let path = request.path.as_deref().unwrap_or_default();
        let parsed = match url::parse(path) {
            Ok(parsed) => parsed,
            Err(error) => {
                tracing::debug!(path, %error, "URL parse failed");
                return Response::bad_request();
            }
        };

        if parsed.resource_path() != CATEGORIES_PATH {
            return Response::not_found();
        }

        match method {
            Method::Read => self.handle_read(&parsed),
            Method::Create => self.handle_create(request.body.as_deref(), &parsed),
            Method::Update => self.handle_update(request.body.as_deref(), &parsed),
            Method::Delete => self.handle_delete(&parsed),
            // Echo returned above.
            Method::Echo => Response::bad_request(),
        }
    }

    fn handle_read(&self, url: &ParsedUrl) -> Response {
        match url.id() {
            None => self.encode_body(&self.store.all(), |json| Response::ok_with(json)),
            Some(raw_id) => {
                let Some(id) = parse_id(raw_id) else {
                    return Response::bad_request();
                };
                match self.store.get(id) {
                    Some(category) => self.encode_body(&category, |json| Response::ok_with(json)),
                    None => Response::not_found(),
                }
            }
        }
    }

    fn handle_create(&self, body: Option<&str>, url: &ParsedUrl) -> Response {
        if url.has_id() {
            // Ids are server-assigned; a create may not address one.
            return Response::bad_request();
        }
        let name = match category_payload(body) {
            Ok(name) => name,
            Err(error) => {
                tracing::debug!(?error, "Rejected create payload");
                return Response::bad_request();
            }
        };
        let category = self.store.create(name);
        tracing::info!(cid = category.id, name = %category.name, "Category created");
        self.encode_body(&category, |json| Response::created(json))
    }

    fn handle_update(&self, body: Option<&str>, url: &ParsedUrl) -> Response {
        let Some(id) = url.id().and_then(parse_id) else {
            return Response::bad_request();
        };
        let name = match category_payload(body) {
            Ok(name) => name,
            Err(error) => {
                tracing::debug!(?error, "Rejected update payload");
                return Response::bad_request();
            }
        };
        if self.store.update(id, name) {
            tracing::info!(cid = id, "Category updated");
            Response::updated()
        } else {
            Response::not_found()
        }
    }

    fn handle_delete(&self, url: &ParsedUrl) -> Response {
        let Some(id) = url.id().and_then(parse_id) else {
            return Response::bad_request();
        };
        if self.store.remove(id) {
            tracing::info!(cid = id, "Category deleted");
            Response::ok()
        } else {
            Response::not_found()
        }
    }

    /// Serialize a success body, mapping encoding failure to `6 Error`.
    fn encode_body<T, F>(&self, value: &T, into_response: F) -> Response
    where
        T: serde::Serialize,
        F: FnOnce(String) -> Response,
    {
        match serde_json::to_string(value) {
            Ok(json) => into_response(json),
            Err(error) => {
                tracing::error!(%error, "Failed to encode response body");
                Response::internal_error()
            }
        }
    }
}

/// Re-parse a digit-only id segment, rejecting numeric overflow.
fn parse_id(raw: &str) -> Option<CategoryId> {
    raw.parse::<CategoryId>().ok()
}

/// Body payload for `create` and `update`.
///
/// Extra fields (a caller-supplied `cid` in particular) are ignored:
/// ids are always server-assigned.
#[derive(Debug, Deserialize)]
struct CategoryPayload {
    name: String,
}

/// Why a create/update payload was rejected.
#[derive(Debug, PartialEq, Eq)]
enum PayloadError {
    /// Not JSON, or JSON without a string `name`.
    Malformed,
    /// Right shape, but the name is empty.
    EmptyName,
}

fn category_payload(body: Option<&str>) -> Result<String, PayloadError> {
    let body = body.ok_or(PayloadError::Malformed)?;
    let payload: CategoryPayload =
        serde_json::from_str(body).map_err(|_| PayloadError::Malformed)?;
    if payload.name.is_empty() {
        return Err(PayloadError::EmptyName);
    }
    Ok(payload.name)
}
