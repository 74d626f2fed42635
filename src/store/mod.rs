//! Record storage subsystem.
//!
//! One collection, shared by every connection handler behind an `Arc`,
//! internally synchronized so that writes are serialized and id
//! assignment is atomic.

pub mod categories;

pub use categories::{Category, CategoryId, CategoryStore};
