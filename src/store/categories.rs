//! In-memory category store.
//!
//! # Responsibilities
//! - Own the category collection and id assignment
//! - Serialize writes; let concurrent reads proceed in parallel
//!
//! # Design Decisions
//! - Ids are server-assigned, monotonic, and never reused after deletion
//! - The store is passed around as an explicit `Arc` handle, never
//!   reached through globals

use std::sync::RwLock;

use serde::{Deserialize, Serialize};

/// Category identifier.
pub type CategoryId = u64;

/// A category record, serialized as `{"cid": .., "name": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "cid")]
    pub id: CategoryId,
    pub name: String,
}

struct Inner {
    categories: Vec<Category>,
    next_id: CategoryId,
}

/// Thread-safe category collection with server-assigned ids.
pub struct CategoryStore {
    inner: RwLock<Inner>,
}

impl CategoryStore {
    /// Creates a store seeded with the stock categories
    /// (Beverages, Condiments, Confections).
    pub fn new() -> Self {
        Self::with_seed(
            [(1, "Beverages"), (2, "Condiments"), (3, "Confections")]
                .into_iter()
                .map(|(id, name)| Category {
                    id,
                    name: name.to_string(),
                })
                .collect(),
        )
    }

    /// Creates a store from explicit seed records. The next assigned id
    /// is one past the highest seed id.
    pub fn with_seed(seed: Vec<Category>) -> Self {
        let next_id = seed.iter().map(|c| c.id).max().map_or(1, |max| max + 1);
        Self {
            inner: RwLock::new(Inner {
                categories: seed,
                next_id,
            }),
        }
    }

    /// All categories, in insertion order.
    pub fn all(&self) -> Vec<Category> {
        self.read().categories.clone()
    }

    /// Look up one category by id.
    pub fn get(&self, id: CategoryId) -> Option<Category> {
        self.read().categories.iter().find(|c| c.id == id).cloned()
    }

    /// Insert a new category under the next free id and return it.
    ///
    /// Id assignment and insertion happen under one write lock, so two
    /// concurrent creates can never share an id.
    pub fn create(&self, name: impl Into<String>) -> Category {
        let mut inner = self.write();
        let category = Category {
            id: inner.next_id,
            name: name.into(),
        };
        inner.next_id += 1;
        inner.categories.push(category.clone());
        category
    }

    /// Rename an existing category. Returns false on a lookup miss.
    pub fn update(&self, id: CategoryId, name: impl Into<String>) -> bool {
        let mut inner = self.write();
        match inner.categories.iter_mut().find(|c| c.id == id) {
            Some(category) => {
                category.name = name.into();
                true
            }
            None => false,
        }
    }

    /// Remove a category. Returns false on a lookup miss.
    /// The removed id is never reassigned.
    pub fn remove(&self, id: CategoryId) -> bool {
        let mut inner = self.write();
        let before = inner.categories.len();
        inner.categories.retain(|c| c.id != id);
        inner.categories.len() != before
    }

    /// Number of stored categories.
    pub fn len(&self) -> usize {
        self.read().categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().categories.is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Inner> {
        self.inner.read().expect("category store lock poisoned")
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Inner> {
        self.inner.write().expect("category store lock poisoned")
    }
}

impl Default for CategoryStore {
    fn default() -> Self {
        Self::new()
    }
}
