//! Fixed in-memory item store.
//!
//! The store is built once at startup and never mutated afterwards, so it can
//! be shared across handlers behind an `Arc` without any locking.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::StoreError;

/// A single item record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Item {
    /// Positive identifier, unique within the store.
    #[schema(example = 1, minimum = 1)]
    pub id: u64,
    /// Display name. Never empty.
    #[schema(example = "Item 1")]
    pub name: String,
    /// Free-form description. May be empty.
    #[schema(example = "This is item 1")]
    pub description: String,
}

impl Item {
    /// Create an item.
    pub fn new(id: u64, name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            description: description.into(),
        }
    }
}

static REFERENCE_ITEMS: Lazy<Vec<Item>> = Lazy::new(|| {
    vec![
        Item::new(1, "Item 1", "This is item 1"),
        Item::new(2, "Item 2", "This is item 2"),
        Item::new(3, "Item 3", "This is item 3"),
    ]
});

/// Ordered, read-only collection of items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Build a store, checking id and name invariants.
    pub fn new(items: Vec<Item>) -> Result<Self, StoreError> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if item.id == 0 {
                return Err(StoreError::ZeroId);
            }
            if !seen.insert(item.id) {
                return Err(StoreError::DuplicateId { id: item.id });
            }
            if item.name.is_empty() {
                return Err(StoreError::EmptyName { id: item.id });
            }
        }
        Ok(Self { items })
    }

    /// The three-item reference dataset served by default.
    pub fn reference() -> Result<Self, StoreError> {
        Self::new(REFERENCE_ITEMS.clone())
    }

    /// All items in store order.
    pub fn all(&self) -> &[Item] {
        &self.items
    }

    /// Look up an item by numeric id.
    pub fn get(&self, id: u64) -> Option<&Item> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Look up an item by its raw path segment.
    ///
    /// Segments that do not parse as an unsigned integer match nothing.
    pub fn find(&self, raw_id: &str) -> Option<&Item> {
        raw_id.parse::<u64>().ok().and_then(|id| self.get(id))
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
