//! Item storage module.
//!
//! Provides the in-memory item catalog and a thread-safe handle for
//! sharing it between the mutation loop and the HTTP server.

pub mod item_store;
pub mod types;

pub use item_store::*;
pub use types::*;

use std::sync::{Arc, RwLock};

/// Thread-safe handle to the item catalog.
///
/// The raw [`ItemStore`] is never exposed; all access goes through the
/// methods below, which take the lock for the duration of a single
/// read or write. A poisoned lock is recovered via `into_inner` so a
/// panicked writer cannot wedge the server.
#[derive(Debug, Clone)]
pub struct SharedItemStore {
    inner: Arc<RwLock<ItemStore>>,
}

impl SharedItemStore {
    /// Creates a shared store seeded with the standard demo catalog.
    pub fn with_seed_items() -> Self {
        Self::new(ItemStore::new(seed_items()))
    }

    /// Wraps an existing store.
    pub fn new(store: ItemStore) -> Self {
        Self {
            inner: Arc::new(RwLock::new(store)),
        }
    }

    /// Returns a consistent copy of all items at a single point in time.
    pub fn snapshot(&self) -> Vec<Item> {
        self.inner
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .snapshot()
    }

    /// Applies one random price mutation and returns the resulting snapshot.
    pub fn mutate_one(&self) -> Vec<Item> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .mutate_one()
    }

    /// Deterministic variant of [`Self::mutate_one`]: applies a
    /// specific delta to the item at `index`.
    pub fn apply_delta(&self, index: usize, delta: i64) -> Vec<Item> {
        self.inner
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .apply_delta(index, delta)
    }
}
