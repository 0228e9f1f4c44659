//! The in-memory item catalog and its mutation step.
//!
//! The store owns an ordered list of items (insertion order is display
//! order). The catalog is fixed at construction; there are no add or
//! remove operations, so item count, ids and names are stable for the
//! lifetime of the process.

use super::types::Item;
use rand::Rng;

/// The mutable item catalog.
///
/// This struct should be wrapped in [`super::SharedItemStore`] for
/// thread-safe access from multiple tasks (mutation loop, HTTP
/// handlers, WebSocket connects).
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: Vec<Item>,
}

impl ItemStore {
    /// Creates a store with the given catalog.
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Returns a copy of all items, in display order.
    pub fn snapshot(&self) -> Vec<Item> {
        self.items.clone()
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies one random mutation: picks an item uniformly at random
    /// and adds a delta drawn from {-1, 0, +1} to its price.
    ///
    /// Returns the resulting snapshot. Prices are deliberately not
    /// clamped, matching the observable behavior of the demo.
    pub fn mutate_one(&mut self) -> Vec<Item> {
        let mut rng = rand::thread_rng();
        let index = rng.gen_range(0..self.items.len());
        let delta = rng.gen_range(-1..=1);
        self.apply_delta(index, delta)
    }

    /// Applies a specific price delta to the item at `index` and
    /// returns the resulting snapshot.
    ///
    /// This is the deterministic inner step of [`Self::mutate_one`];
    /// it is also what tests drive directly.
    pub fn apply_delta(&mut self, index: usize, delta: i64) -> Vec<Item> {
        if let Some(item) = self.items.get_mut(index) {
            item.price += delta;
        }
        self.snapshot()
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new(super::types::seed_items())
    }
}
