//! Core data types for the item catalog.

use serde::{Deserialize, Serialize};

/// One priced catalog entry.
///
/// `id` and `name` are fixed for the lifetime of the process; only
/// `price` changes, and it is unbounded in both directions (a long
/// enough run of negative deltas can push it below zero).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique, stable identifier.
    pub id: u32,
    /// Display label.
    pub name: String,
    /// Current price. May go negative.
    pub price: i64,
}

impl Item {
    /// Creates a new item.
    pub fn new(id: u32, name: impl Into<String>, price: i64) -> Self {
        Self {
            id,
            name: name.into(),
            price,
        }
    }
}

/// The fixed starting catalog: three items, in display order.
pub fn seed_items() -> Vec<Item> {
    vec![
        Item::new(1, "Item 1", 10),
        Item::new(2, "Item 2", 20),
        Item::new(3, "Item 3", 30),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_items_are_in_id_order() {
        let items = seed_items();
        assert_eq!(items.len(), 3);
        assert_eq!(
            items.iter().map(|i| i.id).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn test_item_json_shape() {
        let json = serde_json::to_value(Item::new(1, "Item 1", 10)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "Item 1", "price": 10})
        );
    }
}
