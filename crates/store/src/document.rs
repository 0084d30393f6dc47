//! The unit of storage: a document keyed by item name.

use serde::{Deserialize, Serialize};

use tally_core::Quantity;

/// A document body as held by the collection: `{ "quantity": n }`.
///
/// The key (the item name) lives outside the body, exactly as the store
/// addresses documents. A body never carries a zero quantity; a count
/// reaching zero deletes the document instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDocument {
    pub quantity: Quantity,
}

impl ItemDocument {
    pub fn new(quantity: Quantity) -> Self {
        Self { quantity }
    }

    /// The body written when an item is first added.
    pub fn single() -> Self {
        Self {
            quantity: Quantity::ONE,
        }
    }
}
