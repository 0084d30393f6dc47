//! The (name, quantity) pair as it appears in collection snapshots.

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::name::ItemName;
use crate::quantity::Quantity;

/// One item as listed by a collection snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRecord {
    pub name: ItemName,
    pub quantity: Quantity,
}

impl ItemRecord {
    pub fn new(name: impl Into<ItemName>, quantity: Quantity) -> Self {
        Self {
            name: name.into(),
            quantity,
        }
    }
}

impl Entity for ItemRecord {
    type Id = ItemName;

    fn id(&self) -> &Self::Id {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_is_the_name() {
        let record = ItemRecord::new("apple", Quantity::ONE);
        assert_eq!(record.id(), &ItemName::new("apple"));
    }

    #[test]
    fn wire_format_carries_name_and_quantity() {
        let record = ItemRecord::new("apple", Quantity::new(2).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, serde_json::json!({"name": "apple", "quantity": 2}));
    }
}
