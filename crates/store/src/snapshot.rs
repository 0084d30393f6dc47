//! Full-collection snapshots, the unit of change notification.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_core::{ItemName, ItemRecord};

/// A point-in-time listing of every document in the collection.
///
/// Subscribers receive one of these per collection change and replace any
/// prior view of the data wholesale; there is no incremental delta format.
/// Item order carries no meaning.
///
/// `snapshot_id` and `emitted_at` identify the notification itself (for
/// tracing the stream); they carry no ordering or merge semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSnapshot {
    snapshot_id: Uuid,
    emitted_at: DateTime<Utc>,
    items: Vec<ItemRecord>,
}

impl CollectionSnapshot {
    pub fn new(items: Vec<ItemRecord>) -> Self {
        Self {
            snapshot_id: Uuid::now_v7(),
            emitted_at: Utc::now(),
            items,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn snapshot_id(&self) -> Uuid {
        self.snapshot_id
    }

    pub fn emitted_at(&self) -> DateTime<Utc> {
        self.emitted_at
    }

    pub fn items(&self) -> &[ItemRecord] {
        &self.items
    }

    pub fn into_items(self) -> Vec<ItemRecord> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a single record by name.
    pub fn get(&self, name: &ItemName) -> Option<&ItemRecord> {
        self.items.iter().find(|r| &r.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::Quantity;

    #[test]
    fn lookup_by_name_is_literal() {
        let snapshot = CollectionSnapshot::new(vec![
            ItemRecord::new("apple", Quantity::ONE),
            ItemRecord::new("Apple", Quantity::new(2).unwrap()),
        ]);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get(&ItemName::new("Apple")).map(|r| r.quantity),
            Some(Quantity::new(2).unwrap())
        );
        assert!(snapshot.get(&ItemName::new("APPLE")).is_none());
    }

    #[test]
    fn snapshots_round_trip_as_json() {
        let snapshot = CollectionSnapshot::new(vec![ItemRecord::new("widget", Quantity::ONE)]);
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: CollectionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snapshot);
    }
}
