//! The live inventory view: a stateless projection over snapshots.

use std::sync::mpsc::{RecvError, RecvTimeoutError, TryRecvError};
use std::time::Duration;

use tally_store::{CollectionSnapshot, DocumentStore, StoreResult, Subscription};

/// One renderable line of the inventory list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    /// The stored key, untouched.
    pub name: String,
    /// Display form: first character uppercased, remainder as stored.
    pub label: String,
    pub quantity: u64,
}

/// Capitalize the first character for display. Storage never sees this.
pub fn display_label(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Project a snapshot into the full row list, wholesale.
///
/// Pure fold over the latest snapshot: no local state survives from one
/// projection to the next, and row order is whatever order the snapshot
/// delivered.
pub fn project(snapshot: &CollectionSnapshot) -> Vec<ItemRow> {
    snapshot
        .items()
        .iter()
        .map(|record| ItemRow {
            name: record.name.as_str().to_string(),
            label: display_label(record.name.as_str()),
            quantity: record.quantity.get(),
        })
        .collect()
}

/// A standing view over the collection.
///
/// Owns the store subscription; every received snapshot is projected
/// into a fresh row list that replaces whatever the caller held before.
/// Dropping the view cancels the subscription; the store prunes the
/// dead subscriber on its next publish. A disconnected stream surfaces
/// as the corresponding receive error and is not otherwise handled.
#[derive(Debug)]
pub struct LiveInventoryView {
    subscription: Subscription<CollectionSnapshot>,
}

impl LiveInventoryView {
    /// Subscribe to `store`. The first receive yields the current
    /// contents; each subsequent one follows a collection change.
    pub async fn attach<S>(store: &S) -> StoreResult<Self>
    where
        S: DocumentStore,
    {
        let subscription = store.subscribe().await?;
        tracing::debug!("inventory view attached");
        Ok(Self { subscription })
    }

    /// Block until the next snapshot and project it.
    pub fn recv(&self) -> Result<Vec<ItemRow>, RecvError> {
        self.subscription.recv().map(|s| project(&s))
    }

    /// Project the next snapshot if one is already queued.
    pub fn try_recv(&self) -> Result<Vec<ItemRow>, TryRecvError> {
        self.subscription.try_recv().map(|s| project(&s))
    }

    /// Block up to `timeout` for the next snapshot.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Vec<ItemRow>, RecvTimeoutError> {
        self.subscription.recv_timeout(timeout).map(|s| project(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::{ItemName, ItemRecord, Quantity};
    use tally_store::{InMemoryDocumentStore, ItemDocument};

    fn snapshot(entries: &[(&str, u64)]) -> CollectionSnapshot {
        CollectionSnapshot::new(
            entries
                .iter()
                .map(|(name, q)| ItemRecord::new(*name, Quantity::new(*q).unwrap()))
                .collect(),
        )
    }

    #[test]
    fn labels_capitalize_only_the_first_character() {
        assert_eq!(display_label("apple pie"), "Apple pie");
        assert_eq!(display_label("Apple"), "Apple");
        assert_eq!(display_label(""), "");
        // Unicode uppercasing may expand to several characters.
        assert_eq!(display_label("æble"), "Æble");
    }

    #[test]
    fn projection_preserves_snapshot_order() {
        let rows = project(&snapshot(&[("zebra", 3), ("apple", 1)]));

        assert_eq!(
            rows,
            vec![
                ItemRow {
                    name: "zebra".to_string(),
                    label: "Zebra".to_string(),
                    quantity: 3
                },
                ItemRow {
                    name: "apple".to_string(),
                    label: "Apple".to_string(),
                    quantity: 1
                },
            ]
        );
    }

    #[test]
    fn projection_replaces_rather_than_merges() {
        let first = project(&snapshot(&[("apple", 1), ("pear", 2)]));
        assert_eq!(first.len(), 2);

        // The next snapshot no longer contains "pear"; projecting it
        // yields a list without any trace of the previous one.
        let second = project(&snapshot(&[("apple", 2)]));
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name, "apple");
        assert_eq!(second[0].quantity, 2);
    }

    #[tokio::test]
    async fn view_follows_store_changes() {
        let store = InMemoryDocumentStore::new();
        store
            .write(&ItemName::new("seed"), ItemDocument::single())
            .await
            .unwrap();

        let view = LiveInventoryView::attach(&store).await.unwrap();

        let initial = view.try_recv().unwrap();
        assert_eq!(initial.len(), 1);
        assert_eq!(initial[0].label, "Seed");

        store.adjust(&ItemName::new("seed"), 1).await.unwrap();
        let updated = view.try_recv().unwrap();
        assert_eq!(updated[0].quantity, 2);

        store.adjust(&ItemName::new("seed"), -2).await.unwrap();
        assert!(view.try_recv().unwrap().is_empty());
    }
}
