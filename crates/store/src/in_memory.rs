//! In-memory document store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use tally_core::{ItemName, ItemRecord};

use crate::document::ItemDocument;
use crate::publish::SnapshotPublisher;
use crate::snapshot::CollectionSnapshot;
use crate::subscription::Subscription;
use crate::r#trait::{resolve_adjust, AdjustOutcome, DocumentStore, StoreError, StoreResult};

/// In-memory collection with snapshot fan-out.
///
/// Default backend for the API service and for tests. Not optimized for
/// large collections: every change re-lists the whole collection, which
/// is exactly the snapshot contract.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: RwLock<HashMap<ItemName, ItemDocument>>,
    publisher: SnapshotPublisher,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Backend("lock poisoned".to_string())
    }

    fn snapshot_of(documents: &HashMap<ItemName, ItemDocument>) -> CollectionSnapshot {
        let mut items: Vec<ItemRecord> = documents
            .iter()
            .map(|(name, doc)| ItemRecord::new(name.clone(), doc.quantity))
            .collect();

        // Stable listing order for consumers; the contract promises none.
        items.sort_by(|a, b| a.name.cmp(&b.name));

        CollectionSnapshot::new(items)
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn read(&self, name: &ItemName) -> StoreResult<Option<ItemDocument>> {
        let documents = self.documents.read().map_err(|_| Self::poisoned())?;
        Ok(documents.get(name).copied())
    }

    async fn write(&self, name: &ItemName, document: ItemDocument) -> StoreResult<()> {
        let mut documents = self.documents.write().map_err(|_| Self::poisoned())?;
        documents.insert(name.clone(), document);

        // Publish while still holding the write lock: snapshots reach
        // subscribers in mutation order.
        self.publisher.publish(Self::snapshot_of(&documents));
        drop(documents);

        tracing::debug!(name = %name, quantity = %document.quantity, "wrote document");
        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> StoreResult<()> {
        let mut documents = self.documents.write().map_err(|_| Self::poisoned())?;
        if documents.remove(name).is_none() {
            // Absent: nothing changed, nothing to notify.
            return Ok(());
        }

        self.publisher.publish(Self::snapshot_of(&documents));
        drop(documents);

        tracing::debug!(name = %name, "deleted document");
        Ok(())
    }

    async fn adjust(&self, name: &ItemName, delta: i64) -> StoreResult<AdjustOutcome> {
        // Resolve and apply under one write lock: racing adjustments
        // serialize here instead of losing increments.
        let mut documents = self.documents.write().map_err(|_| Self::poisoned())?;

        let current = documents.get(name).map(|doc| doc.quantity);
        let outcome = resolve_adjust(current, delta);

        match outcome {
            AdjustOutcome::Created(q) | AdjustOutcome::Updated(q) => {
                documents.insert(name.clone(), ItemDocument::new(q));
            }
            AdjustOutcome::Removed => {
                documents.remove(name);
            }
            AdjustOutcome::Absent => {}
        }

        if outcome.changed() {
            self.publisher.publish(Self::snapshot_of(&documents));
        }
        drop(documents);

        tracing::debug!(name = %name, delta, ?outcome, "adjusted document");
        Ok(outcome)
    }

    async fn list(&self) -> StoreResult<CollectionSnapshot> {
        let documents = self.documents.read().map_err(|_| Self::poisoned())?;
        Ok(Self::snapshot_of(&documents))
    }

    async fn subscribe(&self) -> StoreResult<Subscription<CollectionSnapshot>> {
        // Register under the read lock so the initial snapshot and the
        // first published change cannot arrive out of order.
        let documents = self.documents.read().map_err(|_| Self::poisoned())?;
        Ok(self.publisher.register(Self::snapshot_of(&documents)))
    }
}
