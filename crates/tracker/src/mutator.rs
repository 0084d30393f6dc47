//! Quantity mutation by item name.

use thiserror::Error;

use tally_core::ItemName;
use tally_store::{AdjustOutcome, DocumentStore, StoreError};

/// Result type for tracker operations.
pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),
}

/// Adjusts item counts in the collection, keyed by display name.
///
/// `add_item` and `remove_item` are each one atomic upsert-with-delta
/// against the store. Names are passed through untouched, the empty
/// string included, and nothing is retried. Callers driving a UI ignore
/// the returned outcome: the view learns about the change from the
/// store's snapshot stream, not from this return value.
#[derive(Debug)]
pub struct QuantityMutator<S> {
    store: S,
}

impl<S> QuantityMutator<S>
where
    S: DocumentStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Add one of `name`: creates the item at quantity 1, or increments.
    pub async fn add_item(&self, name: &ItemName) -> TrackerResult<AdjustOutcome> {
        let outcome = self.store.adjust(name, 1).await?;
        tracing::debug!(name = %name, ?outcome, "add_item");
        Ok(outcome)
    }

    /// Remove one of `name`: decrements, deletes at quantity 1, and
    /// silently does nothing for an unknown name.
    pub async fn remove_item(&self, name: &ItemName) -> TrackerResult<AdjustOutcome> {
        let outcome = self.store.adjust(name, -1).await?;
        tracing::debug!(name = %name, ?outcome, "remove_item");
        Ok(outcome)
    }
}
