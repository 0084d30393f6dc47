//! The document-store contract.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tally_core::{ItemName, Quantity};

use crate::document::ItemDocument;
use crate::snapshot::CollectionSnapshot;
use crate::subscription::Subscription;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Store operation error.
///
/// Infrastructure failures only; domain rules live in `tally-core`.
/// Nothing here is retried by the store or its callers; failures
/// propagate to whatever generic error channel the caller has.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing storage failed (lock poisoning, database error).
    #[error("backend failure: {0}")]
    Backend(String),

    /// A network round-trip failed before a response arrived.
    #[error("network error: {0}")]
    Network(String),

    /// The remote service answered with a non-success status.
    #[error("api error ({0}): {1}")]
    Api(u16, String),

    /// A payload could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// What a [`DocumentStore::adjust`] call did to the addressed document.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "quantity", rename_all = "snake_case")]
pub enum AdjustOutcome {
    /// The document did not exist; it was created with this quantity.
    Created(Quantity),
    /// The document existed; its quantity is now this.
    Updated(Quantity),
    /// The adjustment took the quantity below 1; the document was deleted.
    Removed,
    /// The document did not exist and a non-positive delta leaves the
    /// collection untouched.
    Absent,
}

impl AdjustOutcome {
    /// Whether the collection changed (and a snapshot must be published).
    pub fn changed(&self) -> bool {
        !matches!(self, AdjustOutcome::Absent)
    }

    /// The quantity now stored, if the document still exists.
    pub fn quantity(&self) -> Option<Quantity> {
        match self {
            AdjustOutcome::Created(q) | AdjustOutcome::Updated(q) => Some(*q),
            AdjustOutcome::Removed | AdjustOutcome::Absent => None,
        }
    }
}

/// Decide the outcome of adjusting `current` by `delta`.
///
/// This is the whole upsert-with-delta rule in one place: create on first
/// positive adjustment, delete when the count would fall below 1, no-op
/// on a missing document otherwise. Backends run it under their own
/// atomicity guarantee (write lock, transaction, or server side), which
/// is what makes two racing adjustments both count.
pub fn resolve_adjust(current: Option<Quantity>, delta: i64) -> AdjustOutcome {
    let base = current.map(|q| q.get() as i128).unwrap_or(0);
    // Saturate far above any plausible count rather than wrap.
    let next = (base + delta as i128).min(u64::MAX as i128);
    let next = u64::try_from(next).ok().and_then(|n| Quantity::new(n).ok());

    match (current, next) {
        (None, Some(q)) => AdjustOutcome::Created(q),
        (Some(_), Some(q)) => AdjustOutcome::Updated(q),
        (Some(_), None) => AdjustOutcome::Removed,
        (None, None) => AdjustOutcome::Absent,
    }
}

/// A document collection with push-based change notification.
///
/// Three families of operations are exposed:
///
/// - Plain document access (`read` / `write` / `delete`): non-transactional,
///   last-writer-wins, no optimistic-concurrency tokens. `delete` on a
///   missing document is a silent no-op.
/// - `adjust`: a single atomic upsert-with-delta for counter changes. Two
///   concurrent adjustments of the same name are both applied; this is the
///   only operation that serializes concurrent writers.
/// - `list` / `subscribe`: full-collection reads. A subscription delivers
///   the current contents immediately, then one fresh snapshot after every
///   collection change; no snapshot is emitted for operations that change
///   nothing. Dropping the subscription cancels it.
///
/// Every operation suspends the caller for the backing round-trip; none of
/// them block the executor.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read a single document by name.
    async fn read(&self, name: &ItemName) -> StoreResult<Option<ItemDocument>>;

    /// Write a document (full replace, creating it if absent).
    async fn write(&self, name: &ItemName, document: ItemDocument) -> StoreResult<()>;

    /// Delete a document by name; silently succeeds when absent.
    async fn delete(&self, name: &ItemName) -> StoreResult<()>;

    /// Atomically adjust the quantity stored under `name` by `delta`.
    ///
    /// See [`resolve_adjust`] for the exact create/update/delete rule.
    async fn adjust(&self, name: &ItemName, delta: i64) -> StoreResult<AdjustOutcome>;

    /// List the full collection.
    async fn list(&self) -> StoreResult<CollectionSnapshot>;

    /// Open a standing subscription to collection snapshots.
    async fn subscribe(&self) -> StoreResult<Subscription<CollectionSnapshot>>;
}

#[async_trait]
impl<S> DocumentStore for Arc<S>
where
    S: DocumentStore + ?Sized,
{
    async fn read(&self, name: &ItemName) -> StoreResult<Option<ItemDocument>> {
        (**self).read(name).await
    }

    async fn write(&self, name: &ItemName, document: ItemDocument) -> StoreResult<()> {
        (**self).write(name, document).await
    }

    async fn delete(&self, name: &ItemName) -> StoreResult<()> {
        (**self).delete(name).await
    }

    async fn adjust(&self, name: &ItemName, delta: i64) -> StoreResult<AdjustOutcome> {
        (**self).adjust(name, delta).await
    }

    async fn list(&self) -> StoreResult<CollectionSnapshot> {
        (**self).list().await
    }

    async fn subscribe(&self) -> StoreResult<Subscription<CollectionSnapshot>> {
        (**self).subscribe().await
    }
}
