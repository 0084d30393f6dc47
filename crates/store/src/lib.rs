//! `tally-store` — the document-store boundary.
//!
//! A collection of uniquely-named documents, each holding a quantity, with
//! push-based change notification: every mutation publishes a fresh
//! full-collection snapshot to all subscribers. The [`DocumentStore`] trait
//! makes no transport assumptions; this crate ships an in-memory
//! implementation (tests/dev and the default API backend) and, behind the
//! `sqlite` feature, a durable SQLite-backed one.

pub mod document;
pub mod in_memory;
pub mod publish;
pub mod snapshot;
pub mod subscription;
pub mod r#trait;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use document::ItemDocument;
pub use in_memory::InMemoryDocumentStore;
pub use publish::SnapshotPublisher;
pub use snapshot::CollectionSnapshot;
pub use subscription::Subscription;
pub use r#trait::{resolve_adjust, AdjustOutcome, DocumentStore, StoreError, StoreResult};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteDocumentStore;
