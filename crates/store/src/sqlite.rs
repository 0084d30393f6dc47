//! SQLite-backed document store (feature `sqlite`).

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};

use tally_core::{ItemName, ItemRecord, Quantity};

use crate::document::ItemDocument;
use crate::publish::SnapshotPublisher;
use crate::snapshot::CollectionSnapshot;
use crate::subscription::Subscription;
use crate::r#trait::{resolve_adjust, AdjustOutcome, DocumentStore, StoreError, StoreResult};

/// Durable collection in a single SQLite table.
///
/// Same contract as the in-memory store; `adjust` runs its
/// read-resolve-write inside one transaction.
#[derive(Debug)]
pub struct SqliteDocumentStore {
    pool: SqlitePool,
    publisher: SnapshotPublisher,
}

impl SqliteDocumentStore {
    /// Open (creating if missing) the collection database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true);

        // One connection: SQLite has a single writer anyway, and this
        // keeps `:memory:` databases coherent across calls.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(Self::backend)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS inventory (
                name     TEXT PRIMARY KEY,
                quantity INTEGER NOT NULL CHECK (quantity >= 1)
            )
            "#,
        )
        .execute(&pool)
        .await
        .map_err(Self::backend)?;

        Ok(Self {
            pool,
            publisher: SnapshotPublisher::new(),
        })
    }

    fn backend(err: sqlx::Error) -> StoreError {
        StoreError::Backend(err.to_string())
    }

    fn quantity_from_row(row: &SqliteRow) -> StoreResult<Quantity> {
        let raw: i64 = row
            .try_get("quantity")
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let raw = u64::try_from(raw).map_err(|_| {
            StoreError::Serialization(format!("stored quantity out of range: {raw}"))
        })?;
        Quantity::new(raw).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn quantity_to_column(quantity: Quantity) -> StoreResult<i64> {
        i64::try_from(quantity.get())
            .map_err(|_| StoreError::Serialization("quantity exceeds storage range".to_string()))
    }

    async fn snapshot(&self) -> StoreResult<CollectionSnapshot> {
        let rows = sqlx::query("SELECT name, quantity FROM inventory ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(Self::backend)?;

        let mut items = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row
                .try_get("name")
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            items.push(ItemRecord::new(name, Self::quantity_from_row(row)?));
        }

        Ok(CollectionSnapshot::new(items))
    }

    async fn publish_current(&self) -> StoreResult<()> {
        let snapshot = self.snapshot().await?;
        self.publisher.publish(snapshot);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for SqliteDocumentStore {
    async fn read(&self, name: &ItemName) -> StoreResult<Option<ItemDocument>> {
        let row = sqlx::query("SELECT quantity FROM inventory WHERE name = ?1")
            .bind(name.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::backend)?;

        match row {
            Some(row) => Ok(Some(ItemDocument::new(Self::quantity_from_row(&row)?))),
            None => Ok(None),
        }
    }

    async fn write(&self, name: &ItemName, document: ItemDocument) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO inventory (name, quantity) VALUES (?1, ?2)
            ON CONFLICT(name) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(name.as_str())
        .bind(Self::quantity_to_column(document.quantity)?)
        .execute(&self.pool)
        .await
        .map_err(Self::backend)?;

        tracing::debug!(name = %name, quantity = %document.quantity, "wrote document");
        self.publish_current().await
    }

    async fn delete(&self, name: &ItemName) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM inventory WHERE name = ?1")
            .bind(name.as_str())
            .execute(&self.pool)
            .await
            .map_err(Self::backend)?;

        if result.rows_affected() == 0 {
            // Absent: nothing changed, nothing to notify.
            return Ok(());
        }

        tracing::debug!(name = %name, "deleted document");
        self.publish_current().await
    }

    async fn adjust(&self, name: &ItemName, delta: i64) -> StoreResult<AdjustOutcome> {
        let mut tx = self.pool.begin().await.map_err(Self::backend)?;

        let row = sqlx::query("SELECT quantity FROM inventory WHERE name = ?1")
            .bind(name.as_str())
            .fetch_optional(&mut *tx)
            .await
            .map_err(Self::backend)?;

        let current = match &row {
            Some(row) => Some(Self::quantity_from_row(row)?),
            None => None,
        };

        let outcome = resolve_adjust(current, delta);
        match outcome {
            AdjustOutcome::Created(q) | AdjustOutcome::Updated(q) => {
                sqlx::query(
                    r#"
                    INSERT INTO inventory (name, quantity) VALUES (?1, ?2)
                    ON CONFLICT(name) DO UPDATE SET quantity = excluded.quantity
                    "#,
                )
                .bind(name.as_str())
                .bind(Self::quantity_to_column(q)?)
                .execute(&mut *tx)
                .await
                .map_err(Self::backend)?;
            }
            AdjustOutcome::Removed => {
                sqlx::query("DELETE FROM inventory WHERE name = ?1")
                    .bind(name.as_str())
                    .execute(&mut *tx)
                    .await
                    .map_err(Self::backend)?;
            }
            AdjustOutcome::Absent => {}
        }

        tx.commit().await.map_err(Self::backend)?;

        tracing::debug!(name = %name, delta, ?outcome, "adjusted document");
        if outcome.changed() {
            self.publish_current().await?;
        }

        Ok(outcome)
    }

    async fn list(&self) -> StoreResult<CollectionSnapshot> {
        self.snapshot().await
    }

    async fn subscribe(&self) -> StoreResult<Subscription<CollectionSnapshot>> {
        let initial = self.snapshot().await?;
        Ok(self.publisher.register(initial))
    }
}
