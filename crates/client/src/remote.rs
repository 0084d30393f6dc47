//! HTTP implementation of the document-store boundary.

use std::sync::mpsc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio_stream::StreamExt;

use tally_core::{ItemName, Quantity};
use tally_store::{
    AdjustOutcome, CollectionSnapshot, DocumentStore, ItemDocument, StoreError, StoreResult,
    Subscription,
};

use crate::sse::EventParser;

#[derive(Debug, Deserialize)]
struct DocumentResponse {
    quantity: Quantity,
}

/// Document store backed by a running `tally-api`.
///
/// Every operation is one HTTP round-trip; nothing is retried.
/// `subscribe` opens a dedicated SSE connection per subscription: a
/// spawned task forwards parsed snapshots into the subscription channel
/// and exits (closing the connection) once the subscriber is dropped.
#[derive(Debug, Clone)]
pub struct RemoteDocumentStore {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteDocumentStore {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    fn doc_url(&self) -> String {
        format!("{}/inventory/doc", self.base_url)
    }

    fn network(err: reqwest::Error) -> StoreError {
        StoreError::Network(err.to_string())
    }

    fn decode(err: reqwest::Error) -> StoreError {
        StoreError::Serialization(err.to_string())
    }

    /// Turn a non-success response into [`StoreError::Api`].
    async fn check(response: reqwest::Response) -> StoreResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(StoreError::Api(status.as_u16(), body))
    }
}

#[async_trait]
impl DocumentStore for RemoteDocumentStore {
    async fn read(&self, name: &ItemName) -> StoreResult<Option<ItemDocument>> {
        let response = self
            .client
            .get(self.doc_url())
            .query(&[("name", name.as_str())])
            .send()
            .await
            .map_err(Self::network)?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = Self::check(response).await?;
        let body: DocumentResponse = response.json().await.map_err(Self::decode)?;
        Ok(Some(ItemDocument::new(body.quantity)))
    }

    async fn write(&self, name: &ItemName, document: ItemDocument) -> StoreResult<()> {
        let response = self
            .client
            .put(self.doc_url())
            .query(&[("name", name.as_str())])
            .json(&document)
            .send()
            .await
            .map_err(Self::network)?;

        Self::check(response).await?;
        Ok(())
    }

    async fn delete(&self, name: &ItemName) -> StoreResult<()> {
        let response = self
            .client
            .delete(self.doc_url())
            .query(&[("name", name.as_str())])
            .send()
            .await
            .map_err(Self::network)?;

        Self::check(response).await?;
        Ok(())
    }

    async fn adjust(&self, name: &ItemName, delta: i64) -> StoreResult<AdjustOutcome> {
        let response = self
            .client
            .post(format!("{}/inventory/adjust", self.base_url))
            .json(&serde_json::json!({"name": name.as_str(), "delta": delta}))
            .send()
            .await
            .map_err(Self::network)?;

        let response = Self::check(response).await?;
        response.json().await.map_err(Self::decode)
    }

    async fn list(&self) -> StoreResult<CollectionSnapshot> {
        let response = self
            .client
            .get(format!("{}/inventory", self.base_url))
            .send()
            .await
            .map_err(Self::network)?;

        let response = Self::check(response).await?;
        response.json().await.map_err(Self::decode)
    }

    async fn subscribe(&self) -> StoreResult<Subscription<CollectionSnapshot>> {
        let response = self
            .client
            .get(format!("{}/inventory/stream", self.base_url))
            .send()
            .await
            .map_err(Self::network)?;
        let response = Self::check(response).await?;

        let (tx, rx) = mpsc::channel();
        tokio::spawn(forward_snapshots(response, tx));

        Ok(Subscription::new(rx))
    }
}

/// Pump the SSE body into the subscription channel until either side ends.
async fn forward_snapshots(response: reqwest::Response, tx: mpsc::Sender<CollectionSnapshot>) {
    let mut stream = response.bytes_stream();
    let mut parser = EventParser::new();

    while let Some(chunk) = stream.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(e) => {
                tracing::warn!("snapshot stream failed: {e}");
                break;
            }
        };

        for event in parser.feed(&chunk) {
            if event.name.as_deref() != Some("snapshot") {
                continue;
            }

            match serde_json::from_str::<CollectionSnapshot>(&event.data) {
                Ok(snapshot) => {
                    if tx.send(snapshot).is_err() {
                        // Subscriber dropped; closing the connection is the
                        // cancellation.
                        return;
                    }
                }
                Err(e) => tracing::warn!("undecodable snapshot event: {e}"),
            }
        }
    }

    tracing::debug!("snapshot stream ended");
}
