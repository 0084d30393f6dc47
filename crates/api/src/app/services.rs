//! Store backend selection and realtime bridging.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::Duration;

use axum::response::sse::{Event as SseEvent, KeepAlive, Sse};
use axum::response::IntoResponse;
use tokio::sync::mpsc::unbounded_channel;
use tokio_stream::wrappers::UnboundedReceiverStream;

use tally_store::{DocumentStore, InMemoryDocumentStore};

use crate::app::errors;

/// Shared handles for request handlers.
pub struct AppServices {
    store: Arc<dyn DocumentStore>,
}

impl AppServices {
    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(InMemoryDocumentStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }
}

/// Pick the store backend from the environment.
///
/// In-memory unless built with the `sqlite` feature and `TALLY_DB_PATH`
/// is set, in which case the collection is durable.
pub async fn build_services() -> AppServices {
    #[cfg(feature = "sqlite")]
    if let Ok(path) = std::env::var("TALLY_DB_PATH") {
        let store = tally_store::SqliteDocumentStore::open(&path)
            .await
            .unwrap_or_else(|e| panic!("failed to open database at {path}: {e}"));
        tracing::info!(path = %path, "using sqlite-backed collection");
        return AppServices::with_store(Arc::new(store));
    }

    tracing::info!("using in-memory collection");
    AppServices::in_memory()
}

/// GET /inventory/stream
///
/// Bridge a blocking store subscription into an SSE response: a spawned
/// blocking task forwards each snapshot into an unbounded channel, and
/// exits once the client side of the channel is gone. The subscription
/// itself is dropped with the task, which cancels it at the store.
pub async fn snapshot_sse_stream(services: Arc<AppServices>) -> axum::response::Response {
    let subscription = match services.store().subscribe().await {
        Ok(subscription) => subscription,
        Err(e) => return errors::store_error_to_response(e),
    };

    let (tx, rx) = unbounded_channel::<Result<SseEvent, Infallible>>();

    tokio::task::spawn_blocking(move || {
        loop {
            match subscription.recv_timeout(Duration::from_millis(1000)) {
                Ok(snapshot) => {
                    let event = match SseEvent::default().event("snapshot").json_data(&snapshot) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("failed to encode snapshot event: {e}");
                            continue;
                        }
                    };

                    if tx.send(Ok(event)).is_err() {
                        // Client disconnected.
                        break;
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    if tx.is_closed() {
                        break;
                    }
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
            }
        }

        tracing::debug!("snapshot stream closed");
    });

    Sse::new(UnboundedReceiverStream::new(rx))
        .keep_alive(KeepAlive::default())
        .into_response()
}
