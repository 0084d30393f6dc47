use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use tally_core::ItemName;
use tally_store::ItemDocument;

use crate::app::services::{self, AppServices};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_collection))
        .route("/stream", get(stream_snapshots))
        .route(
            "/doc",
            get(read_document).put(write_document).delete(delete_document),
        )
        .route("/adjust", post(adjust_document))
}

/// GET /inventory: the full collection as one snapshot.
pub async fn list_collection(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.store().list().await {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// GET /inventory/stream: SSE stream of collection snapshots.
pub async fn stream_snapshots(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    services::snapshot_sse_stream(services).await
}

/// GET /inventory/doc?name=: a single document, or 404.
pub async fn read_document(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DocQuery>,
) -> axum::response::Response {
    let name = ItemName::new(query.name);

    match services.store().read(&name).await {
        Ok(Some(document)) => {
            (StatusCode::OK, Json(dto::document_to_json(&name, document))).into_response()
        }
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "no such document"),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// PUT /inventory/doc?name=: full-replace write of one document.
pub async fn write_document(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DocQuery>,
    Json(document): Json<ItemDocument>,
) -> axum::response::Response {
    let name = ItemName::new(query.name);

    match services.store().write(&name, document).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// DELETE /inventory/doc?name=: delete; 204 whether or not it existed.
pub async fn delete_document(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::DocQuery>,
) -> axum::response::Response {
    let name = ItemName::new(query.name);

    match services.store().delete(&name).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}

/// POST /inventory/adjust: atomic counter adjustment.
pub async fn adjust_document(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::AdjustRequest>,
) -> axum::response::Response {
    let name = ItemName::new(body.name);

    match services.store().adjust(&name, body.delta).await {
        Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
        Err(e) => errors::store_error_to_response(e),
    }
}
