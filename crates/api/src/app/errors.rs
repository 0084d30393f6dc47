//! Consistent JSON error responses.

use axum::{http::StatusCode, response::IntoResponse, Json};

use tally_store::StoreError;

pub fn json_error(
    status: StatusCode,
    code: &str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        Json(serde_json::json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Backend(msg) => json_error(StatusCode::INTERNAL_SERVER_ERROR, "backend", msg),
        StoreError::Serialization(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "serialization", msg)
        }
        StoreError::Network(msg) => json_error(StatusCode::BAD_GATEWAY, "network", msg),
        StoreError::Api(status, msg) => {
            json_error(StatusCode::BAD_GATEWAY, "upstream", format!("{status}: {msg}"))
        }
    }
}
