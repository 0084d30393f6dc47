use serde::Deserialize;

use tally_core::ItemName;
use tally_store::ItemDocument;

// -------------------------
// Request DTOs
// -------------------------

/// Document addressing for `/inventory/doc`.
///
/// The name travels as a query parameter rather than a path segment so
/// that every legal key (spaces, slashes, the empty string) can be
/// addressed.
#[derive(Debug, Deserialize)]
pub struct DocQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct AdjustRequest {
    pub name: String,
    pub delta: i64,
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn document_to_json(name: &ItemName, document: ItemDocument) -> serde_json::Value {
    serde_json::json!({
        "name": name.as_str(),
        "quantity": document.quantity,
    })
}
