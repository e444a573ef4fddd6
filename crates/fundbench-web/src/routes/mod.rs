//! HTTP handlers, one module per resource.

pub mod catalog;
pub mod compare;
pub mod index_data;

use axum::Json;
use serde_json::{json, Value};

pub use catalog::{list_funds, list_indices, search_funds};
pub use compare::compare;
pub use index_data::index_data;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Treat a blank query parameter the same as a missing one.
pub(crate) fn present(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
