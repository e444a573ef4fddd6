use axum::extract::{Query, State};
use axum::Json;
use fundbench_core::FundEntry;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, instrument};

use super::present;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub q: Option<String>,
}

pub async fn list_funds(State(state): State<AppState>) -> Json<Vec<FundEntry>> {
    Json(state.catalog.funds().to_vec())
}

pub async fn list_indices(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(
        state
            .catalog
            .index_names()
            .into_iter()
            .map(String::from)
            .collect(),
    )
}

/// Scheme search passthrough. A blank query answers `[]` without going upstream.
#[instrument(skip(state))]
pub async fn search_funds(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Value>, ApiError> {
    let Some(query) = present(params.q) else {
        return Ok(Json(Value::Array(Vec::new())));
    };

    state
        .service
        .funds()
        .search(query.trim())
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, provider = %e.provider(), "fund search failed");
            ApiError::upstream("search results", &e)
        })
}
