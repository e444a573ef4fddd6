use axum::extract::{Query, State};
use axum::Json;
use fundbench_core::{CompareError, ComparisonPayload, ComparisonRequest};
use serde::Deserialize;
use tracing::{error, info, instrument};

use super::present;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub scheme_code: Option<String>,
    pub index_name: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

#[instrument(skip(state))]
pub async fn compare(
    State(state): State<AppState>,
    Query(params): Query<CompareQuery>,
) -> Result<Json<ComparisonPayload>, ApiError> {
    let (Some(scheme_code), Some(index_name), Some(start_date), Some(end_date)) = (
        present(params.scheme_code),
        present(params.index_name),
        present(params.start_date),
        present(params.end_date),
    ) else {
        return Err(ApiError::bad_request("Missing required parameters"));
    };

    let request = ComparisonRequest::resolve(
        &state.catalog,
        scheme_code.trim(),
        index_name.trim(),
        start_date.trim(),
        end_date.trim(),
    )?;

    match state.service.compare(&request).await {
        Ok(payload) => {
            info!(rows = payload.labels.len(), "comparison ready");
            Ok(Json(payload))
        }
        Err(e) => {
            if let CompareError::Upstream { target, source } = &e {
                error!(
                    %target,
                    error = %source,
                    provider = %source.provider(),
                    "upstream fetch failed"
                );
            }
            Err(e.into())
        }
    }
}
