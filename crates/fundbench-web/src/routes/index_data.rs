use axum::extract::{Query, State};
use axum::Json;
use fundbench_core::{format_iso_date, DateRange, Symbol};
use serde::{Deserialize, Serialize};
use tracing::{error, instrument};

use super::present;
use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IndexDataQuery {
    pub symbol: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// One raw daily close, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexPoint {
    pub date: String,
    pub close: f64,
}

/// Single-series passthrough for one index symbol; no alignment.
#[instrument(skip(state))]
pub async fn index_data(
    State(state): State<AppState>,
    Query(params): Query<IndexDataQuery>,
) -> Result<Json<Vec<IndexPoint>>, ApiError> {
    let (Some(symbol), Some(start_date), Some(end_date)) = (
        present(params.symbol),
        present(params.start_date),
        present(params.end_date),
    ) else {
        return Err(ApiError::bad_request("Missing required parameters"));
    };

    let symbol = Symbol::parse(&symbol)?;
    let range = DateRange::parse(start_date.trim(), end_date.trim())?;

    let series = state
        .service
        .indices()
        .close_series(&symbol, range)
        .await
        .map_err(|e| {
            error!(%symbol, error = %e, "index fetch failed");
            ApiError::upstream(&format!("index data for {symbol}"), &e)
        })?
        .ok_or_else(|| ApiError::not_found("No data available for the specified range"))?;

    Ok(Json(
        series
            .iter()
            .map(|(date, close)| IndexPoint {
                date: format_iso_date(date),
                close,
            })
            .collect(),
    ))
}
