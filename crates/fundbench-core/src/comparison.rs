use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use crate::data_source::{FetchError, FundSeriesSource, IndexSeriesSource};
use crate::performance::{ComparisonPayload, PerformanceAligner};
use crate::{parse_iso_date, Catalog, DateRange, IndexEntry, SchemeCode};

/// One fund-versus-index comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparisonRequest {
    pub scheme: SchemeCode,
    pub fund_name: String,
    pub index: IndexEntry,
    pub range: DateRange,
}

impl ComparisonRequest {
    /// Validate raw request parameters against the catalog.
    ///
    /// The range must span at least two days (`start < end`), and the index
    /// must be one of the catalog's display names. Unlisted scheme codes are
    /// accepted and named by their code.
    pub fn resolve(
        catalog: &Catalog,
        scheme_code: &str,
        index_name: &str,
        start_date: &str,
        end_date: &str,
    ) -> Result<Self, CompareError> {
        let invalid_date =
            |_| CompareError::InvalidInput(String::from("Invalid date format. Use YYYY-MM-DD"));
        let start = parse_iso_date(start_date).map_err(invalid_date)?;
        let end = parse_iso_date(end_date).map_err(invalid_date)?;
        if start >= end {
            return Err(CompareError::InvalidInput(String::from(
                "Start date must be before end date",
            )));
        }

        let index = catalog.index(index_name).cloned().ok_or_else(|| {
            CompareError::InvalidInput(format!("Invalid index name: {index_name}"))
        })?;

        let scheme = SchemeCode::parse(scheme_code)
            .map_err(|e| CompareError::InvalidInput(format!("Invalid scheme code: {e}")))?;

        let range = DateRange::new(start, end)
            .map_err(|e| CompareError::InvalidInput(e.to_string()))?;

        Ok(Self {
            fund_name: catalog.fund_name(&scheme),
            scheme,
            index,
            range,
        })
    }
}

/// Why a comparison produced no payload.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NoData(String),

    #[error("error fetching {target}: {source}")]
    Upstream {
        target: String,
        #[source]
        source: FetchError,
    },
}

/// Fetches both series concurrently and aligns them.
#[derive(Clone)]
pub struct ComparisonService {
    funds: Arc<dyn FundSeriesSource>,
    indices: Arc<dyn IndexSeriesSource>,
}

impl ComparisonService {
    pub fn new(funds: Arc<dyn FundSeriesSource>, indices: Arc<dyn IndexSeriesSource>) -> Self {
        Self { funds, indices }
    }

    pub fn funds(&self) -> &Arc<dyn FundSeriesSource> {
        &self.funds
    }

    pub fn indices(&self) -> &Arc<dyn IndexSeriesSource> {
        &self.indices
    }

    pub async fn compare(
        &self,
        request: &ComparisonRequest,
    ) -> Result<ComparisonPayload, CompareError> {
        info!(
            scheme = %request.scheme,
            index = %request.index.symbol,
            index_name = %request.index.display_name,
            "fetching fund and index series"
        );

        let (fund, index) = tokio::join!(
            self.funds.nav_series(&request.scheme, request.range),
            self.indices.close_series(&request.index.symbol, request.range),
        );

        let fund = fund
            .map_err(|source| CompareError::Upstream {
                target: format!("fund data for {}", request.scheme),
                source,
            })?
            .ok_or_else(|| {
                CompareError::NoData(format!(
                    "No data found for fund {} in the selected date range.",
                    request.scheme
                ))
            })?;

        let index = index
            .map_err(|source| CompareError::Upstream {
                target: format!("index data for {}", request.index.symbol),
                source,
            })?
            .ok_or_else(|| {
                CompareError::NoData(format!(
                    "No data found for index {} in the selected date range.",
                    request.index.symbol
                ))
            })?;

        PerformanceAligner::new(&request.fund_name, &request.index.display_name)
            .align(Some(&fund), Some(&index))
            .ok_or_else(|| {
                warn!(
                    scheme = %request.scheme,
                    index = %request.index.symbol,
                    "alignment produced no rows"
                );
                CompareError::NoData(String::from(
                    "No overlapping dates between fund and index data for the selected period.",
                ))
            })
    }
}
