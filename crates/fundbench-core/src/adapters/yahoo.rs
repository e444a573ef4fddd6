use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::{OffsetDateTime, UtcOffset};
use tracing::{debug, info, warn};

use crate::data_source::{FetchError, FetchErrorKind, IndexSeriesSource, ProviderId};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{DateRange, Symbol, TimeSeries};

const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
const SECONDS_PER_DAY: i64 = 86_400;

/// Yahoo Finance chart adapter for daily index closes.
#[derive(Clone)]
pub struct YahooAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl YahooAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(YAHOO_CHART_URL),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_owned();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    fn chart_url(&self, symbol: &Symbol, range: DateRange) -> String {
        // period2 is exclusive upstream; one extra day keeps the end date in.
        let period1 = range.start().midnight().assume_utc().unix_timestamp();
        let period2 = range.end().midnight().assume_utc().unix_timestamp() + SECONDS_PER_DAY;

        format!(
            "{}/{}?period1={}&period2={}&interval=1d&events=history",
            self.base_url,
            urlencoding::encode(symbol.as_str()),
            period1,
            period2
        )
    }

    async fn fetch_close_series(
        &self,
        symbol: &Symbol,
        range: DateRange,
    ) -> Result<Option<TimeSeries>, FetchError> {
        let url = self.chart_url(symbol, range);
        debug!(%symbol, %url, "requesting index chart");

        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_header("referer", "https://finance.yahoo.com/")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchError::from_transport(ProviderId::Yahoo, error))
            .inspect_err(|error| {
                warn!(
                    %symbol,
                    code = error.code(),
                    "index chart request failed: {}",
                    error.message()
                );
            })?;

        if response.status == 404 {
            info!(%symbol, "yahoo does not know this symbol");
            return Ok(None);
        }

        if !response.is_success() {
            warn!(%symbol, status = response.status, "yahoo returned an error status");
            return Err(FetchError::upstream_status(
                ProviderId::Yahoo,
                response.status,
            ));
        }

        let series = parse_chart(&response.body, range)?;
        match &series {
            Some(series) => debug!(%symbol, points = series.len(), "index closes in range"),
            None => info!(%symbol, "yahoo returned no rows for the requested range"),
        }
        Ok(series)
    }
}

impl IndexSeriesSource for YahooAdapter {
    fn close_series<'a>(
        &'a self,
        symbol: &'a Symbol,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TimeSeries>, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch_close_series(symbol, range))
    }
}

#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChartData,
}

#[derive(Debug, Deserialize)]
struct YahooChartData {
    #[serde(default)]
    result: Option<Vec<YahooChartResult>>,
    #[serde(default)]
    error: Option<YahooChartError>,
}

#[derive(Debug, Deserialize)]
struct YahooChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct YahooChartResult {
    #[serde(default)]
    meta: Option<YahooChartMeta>,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<YahooChartIndicators>,
}

#[derive(Debug, Deserialize)]
struct YahooChartMeta {
    /// Exchange offset from UTC in seconds.
    #[serde(default)]
    gmtoffset: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct YahooChartIndicators {
    #[serde(default)]
    quote: Vec<YahooChartQuote>,
}

#[derive(Debug, Deserialize)]
struct YahooChartQuote {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
}

/// Parse a chart body into exchange-local calendar dates and closes within `range`.
pub(crate) fn parse_chart(body: &str, range: DateRange) -> Result<Option<TimeSeries>, FetchError> {
    let response: YahooChartResponse = serde_json::from_str(body).map_err(|e| {
        FetchError::malformed(
            ProviderId::Yahoo,
            format!("failed to parse yahoo chart: {e}"),
        )
    })?;

    if let Some(error) = response.chart.error {
        if error.code == "Not Found" {
            return Ok(None);
        }
        return Err(FetchError::new(
            FetchErrorKind::UpstreamStatus,
            ProviderId::Yahoo,
            format!(
                "yahoo chart error {}: {}",
                error.code,
                error.description.unwrap_or_default()
            ),
        ));
    }

    let Some(result) = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
    else {
        return Ok(None);
    };

    let timestamps = match result.timestamp {
        Some(timestamps) if !timestamps.is_empty() => timestamps,
        _ => return Ok(None),
    };

    let closes = result
        .indicators
        .and_then(|indicators| indicators.quote.into_iter().next())
        .and_then(|quote| quote.close)
        .ok_or_else(|| {
            FetchError::malformed(ProviderId::Yahoo, "close column missing in yahoo chart")
        })?;

    if closes.len() != timestamps.len() {
        return Err(FetchError::malformed(
            ProviderId::Yahoo,
            format!(
                "yahoo chart has {} timestamps but {} closes",
                timestamps.len(),
                closes.len()
            ),
        ));
    }

    let offset = result
        .meta
        .and_then(|meta| meta.gmtoffset)
        .and_then(|seconds| UtcOffset::from_whole_seconds(seconds).ok())
        .unwrap_or(UtcOffset::UTC);

    let mut points = Vec::with_capacity(timestamps.len());
    for (ts_value, close) in timestamps.into_iter().zip(closes) {
        // Non-trading rows come back with a null close.
        let Some(close) = close else {
            continue;
        };
        let ts = OffsetDateTime::from_unix_timestamp(ts_value)
            .ok()
            .and_then(|ts| ts.checked_to_offset(offset))
            .ok_or_else(|| {
                FetchError::malformed(
                    ProviderId::Yahoo,
                    format!("invalid timestamp {ts_value}"),
                )
            })?;
        points.push((ts, close));
    }

    let series = TimeSeries::from_timestamps(points)
        .map_err(|e| FetchError::malformed(ProviderId::Yahoo, e.to_string()))?
        .within(range);

    Ok((!series.is_empty()).then_some(series))
}
