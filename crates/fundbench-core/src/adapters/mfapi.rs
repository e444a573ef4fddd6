use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use serde::Deserialize;
use time::macros::format_description;
use time::Date;
use tracing::{debug, info, warn};

use crate::data_source::{FetchError, FundSeriesSource, ProviderId};
use crate::http_client::{HttpClient, HttpRequest, DEFAULT_TIMEOUT_MS};
use crate::{DateRange, SchemeCode, TimeSeries};

const MFAPI_BASE_URL: &str = "https://api.mfapi.in/mf";

/// MFAPI adapter for scheme NAV history and scheme search.
#[derive(Clone)]
pub struct MfapiAdapter {
    http_client: Arc<dyn HttpClient>,
    base_url: String,
    timeout_ms: u64,
}

impl MfapiAdapter {
    pub fn new(http_client: Arc<dyn HttpClient>) -> Self {
        Self {
            http_client,
            base_url: String::from(MFAPI_BASE_URL),
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

    async fn fetch_body(&self, url: String) -> Result<String, FetchError> {
        let request = HttpRequest::get(url)
            .with_header("accept", "application/json")
            .with_timeout_ms(self.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchError::from_transport(ProviderId::Mfapi, error))?;

        if !response.is_success() {
            return Err(FetchError::upstream_status(
                ProviderId::Mfapi,
                response.status,
            ));
        }

        Ok(response.body)
    }

    async fn fetch_nav_series(
        &self,
        scheme: &SchemeCode,
        range: DateRange,
    ) -> Result<Option<TimeSeries>, FetchError> {
        let url = format!(
            "{}/{}",
            self.base_url,
            urlencoding::encode(scheme.as_str())
        );
        debug!(%scheme, %url, "requesting NAV history");

        let body = self.fetch_body(url).await.inspect_err(|error| {
            warn!(
                %scheme,
                code = error.code(),
                "NAV history request failed: {}",
                error.message()
            );
        })?;

        let series = parse_nav_history(&body, range)?;
        match &series {
            Some(series) => debug!(%scheme, points = series.len(), "NAV history in range"),
            None => info!(%scheme, "no NAV records within the requested range"),
        }
        Ok(series)
    }

    async fn fetch_search(&self, query: &str) -> Result<serde_json::Value, FetchError> {
        let url = format!(
            "{}/search?q={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!(query, "searching schemes");

        let body = self.fetch_body(url).await?;
        serde_json::from_str(&body).map_err(|e| {
            FetchError::malformed(
                ProviderId::Mfapi,
                format!("failed to parse mfapi search response: {e}"),
            )
        })
    }
}

impl FundSeriesSource for MfapiAdapter {
    fn nav_series<'a>(
        &'a self,
        scheme: &'a SchemeCode,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TimeSeries>, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch_nav_series(scheme, range))
    }

    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, FetchError>> + Send + 'a>> {
        Box::pin(self.fetch_search(query))
    }
}

#[derive(Debug, Deserialize)]
struct MfapiSchemeResponse {
    #[serde(default)]
    data: Option<Vec<MfapiNavRecord>>,
}

#[derive(Debug, Deserialize)]
struct MfapiNavRecord {
    date: String,
    nav: MfapiNav,
}

/// MFAPI sends NAV as a decimal string; accept a bare number as well.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum MfapiNav {
    Text(String),
    Number(f64),
}

impl MfapiNav {
    fn value(&self) -> Option<f64> {
        match self {
            Self::Text(text) => text.trim().parse().ok(),
            Self::Number(value) => Some(*value),
        }
    }
}

/// Parse a `/mf/{scheme}` body into the NAV points falling inside `range`.
pub(crate) fn parse_nav_history(
    body: &str,
    range: DateRange,
) -> Result<Option<TimeSeries>, FetchError> {
    let response: MfapiSchemeResponse = serde_json::from_str(body).map_err(|e| {
        FetchError::malformed(
            ProviderId::Mfapi,
            format!("failed to parse mfapi response: {e}"),
        )
    })?;

    let records = response.data.ok_or_else(|| {
        FetchError::malformed(ProviderId::Mfapi, "mfapi response has no data field")
    })?;

    if records.is_empty() {
        return Ok(None);
    }

    let mut series = TimeSeries::new();
    for record in records {
        let date = Date::parse(record.date.trim(), format_description!("[day]-[month]-[year]"))
            .map_err(|_| {
                FetchError::malformed(
                    ProviderId::Mfapi,
                    format!("unparseable NAV date '{}'", record.date),
                )
            })?;

        if !range.contains(date) {
            continue;
        }

        let nav = record.nav.value().ok_or_else(|| {
            FetchError::malformed(
                ProviderId::Mfapi,
                format!("unparseable NAV value for {}", record.date),
            )
        })?;

        series
            .insert(date, nav)
            .map_err(|e| FetchError::malformed(ProviderId::Mfapi, e.to_string()))?;
    }

    Ok((!series.is_empty()).then_some(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data_source::FetchErrorKind;
    use time::macros::date;

    fn january() -> DateRange {
        DateRange::parse("2024-01-01", "2024-01-31").expect("valid range")
    }

    #[test]
    fn parses_descending_records_into_ascending_series() {
        let body = r#"{
            "meta": {"scheme_code": 120586},
            "data": [
                {"date": "02-02-2024", "nav": "81.20000"},
                {"date": "31-01-2024", "nav": "80.10000"},
                {"date": "02-01-2024", "nav": "78.55000"},
                {"date": "29-12-2023", "nav": "78.00000"}
            ],
            "status": "SUCCESS"
        }"#;

        let series = parse_nav_history(body, january())
            .expect("valid body")
            .expect("points in range");

        let points: Vec<_> = series.iter().collect();
        assert_eq!(
            points,
            vec![(date!(2024 - 01 - 02), 78.55), (date!(2024 - 01 - 31), 80.1)]
        );
    }

    #[test]
    fn empty_data_is_absence_not_error() {
        let body = r#"{"meta": {}, "data": [], "status": "SUCCESS"}"#;
        assert_eq!(parse_nav_history(body, january()).expect("valid body"), None);
    }

    #[test]
    fn no_records_in_range_is_absence() {
        let body = r#"{"data": [{"date": "15-06-2023", "nav": "10.0"}]}"#;
        assert_eq!(parse_nav_history(body, january()).expect("valid body"), None);
    }

    #[test]
    fn missing_data_field_is_malformed() {
        let error = parse_nav_history(r#"{"status": "FAIL"}"#, january()).expect_err("no data");
        assert_eq!(error.kind(), FetchErrorKind::MalformedResponse);
    }

    #[test]
    fn bad_nav_value_is_malformed() {
        let body = r#"{"data": [{"date": "02-01-2024", "nav": "N.A."}]}"#;
        let error = parse_nav_history(body, january()).expect_err("bad nav");
        assert_eq!(error.kind(), FetchErrorKind::MalformedResponse);
        assert!(error.message().contains("02-01-2024"));
    }

    #[test]
    fn numeric_nav_is_accepted() {
        let body = r#"{"data": [{"date": "02-01-2024", "nav": 12.5}]}"#;
        let series = parse_nav_history(body, january())
            .expect("valid body")
            .expect("point in range");
        assert_eq!(series.get(date!(2024 - 01 - 02)), Some(12.5));
    }
}
