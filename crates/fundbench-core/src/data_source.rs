//! Series fetcher contracts and their error type.
//!
//! Fetchers report three outcomes through one type,
//! `Result<Option<TimeSeries>, FetchError>`:
//!
//! | Outcome | Meaning |
//! |---------|---------|
//! | `Ok(Some(series))` | at least one point inside the requested range |
//! | `Ok(None)` | upstream answered but had nothing for the range |
//! | `Err(FetchError)` | transport failure or unusable response |

use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::http_client::{HttpError, HttpErrorKind};
use crate::{DateRange, SchemeCode, Symbol, TimeSeries};

/// Upstream data provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    Mfapi,
    Yahoo,
}

impl ProviderId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mfapi => "mfapi",
            Self::Yahoo => "yahoo",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fetch failure classification. Network-class kinds are kept apart from
/// response-shape kinds so callers can word the two differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    Connectivity,
    Timeout,
    UpstreamStatus,
    MalformedResponse,
}

/// Structured fetch error carrying the upstream failure detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    kind: FetchErrorKind,
    provider: ProviderId,
    message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, provider: ProviderId, message: impl Into<String>) -> Self {
        Self {
            kind,
            provider,
            message: message.into(),
        }
    }

    pub fn connectivity(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Connectivity, provider, message)
    }

    pub fn timeout(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Timeout, provider, message)
    }

    pub fn upstream_status(provider: ProviderId, status: u16) -> Self {
        Self::new(
            FetchErrorKind::UpstreamStatus,
            provider,
            format!("{provider} returned status {status}"),
        )
    }

    pub fn malformed(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::MalformedResponse, provider, message)
    }

    pub fn from_transport(provider: ProviderId, error: HttpError) -> Self {
        let message = format!("{provider} transport error: {}", error.message());
        match error.kind() {
            HttpErrorKind::Timeout => Self::timeout(provider, message),
            HttpErrorKind::Connect | HttpErrorKind::Request | HttpErrorKind::Body => {
                Self::connectivity(provider, message)
            }
        }
    }

    pub const fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub const fn provider(&self) -> ProviderId {
        self.provider
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// True for failures that never produced a usable HTTP response.
    pub const fn is_network(&self) -> bool {
        matches!(
            self.kind,
            FetchErrorKind::Connectivity | FetchErrorKind::Timeout
        )
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FetchErrorKind::Connectivity => "fetch.connectivity",
            FetchErrorKind::Timeout => "fetch.timeout",
            FetchErrorKind::UpstreamStatus => "fetch.upstream_status",
            FetchErrorKind::MalformedResponse => "fetch.malformed_response",
        }
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FetchError {}

/// Mutual fund NAV source.
pub trait FundSeriesSource: Send + Sync {
    /// NAV per date for `scheme`, restricted to `range` (both ends inclusive).
    fn nav_series<'a>(
        &'a self,
        scheme: &'a SchemeCode,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TimeSeries>, FetchError>> + Send + 'a>>;

    /// Free-text scheme search; the upstream JSON is returned untouched.
    fn search<'a>(
        &'a self,
        query: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<serde_json::Value, FetchError>> + Send + 'a>>;
}

/// Market index closing-price source.
pub trait IndexSeriesSource: Send + Sync {
    /// Daily closes for `symbol` within `range`, end date included, keyed by
    /// timezone-free calendar date.
    fn close_series<'a>(
        &'a self,
        symbol: &'a Symbol,
        range: DateRange,
    ) -> Pin<Box<dyn Future<Output = Result<Option<TimeSeries>, FetchError>> + Send + 'a>>;
}
