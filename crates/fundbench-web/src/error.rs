use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use fundbench_core::{CompareError, FetchError, FetchErrorKind, ValidationError};
use serde_json::json;
use thiserror::Error;

/// Error surfaced to API clients as `{"error": "<message>"}`.
///
/// Upstream messages never carry transport internals; those go to the log.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Client-facing wording for a failed upstream fetch of `target`.
    pub fn upstream(target: &str, error: &FetchError) -> Self {
        let detail = match error.kind() {
            FetchErrorKind::Connectivity => {
                "could not connect to the data provider. Check network or firewall"
            }
            FetchErrorKind::Timeout => "the data provider did not respond in time",
            FetchErrorKind::UpstreamStatus => "the data provider returned an error",
            FetchErrorKind::MalformedResponse => {
                "the data provider returned an unexpected response"
            }
        };
        Self::Upstream(format!("Error fetching {target}: {detail}."))
    }

    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CompareError> for ApiError {
    fn from(error: CompareError) -> Self {
        match error {
            CompareError::InvalidInput(message) => Self::BadRequest(message),
            CompareError::NoData(message) => Self::NotFound(message),
            CompareError::Upstream { target, source } => Self::upstream(&target, &source),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(error: ValidationError) -> Self {
        Self::BadRequest(error.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Startup failures of the server binary.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid built-in catalog: {0}")]
    Catalog(#[from] ValidationError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: std::net::SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[from] std::io::Error),
}
