//! # Fundbench Web
//!
//! JSON API over [`fundbench_core`]:
//!
//! | Route | Handler |
//! |-------|---------|
//! | `GET /api/funds` | built-in fund list |
//! | `GET /api/indices` | index display names |
//! | `GET /api/funds/search?q=` | MFAPI scheme search passthrough |
//! | `GET /api/compare?scheme_code&index_name&start_date&end_date` | fund-versus-index payload |
//! | `GET /api/index-data?symbol&start_date&end_date` | raw index closes |
//! | `GET /health` | liveness |
//!
//! Errors are returned as `{"error": "<message>"}` with status 400, 404, or 500.

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use axum::routing::get;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::{Environment, ServerConfig};
pub use error::{ApiError, ServerError};
pub use state::AppState;

/// Routes without middleware.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/funds", get(routes::list_funds))
        .route("/funds/search", get(routes::search_funds))
        .route("/indices", get(routes::list_indices))
        .route("/compare", get(routes::compare))
        .route("/index-data", get(routes::index_data));

    Router::new()
        .nest("/api", api)
        .route("/health", get(routes::health))
        .with_state(state)
}

/// Routes with request tracing and the given CORS policy.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
