use std::sync::Arc;

use fundbench_core::{
    Catalog, ComparisonService, HttpClient, MfapiAdapter, ReqwestHttpClient, ValidationError,
    YahooAdapter,
};

use crate::config::ServerConfig;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub service: ComparisonService,
}

impl AppState {
    pub fn new(catalog: Catalog, service: ComparisonService) -> Self {
        Self {
            catalog: Arc::new(catalog),
            service,
        }
    }

    /// Production wiring: built-in catalog, MFAPI and Yahoo over reqwest.
    pub fn from_config(config: &ServerConfig) -> Result<Self, ValidationError> {
        let http_client: Arc<dyn HttpClient> = Arc::new(ReqwestHttpClient::new());
        let funds = MfapiAdapter::new(Arc::clone(&http_client))
            .with_timeout_ms(config.upstream_timeout_ms);
        let indices = YahooAdapter::new(http_client).with_timeout_ms(config.upstream_timeout_ms);

        Ok(Self::new(
            Catalog::builtin()?,
            ComparisonService::new(Arc::new(funds), Arc::new(indices)),
        ))
    }
}
