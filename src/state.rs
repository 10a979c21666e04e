use std::sync::Arc;

use wardline_config::{CorsConfig, JwtConfig};
use wardline_db::Store;
use wardline_observability::PrometheusHandle;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    /// Present when the `/metrics` endpoint should be served.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            store,
            jwt_config,
            cors_config,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: Option<PrometheusHandle>) -> Self {
        self.metrics = handle;
        self
    }

    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }
}
