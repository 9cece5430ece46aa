use std::sync::Arc;

use domains::TokenVerifier;
use services::ForumServices;

use crate::metrics::HttpMetrics;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub services: ForumServices,
    pub tokens: Arc<dyn TokenVerifier>,
    pub metrics: Arc<HttpMetrics>,
}

impl AppState {
    pub fn new(services: ForumServices, tokens: Arc<dyn TokenVerifier>) -> Self {
        Self {
            services,
            tokens,
            metrics: Arc::new(HttpMetrics::new()),
        }
    }
}
