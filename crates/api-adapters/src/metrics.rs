//! Prometheus request counters.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct RequestLabels {
    pub method: String,
    /// Route template, e.g. `/threads/{thread_id}`, never the raw URI.
    pub path: String,
    pub status: String,
}

pub struct HttpMetrics {
    registry: Registry,
    requests: Family<RequestLabels, Counter>,
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("forum");
        let requests = Family::<RequestLabels, Counter>::default();
        registry.register("http_requests", "HTTP requests served", requests.clone());
        Self { registry, requests }
    }

    pub fn record(&self, method: &str, path: &str, status: u16) {
        self.requests
            .get_or_create(&RequestLabels {
                method: method.to_string(),
                path: path.to_string(),
                status: status.to_string(),
            })
            .inc();
    }

    /// OpenMetrics text exposition.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut body = String::new();
        encode(&mut body, &self.registry)?;
        Ok(body)
    }
}

#[cfg(feature = "web-axum")]
mod http {
    use std::sync::Arc;

    use axum::extract::{MatchedPath, Request, State};
    use axum::http::{header, StatusCode};
    use axum::middleware::Next;
    use axum::response::{IntoResponse, Response};
    use tracing::error;

    use super::HttpMetrics;
    use crate::AppState;

    pub async fn track_requests(
        State(metrics): State<Arc<HttpMetrics>>,
        req: Request,
        next: Next,
    ) -> Response {
        let method = req.method().to_string();
        let path = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_owned())
            .unwrap_or_else(|| "unmatched".to_owned());

        let response = next.run(req).await;
        metrics.record(&method, &path, response.status().as_u16());
        response
    }

    pub async fn export(State(state): State<AppState>) -> Response {
        match state.metrics.render() {
            Ok(body) => (
                [(
                    header::CONTENT_TYPE,
                    "application/openmetrics-text; version=1.0.0; charset=utf-8",
                )],
                body,
            )
                .into_response(),
            Err(e) => {
                error!(error = %e, "metrics encoding failed");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(feature = "web-axum")]
pub use http::{export, track_requests};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_requests_per_route_and_status() {
        let metrics = HttpMetrics::new();
        metrics.record("GET", "/threads/{thread_id}", 200);
        metrics.record("GET", "/threads/{thread_id}", 200);
        metrics.record("GET", "/threads/{thread_id}", 404);

        let text = metrics.render().unwrap();
        assert!(text.contains("forum_http_requests_total"));
        assert!(text.contains(r#"status="200"} 2"#));
        assert!(text.contains(r#"status="404"} 1"#));
    }
}
