//! # api-adapters
//!
//! HTTP surface of the forum. Translates requests into use-case payloads and
//! domain errors into the `{status, message}` envelope.

#[cfg(feature = "web-axum")]
pub mod error;
#[cfg(feature = "web-axum")]
pub mod extract;
#[cfg(feature = "web-axum")]
pub mod handlers;
pub mod metrics;
#[cfg(feature = "web-axum")]
pub mod state;

#[cfg(feature = "web-axum")]
pub use error::ApiError;
#[cfg(feature = "web-axum")]
pub use state::AppState;

#[cfg(feature = "web-axum")]
pub use router::router;

#[cfg(feature = "web-axum")]
mod router {
    use axum::body::Body;
    use axum::http::Request;
    use axum::middleware::from_fn_with_state;
    use axum::routing::{delete, get, post, put};
    use axum::Router;
    use tower::ServiceBuilder;
    use tower_http::cors::CorsLayer;
    use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
    use tower_http::trace::TraceLayer;

    use crate::handlers::{comments, health, likes, replies, threads};
    use crate::{metrics, AppState};

    /// Builds the complete application router.
    pub fn router(state: AppState) -> Router {
        let routes = Router::new()
            .route("/threads", post(threads::post_thread))
            .route("/threads/{thread_id}", get(threads::get_thread))
            .route("/threads/{thread_id}/comments", post(comments::post_comment))
            .route(
                "/threads/{thread_id}/comments/{comment_id}",
                delete(comments::delete_comment),
            )
            .route(
                "/threads/{thread_id}/comments/{comment_id}/replies",
                post(replies::post_reply),
            )
            .route(
                "/threads/{thread_id}/comments/{comment_id}/replies/{reply_id}",
                delete(replies::delete_reply),
            )
            .route(
                "/threads/{thread_id}/comments/{comment_id}/likes",
                put(likes::put_like),
            )
            .route("/health", get(health))
            .route("/metrics", get(metrics::export))
            .route_layer(from_fn_with_state(
                state.metrics.clone(),
                metrics::track_requests,
            ))
            .with_state(state);

        routes
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |req: &Request<Body>| {
                            let request_id = req
                                .headers()
                                .get("x-request-id")
                                .and_then(|v| v.to_str().ok())
                                .unwrap_or("-");
                            tracing::info_span!(
                                "http",
                                method = %req.method(),
                                uri = %req.uri(),
                                request_id,
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
            .layer(CorsLayer::permissive())
    }
}
