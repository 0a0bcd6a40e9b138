pub mod api;
mod middleware;

pub use api::middleware::AUTH_REJECTIONS_METRIC;
pub use api::rate_limit::ApiRateLimiter;
pub use api::{ApiState, build_api_router};

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::{Router, middleware as axum_middleware, routing::get};

use self::middleware::{log_responses, set_request_context};

/// Full application router: the JSON API plus the liveness probe.
pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(build_api_router(state))
        .layer(axum_middleware::from_fn(log_responses))
        .layer(axum_middleware::from_fn(set_request_context))
}

async fn health() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}
