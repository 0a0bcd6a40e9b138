use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, MatchedPath, State};
use axum::http::{HeaderMap, HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use metrics::counter;
use tracing::debug;

use crate::application::auth::AuthError;

use super::error::ApiError;
use super::state::ApiState;

pub const AUTH_REJECTIONS_METRIC: &str = "rengoring_auth_rejections_total";

/// Shared bucket for requests that matched no route.
const UNMATCHED_ROUTE: &str = "<unmatched>";

/// Require a valid `Authorization: Bearer <jwt>` header. The verified
/// principal is inserted into the request extensions for handlers and onto
/// the response for the logging middleware.
pub async fn require_bearer(
    State(state): State<ApiState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let verified = match extract_token(request.headers().get(header::AUTHORIZATION)) {
        Some(token) => state.tokens.verify(token),
        None => Err(AuthError::Missing),
    };

    let principal = match verified {
        Ok(principal) => principal,
        Err(err) => {
            let reason = match &err {
                AuthError::Missing => "missing",
                AuthError::Expired => "expired",
                AuthError::Invalid(_) => "invalid",
            };
            counter!(AUTH_REJECTIONS_METRIC, "reason" => reason).increment(1);
            debug!(
                target = "rengoring::http::auth",
                path = %request.uri().path(),
                error = %err,
                "bearer token rejected"
            );
            return match err {
                AuthError::Expired => ApiError::token_expired().into_response(),
                AuthError::Missing | AuthError::Invalid(_) => {
                    ApiError::unauthorized().into_response()
                }
            };
        }
    };

    request.extensions_mut().insert(principal.clone());
    let mut response = next.run(request).await;
    response.extensions_mut().insert(principal);
    response
}

/// Buckets are keyed by the route template (`/api/posts/{id}`), so distinct
/// ids share one budget per client.
pub async fn api_rate_limit(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map_or(UNMATCHED_ROUTE, MatchedPath::as_str)
        .to_string();
    let client = client_key(&request);

    let (allowed, remaining) = state.rate_limiter.allow(&client, &route);
    if !allowed {
        return ApiError::rate_limited(state.rate_limiter.retry_after_secs());
    }

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("x-ratelimit-limit", HeaderValue::from(state.rate_limiter.limit()));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(remaining));
    response
}

/// Peer address when the server was started with connect info, otherwise the
/// first `X-Forwarded-For` hop.
fn client_key(request: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    forwarded_for(request.headers()).unwrap_or_else(|| "unknown".to_string())
}

fn forwarded_for(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get("x-forwarded-for")?.to_str().ok()?;
    let first = raw.split(',').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

fn extract_token(header: Option<&HeaderValue>) -> Option<&str> {
    let raw = header?.to_str().ok()?;
    let bearer = raw.strip_prefix("Bearer ")?.trim();
    (!bearer.is_empty()).then_some(bearer)
}
