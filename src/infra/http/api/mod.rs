pub mod error;
pub mod handlers;
pub mod middleware;
pub mod rate_limit;
pub mod state;

pub use state::ApiState;

use axum::{
    Router, middleware as axum_middleware,
    routing::{MethodRouter, get, post, put},
};

/// JSON API under `/api`. Every route is rate limited; mutations and the
/// dashboard also require a bearer token.
///
/// `like` and `comments` are static segments and win over `{action}`, so a
/// `PUT` to them is answered explicitly as an unknown action.
pub fn build_api_router(state: ApiState) -> Router {
    let rate_state = state.clone();

    Router::new()
        .route(
            "/api/posts",
            get(handlers::list_posts)
                .merge(authenticated(&state, post(handlers::create_post))),
        )
        .route("/api/posts/{id}", get(handlers::get_post))
        .route("/api/posts/{id}/{action}", put(handlers::apply_post_action))
        .route(
            "/api/posts/{id}/like",
            authenticated(&state, post(handlers::like_post))
                .put(handlers::reject_fixed_action),
        )
        .route(
            "/api/posts/{id}/comments",
            authenticated(&state, post(handlers::comment_on_post))
                .put(handlers::reject_fixed_action),
        )
        .route("/api/contact", post(handlers::submit_contact))
        .route("/api/users", get(handlers::list_users))
        .route("/api/users/{id}", get(handlers::get_user))
        .route(
            "/api/dashboard",
            authenticated(&state, get(handlers::dashboard_summary)),
        )
        .method_not_allowed_fallback(handlers::method_not_allowed)
        .with_state(state)
        .layer(axum_middleware::from_fn_with_state(
            rate_state,
            middleware::api_rate_limit,
        ))
}

/// Guard only the methods registered on `method_router`; unmatched methods
/// still fall through to 405.
fn authenticated(
    state: &ApiState,
    method_router: MethodRouter<ApiState>,
) -> MethodRouter<ApiState> {
    method_router.route_layer(axum_middleware::from_fn_with_state(
        state.clone(),
        middleware::require_bearer,
    ))
}
