use axum::Json;
use axum::extract::{Extension, State};
use axum::response::IntoResponse;
use rengoring_api_types::DashboardSummaryView;
use tracing::debug;

use crate::application::auth::AuthPrincipal;

use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn dashboard_summary(
    State(state): State<ApiState>,
    Extension(principal): Extension<AuthPrincipal>,
) -> Result<impl IntoResponse, ApiError> {
    let summary = state
        .dashboard
        .summary()
        .await
        .map_err(|err| ApiError::internal(err.to_string()))?;
    debug!(
        target = "rengoring::dashboard",
        user_id = %principal.user_id,
        "dashboard summary served"
    );

    Ok(Json(DashboardSummaryView {
        users: summary.users,
        pro_users: summary.pro_users,
        verified_users: summary.verified_users,
        posts: summary.posts,
        job_posts: summary.job_posts,
        boosted_posts: summary.boosted_posts,
        total_likes: summary.total_likes,
        total_comments: summary.total_comments,
        contact_submissions: summary.contact_submissions,
    }))
}
