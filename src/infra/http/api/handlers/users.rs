use axum::Json;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use rengoring_api_types::{UserListResponse, UserView};

use super::repo_to_api;
use crate::infra::http::api::error::{ApiError, messages};
use crate::infra::http::api::state::ApiState;

pub async fn list_users(State(state): State<ApiState>) -> Result<impl IntoResponse, ApiError> {
    let users = state
        .users
        .list_users()
        .await
        .map_err(|err| repo_to_api(err, messages::USER_NOT_FOUND))?;
    Ok(Json(UserListResponse {
        users: users.iter().map(UserView::from).collect(),
    }))
}

pub async fn get_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .users
        .find_user(&id)
        .await
        .map_err(|err| repo_to_api(err, messages::USER_NOT_FOUND))?
        .ok_or_else(|| ApiError::not_found(messages::USER_NOT_FOUND))?;

    Ok(Json(UserView::from(&user)))
}
