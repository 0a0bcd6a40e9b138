//! Feed and post handlers.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Extension, Path, Query, State};
use axum::http::{StatusCode, Uri};
use axum::response::IntoResponse;
use rengoring_api_types::{
    CommentCreateRequest, CommentCreatedResponse, CommentView, PostActionResponse,
    PostCreateRequest, PostListResponse, PostView,
};

use crate::application::auth::AuthPrincipal;
use crate::application::posts::{CreatePostCommand, NewJob, PostAction, UnknownAction};
use crate::domain::feed::FeedCriteria;

use super::{FeedQuery, comment_to_api, feed_to_api, json_to_api, post_to_api, query_to_api};
use crate::infra::http::api::error::ApiError;
use crate::infra::http::api::state::ApiState;

pub async fn list_posts(
    State(state): State<ApiState>,
    query: Result<Query<FeedQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(query) = query.map_err(query_to_api)?;
    let criteria = FeedCriteria::new(
        query.q.as_deref(),
        query.category.unwrap_or_default(),
        query.sort.unwrap_or_default(),
    );

    let posts = state.feed.list(&criteria).await.map_err(feed_to_api)?;
    let posts: Vec<PostView> = posts.iter().map(PostView::from).collect();

    Ok(Json(PostListResponse {
        total: posts.len(),
        posts,
    }))
}

pub async fn get_post(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state.posts.find(&id).await.map_err(post_to_api)?;
    Ok(Json(PostView::from(&post)))
}

pub async fn create_post(
    State(state): State<ApiState>,
    Extension(principal): Extension<AuthPrincipal>,
    payload: Result<Json<PostCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(json_to_api)?;

    let command = CreatePostCommand {
        content: payload.content,
        job: payload.job.map(|job| NewJob {
            budget: job.budget,
            urgency: job.urgency,
            job_type: job.job_type,
            location: job.location,
        }),
    };

    let post = state
        .posts
        .create(&principal, command)
        .await
        .map_err(post_to_api)?;

    Ok((
        StatusCode::CREATED,
        Json(PostActionResponse {
            success: true,
            message: "Opslaget er oprettet".to_string(),
            post: PostView::from(&post),
        }),
    ))
}

pub async fn apply_post_action(
    State(state): State<ApiState>,
    Path((id, action)): Path<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let action: PostAction = action
        .parse()
        .map_err(|err: UnknownAction| ApiError::unknown_action(&err.0))?;

    let post = state
        .posts
        .apply_action(&id, action)
        .await
        .map_err(post_to_api)?;

    let message = match action {
        PostAction::Share => "Opslaget er delt",
        PostAction::Boost => "Opslaget er boostet",
    };

    Ok(Json(PostActionResponse {
        success: true,
        message: message.to_string(),
        post: PostView::from(&post),
    }))
}

/// `PUT /api/posts/{id}/like` and `PUT /api/posts/{id}/comments`.
pub async fn reject_fixed_action(uri: Uri) -> ApiError {
    let action = uri.path().rsplit('/').next().unwrap_or_default();
    ApiError::unknown_action(action)
}

pub async fn like_post(
    State(state): State<ApiState>,
    Extension(principal): Extension<AuthPrincipal>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let post = state
        .posts
        .like(&principal, &id)
        .await
        .map_err(post_to_api)?;

    Ok(Json(PostActionResponse {
        success: true,
        message: "Du synes godt om opslaget".to_string(),
        post: PostView::from(&post),
    }))
}

pub async fn comment_on_post(
    State(state): State<ApiState>,
    Extension(principal): Extension<AuthPrincipal>,
    Path(id): Path<String>,
    payload: Result<Json<CommentCreateRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = payload.map_err(json_to_api)?;

    let comment = state
        .posts
        .comment(&principal, &id, &payload.text)
        .await
        .map_err(comment_to_api)?;

    Ok((
        StatusCode::CREATED,
        Json(CommentCreatedResponse {
            success: true,
            message: "Kommentaren er tilføjet".to_string(),
            comment: CommentView::from(&comment),
        }),
    ))
}
