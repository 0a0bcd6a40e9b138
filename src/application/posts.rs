//! Post creation and the social actions on existing posts.

use std::str::FromStr;
use std::sync::Arc;

use metrics::counter;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::info;

use crate::application::auth::AuthPrincipal;
use crate::application::ids::IdGenerator;
use crate::application::repos::{PostChange, PostsRepo, RepoError, UsersRepo};
use crate::domain::entities::{AuthorRef, CommentRecord, PostRecord};
use crate::domain::error::DomainError;
use crate::domain::posts::{normalize_comment, normalize_content, normalize_job};
use crate::domain::types::Urgency;

pub const POSTS_CREATED_METRIC: &str = "rengoring_posts_created_total";

#[derive(Debug, Error)]
pub enum PostServiceError {
    #[error(transparent)]
    Validation(#[from] DomainError),
    #[error("post `{0}` not found")]
    NotFound(String),
    #[error(transparent)]
    Repo(RepoError),
}

impl PostServiceError {
    fn from_repo(id: &str, err: RepoError) -> Self {
        match err {
            RepoError::NotFound => Self::NotFound(id.to_string()),
            other => Self::Repo(other),
        }
    }
}

/// Trailing path segment of `PUT /api/posts/{id}/{action}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAction {
    Share,
    Boost,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown post action `{0}`")]
pub struct UnknownAction(pub String);

impl FromStr for PostAction {
    type Err = UnknownAction;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "share" => Ok(PostAction::Share),
            "boost" => Ok(PostAction::Boost),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewJob {
    pub budget: u32,
    pub urgency: Urgency,
    pub job_type: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct CreatePostCommand {
    pub content: String,
    pub job: Option<NewJob>,
}

#[derive(Clone)]
pub struct PostService {
    posts: Arc<dyn PostsRepo>,
    users: Arc<dyn UsersRepo>,
    ids: Arc<IdGenerator>,
}

impl PostService {
    pub fn new(
        posts: Arc<dyn PostsRepo>,
        users: Arc<dyn UsersRepo>,
        ids: Arc<IdGenerator>,
    ) -> Self {
        Self { posts, users, ids }
    }

    pub async fn find(&self, id: &str) -> Result<PostRecord, PostServiceError> {
        self.posts
            .find_post(id)
            .await
            .map_err(PostServiceError::Repo)?
            .ok_or_else(|| PostServiceError::NotFound(id.to_string()))
    }

    pub async fn create(
        &self,
        principal: &AuthPrincipal,
        command: CreatePostCommand,
    ) -> Result<PostRecord, PostServiceError> {
        let content = normalize_content(&command.content)?;
        let job = command
            .job
            .map(|job| {
                normalize_job(
                    job.budget,
                    job.urgency,
                    &job.job_type,
                    job.location.as_deref(),
                )
            })
            .transpose()?;

        let author = self.resolve_author(principal).await?;
        let post = PostRecord {
            id: self.ids.next_id(),
            content,
            author,
            created_at: OffsetDateTime::now_utc(),
            likes: 0,
            shares: 0,
            boosted: false,
            job,
            comments: Vec::new(),
        };

        let stored = self
            .posts
            .insert_post(post)
            .await
            .map_err(PostServiceError::Repo)?;

        counter!(POSTS_CREATED_METRIC).increment(1);
        info!(
            target = "rengoring::posts",
            post_id = %stored.id,
            author_id = %stored.author.id,
            job = stored.is_job(),
            "post created"
        );

        Ok(stored)
    }

    pub async fn apply_action(
        &self,
        id: &str,
        action: PostAction,
    ) -> Result<PostRecord, PostServiceError> {
        let change = match action {
            PostAction::Share => PostChange::Share,
            PostAction::Boost => PostChange::Boost,
        };
        let post = self.change(id, change).await?;

        info!(
            target = "rengoring::posts",
            post_id = %post.id,
            action = ?action,
            shares = post.shares,
            boosted = post.boosted,
            "post action applied"
        );

        Ok(post)
    }

    pub async fn like(
        &self,
        principal: &AuthPrincipal,
        id: &str,
    ) -> Result<PostRecord, PostServiceError> {
        let post = self.change(id, PostChange::Like).await?;

        info!(
            target = "rengoring::posts",
            post_id = %post.id,
            user_id = %principal.user_id,
            likes = post.likes,
            "post liked"
        );

        Ok(post)
    }

    pub async fn comment(
        &self,
        principal: &AuthPrincipal,
        id: &str,
        text: &str,
    ) -> Result<CommentRecord, PostServiceError> {
        let text = normalize_comment(text)?;
        let comment = CommentRecord {
            id: self.ids.next_id(),
            author: self.resolve_author(principal).await?,
            text,
            created_at: OffsetDateTime::now_utc(),
        };

        self.change(id, PostChange::AddComment(comment.clone())).await?;

        info!(
            target = "rengoring::posts",
            post_id = id,
            comment_id = %comment.id,
            user_id = %principal.user_id,
            "comment added"
        );

        Ok(comment)
    }

    async fn change(&self, id: &str, change: PostChange) -> Result<PostRecord, PostServiceError> {
        self.posts
            .update_post(id, change)
            .await
            .map_err(|err| PostServiceError::from_repo(id, err))
    }

    /// Prefer the stored profile; fall back to what the token carries.
    async fn resolve_author(
        &self,
        principal: &AuthPrincipal,
    ) -> Result<AuthorRef, PostServiceError> {
        let user = self
            .users
            .find_user(&principal.user_id)
            .await
            .map_err(PostServiceError::Repo)?;

        Ok(match user {
            Some(user) => user.author_ref(),
            None => AuthorRef {
                id: principal.user_id.clone(),
                name: principal.display_name().to_string(),
                avatar: None,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryRepositories;

    fn service() -> PostService {
        let repos = Arc::new(InMemoryRepositories::seeded());
        PostService::new(repos.clone(), repos, Arc::new(IdGenerator::new()))
    }

    fn principal(user_id: &str) -> AuthPrincipal {
        AuthPrincipal {
            user_id: user_id.to_string(),
            email: Some("gaest@example.dk".to_string()),
            name: None,
        }
    }

    #[test]
    fn actions_parse_from_path_segments() {
        assert_eq!("share".parse::<PostAction>(), Ok(PostAction::Share));
        assert_eq!("boost".parse::<PostAction>(), Ok(PostAction::Boost));
        assert_eq!(
            "delete".parse::<PostAction>(),
            Err(UnknownAction("delete".to_string()))
        );
    }

    #[tokio::test]
    async fn create_uses_stored_profile_as_author() {
        let service = service();
        let post = service
            .create(
                &principal("1"),
                CreatePostCommand {
                    content: "  Nyt opslag  ".to_string(),
                    job: None,
                },
            )
            .await
            .expect("post created");

        assert_eq!(post.content, "Nyt opslag");
        assert_eq!(post.author.name, "Mette Hansen");
        assert!(post.author.avatar.is_some());
        assert_eq!(service.find(&post.id).await.expect("stored"), post);
    }

    #[tokio::test]
    async fn create_falls_back_to_token_identity() {
        let post = service()
            .create(
                &principal("99"),
                CreatePostCommand {
                    content: "Hej".to_string(),
                    job: Some(NewJob {
                        budget: 600,
                        urgency: Urgency::Low,
                        job_type: "Vinduespudsning".to_string(),
                        location: None,
                    }),
                },
            )
            .await
            .expect("post created");

        assert_eq!(post.author.id, "99");
        assert_eq!(post.author.name, "gaest@example.dk");
        assert!(post.is_job());
    }

    #[tokio::test]
    async fn create_rejects_blank_content() {
        let result = service()
            .create(
                &principal("1"),
                CreatePostCommand {
                    content: "   ".to_string(),
                    job: None,
                },
            )
            .await;
        assert!(matches!(result, Err(PostServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn share_and_boost_update_the_stored_post() {
        let service = service();
        let before = service.find("2").await.expect("seed post");

        let shared = service
            .apply_action("2", PostAction::Share)
            .await
            .expect("shared");
        assert_eq!(shared.shares, before.shares + 1);

        let boosted = service
            .apply_action("3", PostAction::Boost)
            .await
            .expect("boosted");
        assert!(boosted.boosted);
    }

    #[tokio::test]
    async fn actions_on_missing_posts_are_not_found() {
        let service = service();
        let result = service.apply_action("nope", PostAction::Share).await;
        assert!(matches!(result, Err(PostServiceError::NotFound(id)) if id == "nope"));

        let result = service.like(&principal("1"), "nope").await;
        assert!(matches!(result, Err(PostServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn comments_are_appended() {
        let service = service();
        let comment = service
            .comment(&principal("4"), "3", "Jeg kan komme torsdag")
            .await
            .expect("comment added");

        assert_eq!(comment.author.name, "Anders Pedersen");
        let post = service.find("3").await.expect("seed post");
        assert_eq!(post.comments.last(), Some(&comment));
    }
}
