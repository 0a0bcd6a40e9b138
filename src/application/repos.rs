//! Repository traits describing persistence adapters.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::contact::ContactSubmission;
use crate::domain::entities::{CommentRecord, PostRecord, UserRecord};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("duplicate record `{id}`")]
    Duplicate { id: String },
    #[error("resource not found")]
    NotFound,
}

/// A single atomic mutation of a stored post.
#[derive(Debug, Clone)]
pub enum PostChange {
    Like,
    Share,
    Boost,
    AddComment(CommentRecord),
}

impl PostChange {
    pub fn apply(self, post: &mut PostRecord) {
        match self {
            PostChange::Like => post.likes = post.likes.saturating_add(1),
            PostChange::Share => post.shares = post.shares.saturating_add(1),
            PostChange::Boost => post.boosted = true,
            PostChange::AddComment(comment) => post.comments.push(comment),
        }
    }
}

#[async_trait]
pub trait PostsRepo: Send + Sync {
    /// All posts in store order.
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError>;

    async fn find_post(&self, id: &str) -> Result<Option<PostRecord>, RepoError>;

    async fn insert_post(&self, post: PostRecord) -> Result<PostRecord, RepoError>;

    /// Returns the post after the change, or `RepoError::NotFound`.
    async fn update_post(&self, id: &str, change: PostChange) -> Result<PostRecord, RepoError>;
}

#[async_trait]
pub trait UsersRepo: Send + Sync {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepoError>;

    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, RepoError>;
}

#[async_trait]
pub trait ContactRepo: Send + Sync {
    async fn record_submission(&self, submission: ContactSubmission) -> Result<(), RepoError>;

    async fn count_submissions(&self) -> Result<usize, RepoError>;
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;
    use crate::domain::entities::AuthorRef;

    fn blank_post() -> PostRecord {
        PostRecord {
            id: "1".to_string(),
            content: "Hej".to_string(),
            author: AuthorRef {
                id: "1".to_string(),
                name: "Mette".to_string(),
                avatar: None,
            },
            created_at: datetime!(2024-01-01 0:00 UTC),
            likes: u32::MAX,
            shares: 0,
            boosted: false,
            job: None,
            comments: Vec::new(),
        }
    }

    #[test]
    fn counters_saturate_instead_of_wrapping() {
        let mut post = blank_post();
        PostChange::Like.apply(&mut post);
        assert_eq!(post.likes, u32::MAX);
    }

    #[test]
    fn boost_is_idempotent() {
        let mut post = blank_post();
        PostChange::Boost.apply(&mut post);
        PostChange::Boost.apply(&mut post);
        assert!(post.boosted);
        PostChange::Share.apply(&mut post);
        assert_eq!(post.shares, 1);
    }
}
