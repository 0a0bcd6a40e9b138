//! Process-local repositories backing every repository trait.
//!
//! State lives for the lifetime of the process. Each collection sits behind its
//! own `RwLock`; every mutation is one write-locked critical section.

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::info;

use crate::application::repos::{ContactRepo, PostChange, PostsRepo, RepoError, UsersRepo};
use crate::domain::contact::ContactSubmission;
use crate::domain::entities::{PostRecord, UserRecord};
use crate::domain::seed;

#[derive(Debug, Default)]
pub struct InMemoryRepositories {
    users: RwLock<Vec<UserRecord>>,
    posts: RwLock<Vec<PostRecord>>,
    contacts: RwLock<Vec<ContactSubmission>>,
}

impl InMemoryRepositories {
    pub fn new(users: Vec<UserRecord>, posts: Vec<PostRecord>) -> Self {
        Self {
            users: RwLock::new(users),
            posts: RwLock::new(posts),
            contacts: RwLock::new(Vec::new()),
        }
    }

    /// Store preloaded with the mock marketplace data.
    pub fn seeded() -> Self {
        let users = seed::users();
        let posts = seed::posts();
        info!(
            target = "rengoring::store",
            users = users.len(),
            posts = posts.len(),
            "seeded in-memory store"
        );
        Self::new(users, posts)
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostsRepo for InMemoryRepositories {
    async fn list_posts(&self) -> Result<Vec<PostRecord>, RepoError> {
        Ok(self.posts.read().await.clone())
    }

    async fn find_post(&self, id: &str) -> Result<Option<PostRecord>, RepoError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn insert_post(&self, post: PostRecord) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|existing| existing.id == post.id) {
            return Err(RepoError::Duplicate { id: post.id });
        }
        posts.push(post.clone());
        Ok(post)
    }

    async fn update_post(&self, id: &str, change: PostChange) -> Result<PostRecord, RepoError> {
        let mut posts = self.posts.write().await;
        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or(RepoError::NotFound)?;
        change.apply(post);
        Ok(post.clone())
    }
}

#[async_trait]
impl UsersRepo for InMemoryRepositories {
    async fn list_users(&self) -> Result<Vec<UserRecord>, RepoError> {
        Ok(self.users.read().await.clone())
    }

    async fn find_user(&self, id: &str) -> Result<Option<UserRecord>, RepoError> {
        let users = self.users.read().await;
        Ok(users.iter().find(|user| user.id == id).cloned())
    }
}

#[async_trait]
impl ContactRepo for InMemoryRepositories {
    async fn record_submission(&self, submission: ContactSubmission) -> Result<(), RepoError> {
        self.contacts.write().await.push(submission);
        Ok(())
    }

    async fn count_submissions(&self) -> Result<usize, RepoError> {
        Ok(self.contacts.read().await.len())
    }
}
