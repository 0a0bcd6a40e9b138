use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::application::repos::{PostsRepo, RepoError};
use crate::domain::entities::PostRecord;
use crate::domain::feed::{self, FeedCriteria};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error(transparent)]
    Repo(#[from] RepoError),
}

#[derive(Clone)]
pub struct FeedService {
    posts: Arc<dyn PostsRepo>,
}

impl FeedService {
    pub fn new(posts: Arc<dyn PostsRepo>) -> Self {
        Self { posts }
    }

    /// Load every post and derive the visible, ordered feed.
    pub async fn list(&self, criteria: &FeedCriteria) -> Result<Vec<PostRecord>, FeedError> {
        let posts = self.posts.list_posts().await?;
        let total = posts.len();
        let visible = feed::compose(posts, criteria);

        debug!(
            target = "rengoring::feed",
            query = criteria.query(),
            category = criteria.category.as_str(),
            sort = criteria.sort.as_str(),
            total,
            visible = visible.len(),
            "feed composed"
        );

        Ok(visible)
    }
}
