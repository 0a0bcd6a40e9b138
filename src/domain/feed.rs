//! Feed composition: free-text search, category filter and ordering.

use crate::domain::entities::PostRecord;
use crate::domain::types::{FeedCategory, FeedSort};

/// Criteria that turn the stored post list into the rendered feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedCriteria {
    query: String,
    pub category: FeedCategory,
    pub sort: FeedSort,
}

impl FeedCriteria {
    pub fn new(query: Option<&str>, category: FeedCategory, sort: FeedSort) -> Self {
        Self {
            query: query.map(|q| q.trim().to_lowercase()).unwrap_or_default(),
            category,
            sort,
        }
    }

    /// The normalised (trimmed, lower-cased) search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self, post: &PostRecord) -> bool {
        matches_category(post, self.category) && matches_query(post, &self.query)
    }
}

fn matches_category(post: &PostRecord, category: FeedCategory) -> bool {
    match category {
        FeedCategory::All => true,
        FeedCategory::Jobs => post.is_job(),
        FeedCategory::Posts => !post.is_job(),
    }
}

/// `needle` must already be lower-cased.
fn matches_query(post: &PostRecord, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    post.content.to_lowercase().contains(needle) || post.author.name.to_lowercase().contains(needle)
}

/// Stable sort; equal keys keep their incoming order.
pub fn sort_posts(posts: &mut [PostRecord], sort: FeedSort) {
    match sort {
        FeedSort::Newest => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        FeedSort::Oldest => posts.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
        FeedSort::Popular => posts.sort_by(|a, b| b.likes.cmp(&a.likes)),
    }
}

/// Filter then sort.
pub fn compose(posts: Vec<PostRecord>, criteria: &FeedCriteria) -> Vec<PostRecord> {
    let mut visible: Vec<PostRecord> = posts
        .into_iter()
        .filter(|post| criteria.matches(post))
        .collect();
    sort_posts(&mut visible, criteria.sort);
    visible
}
