//! Domain entities held by the marketplace store.

use rengoring_api_types::{AuthorView, CommentView, JobDetailsView, PostView, UserView};
use time::OffsetDateTime;

use crate::domain::types::Urgency;

#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub location: String,
    pub rating: f32,
    pub is_pro: bool,
    pub verified: bool,
    pub member_since: OffsetDateTime,
}

impl UserRecord {
    pub fn author_ref(&self) -> AuthorRef {
        AuthorRef {
            id: self.id.clone(),
            name: self.name.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

/// Denormalised author snapshot stored on posts and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorRef {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDetails {
    /// Budget in whole Danish kroner.
    pub budget: u32,
    pub urgency: Urgency,
    pub job_type: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentRecord {
    pub id: String,
    pub author: AuthorRef,
    pub text: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRecord {
    pub id: String,
    pub content: String,
    pub author: AuthorRef,
    pub created_at: OffsetDateTime,
    pub likes: u32,
    pub shares: u32,
    pub boosted: bool,
    pub job: Option<JobDetails>,
    pub comments: Vec<CommentRecord>,
}

impl PostRecord {
    /// Posts carrying job metadata are job listings.
    pub fn is_job(&self) -> bool {
        self.job.is_some()
    }
}

impl From<&AuthorRef> for AuthorView {
    fn from(author: &AuthorRef) -> Self {
        AuthorView {
            id: author.id.clone(),
            name: author.name.clone(),
            avatar: author.avatar.clone(),
        }
    }
}

impl From<&CommentRecord> for CommentView {
    fn from(comment: &CommentRecord) -> Self {
        CommentView {
            id: comment.id.clone(),
            author: AuthorView::from(&comment.author),
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}

impl From<&JobDetails> for JobDetailsView {
    fn from(job: &JobDetails) -> Self {
        JobDetailsView {
            budget: job.budget,
            urgency: job.urgency,
            job_type: job.job_type.clone(),
            location: job.location.clone(),
        }
    }
}

impl From<&PostRecord> for PostView {
    fn from(post: &PostRecord) -> Self {
        PostView {
            id: post.id.clone(),
            content: post.content.clone(),
            author: AuthorView::from(&post.author),
            created_at: post.created_at,
            likes: post.likes,
            shares: post.shares,
            boosted: post.boosted,
            job: post.job.as_ref().map(JobDetailsView::from),
            comments: post.comments.iter().map(CommentView::from).collect(),
        }
    }
}

impl From<&UserRecord> for UserView {
    fn from(user: &UserRecord) -> Self {
        UserView {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            location: user.location.clone(),
            rating: user.rating,
            is_pro: user.is_pro,
            verified: user.verified,
            member_since: user.member_since,
        }
    }
}
