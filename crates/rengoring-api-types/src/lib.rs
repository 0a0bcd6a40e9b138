//! Wire types shared between the Privat Rengøring API server and its clients.
//!
//! Field names are camelCase to match the browser client.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

// ----- Enumerations -----

/// Which slice of the feed to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedCategory {
    #[default]
    All,
    Jobs,
    Posts,
}

/// Ordering applied to the feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedSort {
    #[default]
    Newest,
    Oldest,
    Popular,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactPriority {
    Low,
    #[default]
    Normal,
    High,
    Urgent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant(pub String);

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown value `{}`", self.0)
    }
}

impl std::error::Error for UnknownVariant {}

impl ContactPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            ContactPriority::Low => "low",
            ContactPriority::Normal => "normal",
            ContactPriority::High => "high",
            ContactPriority::Urgent => "urgent",
        }
    }
}

impl FromStr for ContactPriority {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ContactPriority::Low),
            "normal" | "medium" => Ok(ContactPriority::Normal),
            "high" => Ok(ContactPriority::High),
            "urgent" => Ok(ContactPriority::Urgent),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

impl FeedSort {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedSort::Newest => "newest",
            FeedSort::Oldest => "oldest",
            FeedSort::Popular => "popular",
        }
    }
}

impl FeedCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            FeedCategory::All => "all",
            FeedCategory::Jobs => "jobs",
            FeedCategory::Posts => "posts",
        }
    }
}

// ----- Requests -----

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailsRequest {
    pub budget: u32,
    #[serde(default)]
    pub urgency: Urgency,
    pub job_type: String,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostCreateRequest {
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub job: Option<JobDetailsRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommentCreateRequest {
    #[serde(default)]
    pub text: String,
}

/// Contact form body. Missing fields deserialize as empty so that validation,
/// not the JSON decoder, decides the response.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub priority: Option<String>,
}

// ----- Views -----

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorView {
    pub id: String,
    pub name: String,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub author: AuthorView,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDetailsView {
    pub budget: u32,
    pub urgency: Urgency,
    pub job_type: String,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    pub id: String,
    pub content: String,
    pub author: AuthorView,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub likes: u32,
    pub shares: u32,
    pub boosted: bool,
    pub job: Option<JobDetailsView>,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar: Option<String>,
    pub location: String,
    pub rating: f32,
    pub is_pro: bool,
    pub verified: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub member_since: OffsetDateTime,
}

// ----- Responses -----

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub posts: Vec<PostView>,
    pub total: usize,
}

/// Envelope returned by post mutations (create, share, boost, like).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostActionResponse {
    pub success: bool,
    pub message: String,
    pub post: PostView,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreatedResponse {
    pub success: bool,
    pub message: String,
    pub comment: CommentView,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    pub reference: Uuid,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    pub users: Vec<UserView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummaryView {
    pub users: usize,
    pub pro_users: usize,
    pub verified_users: usize,
    pub posts: usize,
    pub job_posts: usize,
    pub boosted_posts: usize,
    pub total_likes: u64,
    pub total_comments: usize,
    pub contact_submissions: usize,
}
