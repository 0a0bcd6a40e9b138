//! Validation rules for user-authored posts and comments.

use crate::domain::entities::JobDetails;
use crate::domain::error::DomainError;
use crate::domain::types::Urgency;

pub const MAX_CONTENT_CHARS: usize = 5000;
pub const MAX_COMMENT_CHARS: usize = 1000;
pub const MAX_JOB_TYPE_CHARS: usize = 80;

/// Trim and bound post content.
pub fn normalize_content(content: &str) -> Result<String, DomainError> {
    bounded_text("content", content, MAX_CONTENT_CHARS)
}

pub fn normalize_comment(text: &str) -> Result<String, DomainError> {
    bounded_text("text", text, MAX_COMMENT_CHARS)
}

pub fn normalize_job(
    budget: u32,
    urgency: Urgency,
    job_type: &str,
    location: Option<&str>,
) -> Result<JobDetails, DomainError> {
    let job_type = bounded_text("job.jobType", job_type, MAX_JOB_TYPE_CHARS)?;
    let location = location
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string);

    Ok(JobDetails {
        budget,
        urgency,
        job_type,
        location,
    })
}

fn bounded_text(field: &'static str, value: &str, max_chars: usize) -> Result<String, DomainError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(field, "must not be empty"));
    }
    if trimmed.chars().count() > max_chars {
        return Err(DomainError::validation(
            field,
            format!("must be at most {max_chars} characters"),
        ));
    }
    Ok(trimmed.to_string())
}
