//! API handlers organized by resource.
//!
//! Shared query structs and the error conversions used across modules live here.

mod contact;
mod dashboard;
mod posts;
mod users;

pub use contact::*;
pub use dashboard::*;
pub use posts::*;
pub use users::*;

// ----- Shared query structs -----

use serde::Deserialize;

use crate::domain::types::{FeedCategory, FeedSort};

#[derive(Debug, Default, Deserialize)]
pub struct FeedQuery {
    #[serde(alias = "search")]
    pub q: Option<String>,
    pub category: Option<FeedCategory>,
    pub sort: Option<FeedSort>,
}

// ----- Shared error conversions -----

/// Installed as the method-not-allowed fallback for every API route.
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

use axum::extract::rejection::{JsonRejection, QueryRejection};

use crate::application::contact::ContactError;
use crate::application::feed::FeedError;
use crate::application::posts::PostServiceError;
use crate::application::repos::RepoError;
use crate::domain::contact::ContactValidationError;
use crate::domain::error::DomainError;

use super::error::{ApiError, codes, messages};

pub(crate) fn json_to_api(rejection: JsonRejection) -> ApiError {
    ApiError::bad_request(
        codes::INVALID_JSON,
        messages::INVALID_JSON,
        Some(rejection.body_text()),
    )
}

pub(crate) fn query_to_api(rejection: QueryRejection) -> ApiError {
    ApiError::bad_request(
        codes::INVALID_QUERY,
        messages::INVALID_QUERY,
        Some(rejection.body_text()),
    )
}

/// `not_found` is the client message for the resource the caller looked up.
pub(crate) fn repo_to_api(err: RepoError, not_found: &'static str) -> ApiError {
    match err {
        RepoError::NotFound => ApiError::not_found(not_found),
        other => ApiError::internal(other.to_string()),
    }
}

pub(crate) fn feed_to_api(err: FeedError) -> ApiError {
    match err {
        FeedError::Repo(repo) => repo_to_api(repo, messages::POST_NOT_FOUND),
    }
}

fn validation_hint(err: &DomainError) -> Option<String> {
    match err {
        DomainError::Validation { field, message } => Some(format!("{field}: {message}")),
    }
}

pub(crate) fn post_to_api(err: PostServiceError) -> ApiError {
    match err {
        PostServiceError::Validation(domain) => ApiError::bad_request(
            codes::VALIDATION,
            messages::INVALID_POST,
            validation_hint(&domain),
        ),
        PostServiceError::NotFound(_) => ApiError::not_found(messages::POST_NOT_FOUND),
        PostServiceError::Repo(repo) => repo_to_api(repo, messages::POST_NOT_FOUND),
    }
}

pub(crate) fn comment_to_api(err: PostServiceError) -> ApiError {
    match err {
        PostServiceError::Validation(domain) => ApiError::bad_request(
            codes::VALIDATION,
            messages::INVALID_COMMENT,
            validation_hint(&domain),
        ),
        other => post_to_api(other),
    }
}

pub(crate) fn contact_to_api(err: ContactError) -> ApiError {
    match err {
        ContactError::Validation(ContactValidationError::MissingFields(fields)) => {
            ApiError::bad_request(
                codes::VALIDATION,
                messages::CONTACT_MISSING_FIELDS,
                Some(format!("missing: {}", fields.join(", "))),
            )
        }
        ContactError::Validation(ContactValidationError::InvalidEmail(_)) => {
            ApiError::bad_request(codes::VALIDATION, messages::CONTACT_INVALID_EMAIL, None)
        }
        ContactError::Validation(ContactValidationError::UnknownPriority(value)) => {
            ApiError::bad_request(
                codes::VALIDATION,
                messages::CONTACT_INVALID_PRIORITY,
                Some(format!("expected low, normal, high or urgent (got `{value}`)")),
            )
        }
        ContactError::Repo(repo) => ApiError::internal(repo.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    use super::*;
    use crate::application::error::ErrorReport;

    #[test]
    fn repo_not_found_uses_the_callers_message() {
        let response = repo_to_api(RepoError::NotFound, messages::USER_NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("report attached");
        assert_eq!(report.messages, vec!["not_found: Brugeren blev ikke fundet"]);
    }

    #[test]
    fn other_repo_errors_are_internal() {
        let err = RepoError::Duplicate {
            id: "7".to_string(),
        };
        let response = repo_to_api(err, messages::POST_NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
