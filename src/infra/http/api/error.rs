use crate::application::error::ErrorReport;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorMessage,
}

pub mod codes {
    pub const BAD_REQUEST: &str = "bad_request";
    pub const INVALID_JSON: &str = "invalid_json";
    pub const INVALID_QUERY: &str = "invalid_query";
    pub const VALIDATION: &str = "validation_error";
    pub const UNAUTHORIZED: &str = "unauthorized";
    pub const TOKEN_EXPIRED: &str = "token_expired";
    pub const NOT_FOUND: &str = "not_found";
    pub const UNKNOWN_ACTION: &str = "unknown_action";
    pub const METHOD_NOT_ALLOWED: &str = "method_not_allowed";
    pub const RATE_LIMITED: &str = "rate_limited";
    pub const INTERNAL: &str = "internal_error";
}

/// Client-facing messages. The browser client shows these verbatim.
pub mod messages {
    pub const UNAUTHORIZED: &str = "Du skal være logget ind for at fortsætte";
    pub const TOKEN_EXPIRED: &str = "Din session er udløbet. Log venligst ind igen";
    pub const INVALID_JSON: &str = "Ugyldig forespørgsel";
    pub const INVALID_QUERY: &str = "Ugyldige søgeparametre";
    pub const INVALID_POST: &str = "Opslaget er ugyldigt";
    pub const INVALID_COMMENT: &str = "Kommentaren er ugyldig";
    pub const POST_NOT_FOUND: &str = "Opslaget blev ikke fundet";
    pub const USER_NOT_FOUND: &str = "Brugeren blev ikke fundet";
    pub const UNKNOWN_ACTION: &str = "Ukendt handling";
    pub const METHOD_NOT_ALLOWED: &str = "Metoden er ikke tilladt";
    pub const CONTACT_MISSING_FIELDS: &str = "Alle felter skal udfyldes";
    pub const CONTACT_INVALID_EMAIL: &str = "Ugyldig e-mailadresse";
    pub const CONTACT_INVALID_PRIORITY: &str = "Ugyldig prioritet";
    pub const RATE_LIMITED: &str = "For mange forespørgsler. Prøv igen om lidt";
    pub const INTERNAL: &str = "Der opstod en fejl på serveren. Prøv igen senere";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorMessage {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
    hint: Option<String>,
    /// Server-side detail; logged, never sent.
    detail: Option<String>,
}

impl ApiError {
    pub fn new(
        status: StatusCode,
        code: &'static str,
        message: &'static str,
        hint: Option<String>,
    ) -> Self {
        Self {
            status,
            code,
            message,
            hint,
            detail: None,
        }
    }

    pub fn bad_request(code: &'static str, message: &'static str, hint: Option<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, code, message, hint)
    }

    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::UNAUTHORIZED,
            messages::UNAUTHORIZED,
            None,
        )
    }

    pub fn token_expired() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            codes::TOKEN_EXPIRED,
            messages::TOKEN_EXPIRED,
            None,
        )
    }

    pub fn not_found(message: &'static str) -> Self {
        Self::new(StatusCode::NOT_FOUND, codes::NOT_FOUND, message, None)
    }

    pub fn unknown_action(action: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            codes::UNKNOWN_ACTION,
            messages::UNKNOWN_ACTION,
            Some(format!("supported actions: share, boost (got `{action}`)")),
        )
    }

    pub fn method_not_allowed() -> Self {
        Self::new(
            StatusCode::METHOD_NOT_ALLOWED,
            codes::METHOD_NOT_ALLOWED,
            messages::METHOD_NOT_ALLOWED,
            None,
        )
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                codes::INTERNAL,
                messages::INTERNAL,
                None,
            )
        }
    }

    pub fn rate_limited(retry_after: u64) -> Response {
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: codes::RATE_LIMITED.to_string(),
                message: messages::RATE_LIMITED.to_string(),
                hint: Some(format!("Retry after {retry_after} seconds")),
            },
        };
        let mut response = (StatusCode::TOO_MANY_REQUESTS, Json(body)).into_response();
        if let Ok(value) = axum::http::HeaderValue::from_str(&retry_after.to_string()) {
            response
                .headers_mut()
                .insert(axum::http::header::RETRY_AFTER, value);
        }
        ErrorReport::from_message(
            "infra::http::api::rate_limit",
            StatusCode::TOO_MANY_REQUESTS,
            format!("rate_limited: retry_after={retry_after}"),
        )
        .attach(&mut response);
        response
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let diagnostic = self
            .detail
            .clone()
            .or_else(|| self.hint.clone())
            .unwrap_or_else(|| self.message.to_string());
        let body = ApiErrorBody {
            error: ApiErrorMessage {
                code: self.code.to_string(),
                message: self.message.to_string(),
                hint: self.hint,
            },
        };
        let mut response = (self.status, Json(body)).into_response();
        ErrorReport::from_message(
            "infra::http::api",
            self.status,
            format!("{}: {diagnostic}", self.code),
        )
        .attach(&mut response);
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn internal_errors_keep_details_out_of_the_body() {
        let response = ApiError::internal("lock poisoned").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let report = response
            .extensions()
            .get::<ErrorReport>()
            .expect("report attached");
        assert_eq!(report.messages, vec!["internal_error: lock poisoned"]);
    }

    #[test]
    fn rate_limited_sets_retry_after() {
        let response = ApiError::rate_limited(30);
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::RETRY_AFTER)
                .and_then(|value| value.to_str().ok()),
            Some("30")
        );
    }
}
