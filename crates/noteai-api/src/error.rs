//! HTTP error mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use noteai_core::Error;

pub const QUOTA_EXCEEDED_MESSAGE: &str = "AI rate limit or quota exceeded, please try again later";
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str = "AI service unavailable (all models returned errors)";
pub const UNEXPECTED_MESSAGE: &str = "AI processing failed unexpectedly";

/// Error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
    QuotaExceeded { details: String },
    ProviderUnavailable { details: String },
    Unexpected { details: String },
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::Validation(msg) => ApiError::BadRequest(msg),
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::Config(msg) => ApiError::Internal(msg),
            Error::QuotaExceeded { details } => ApiError::QuotaExceeded { details },
            Error::ProviderUnavailable { details } => ApiError::ProviderUnavailable { details },
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg, None),
            ApiError::QuotaExceeded { details } => (
                StatusCode::TOO_MANY_REQUESTS,
                QUOTA_EXCEEDED_MESSAGE.to_string(),
                Some(details),
            ),
            ApiError::ProviderUnavailable { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                PROVIDER_UNAVAILABLE_MESSAGE.to_string(),
                Some(details),
            ),
            ApiError::Unexpected { details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                UNEXPECTED_MESSAGE.to_string(),
                Some(details),
            ),
        };

        if status.is_server_error() {
            tracing::error!(
                status = status.as_u16(),
                error = %error,
                details = ?details,
                "Request failed"
            );
        }

        (status, Json(ErrorBody { error, details })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        assert!(matches!(
            ApiError::from(Error::Validation("Content is required".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(Error::NotFound("note".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(Error::QuotaExceeded { details: "[429] x".into() }),
            ApiError::QuotaExceeded { .. }
        ));
        assert!(matches!(
            ApiError::from(Error::SchemaMismatch("column".into())),
            ApiError::Internal(_)
        ));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ApiError::QuotaExceeded { details: "x".into() },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (
                ApiError::ProviderUnavailable { details: "x".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Unexpected { details: "x".into() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
