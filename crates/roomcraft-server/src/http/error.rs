//! API errors with proper HTTP status codes and JSON error bodies.

use axum::{http::StatusCode, response::IntoResponse, Json};

use crate::http::responses::ErrorResponse;

/// API errors surfaced to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    /// Unknown job/design/room id.
    NotFound { resource: &'static str, id: String },

    /// Malformed request payload.
    BadRequest { message: String },

    /// Upload content type not accepted.
    UnsupportedMediaType { content_type: String },

    /// Upload exceeds the configured size limit.
    PayloadTooLarge { limit_mb: usize },

    /// The provider failed a synchronous call.
    Provider { message: String },

    /// Internal server error.
    Internal { message: String },
}

impl ApiError {
    /// Convenience constructor for unknown-id errors.
    pub fn not_found(resource: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    /// Convenience constructor for malformed payloads.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ApiError::NotFound { resource, id } => (
                StatusCode::NOT_FOUND,
                format!("{resource} not found: {id}"),
            ),
            ApiError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            ApiError::UnsupportedMediaType { content_type } => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported file type: {content_type}"),
            ),
            ApiError::PayloadTooLarge { limit_mb } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("File exceeds {limit_mb} MB limit"),
            ),
            ApiError::Provider { message } => (StatusCode::BAD_GATEWAY, message),
            ApiError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let response = ApiError::not_found("Design", "d-42").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_payload_too_large_status() {
        let response = ApiError::PayloadTooLarge { limit_mb: 10 }.into_response();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
