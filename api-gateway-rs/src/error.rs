// api-gateway-rs/src/error.rs
// Handler errors and their HTTP rendering

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared_types::{ErrorEnvelope, ValidationIssue};

use crate::request_id::RequestId;

pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";
pub const PAYLOAD_TOO_LARGE_MESSAGE: &str = "Request payload too large";
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";
pub const ROUTE_NOT_FOUND_MESSAGE: &str = "Route not found";

/// Errors returned by request handlers
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid request data")]
    InvalidRequest {
        request_id: RequestId,
        issues: Vec<ValidationIssue>,
    },

    #[error("Request payload too large")]
    PayloadTooLarge { request_id: RequestId },

    /// Anything unexpected; rendered by the error middleware
    #[error("{0}")]
    Internal(String),
}

/// Marker carried in response extensions for failures the error middleware must render
#[derive(Debug, Clone)]
pub struct UnhandledError {
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidRequest { request_id, issues } => (
                StatusCode::BAD_REQUEST,
                Json(
                    ErrorEnvelope::new(INVALID_REQUEST_MESSAGE)
                        .with_details(issues)
                        .with_request_id(request_id.as_str()),
                ),
            )
                .into_response(),
            Self::PayloadTooLarge { request_id } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                Json(ErrorEnvelope::new(PAYLOAD_TOO_LARGE_MESSAGE).with_request_id(request_id.as_str())),
            )
                .into_response(),
            Self::Internal(message) => {
                let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
                response.extensions_mut().insert(UnhandledError { message });
                response
            }
        }
    }
}

/// Errors raised while assembling the server
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Invalid CORS origin '{0}'")]
    InvalidOrigin(String),

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header::CONTENT_TYPE;

    #[test]
    fn test_internal_error_is_deferred_to_middleware() {
        let response = ApiError::Internal("db exploded".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(response.headers().get(CONTENT_TYPE).is_none());

        let marker = response.extensions().get::<UnhandledError>().unwrap();
        assert_eq!(marker.message, "db exploded");
    }

    #[test]
    fn test_invalid_request_status() {
        let response = ApiError::InvalidRequest {
            request_id: RequestId::generate(),
            issues: vec![ValidationIssue::new("/logs", "Required")],
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
