//! Last-resort error boundary
//!
//! Catches handler panics and responses flagged with [`UnhandledError`], logs
//! the message with the request id, and replies with a generic 500 envelope.
//! The underlying message never reaches the response body.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    http::{header::CONTENT_TYPE, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use futures_util::FutureExt;
use shared_types::ErrorEnvelope;

use crate::error::{UnhandledError, INTERNAL_ERROR_MESSAGE};
use crate::request_id::{RequestId, UNKNOWN_REQUEST_ID};

/// Middleware converting unhandled failures into the uniform 500 envelope
pub async fn handle_unhandled_errors(request: Request, next: Next) -> Response {
    let request_id = request
        .extensions()
        .get::<RequestId>()
        .map(|id| id.to_string())
        .unwrap_or_else(|| UNKNOWN_REQUEST_ID.to_string());

    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => {
            let message = match response.extensions().get::<UnhandledError>() {
                Some(unhandled) => unhandled.message.clone(),
                None => return response,
            };

            // A rendered body means the response is already committed.
            if is_committed(&response) {
                tracing::error!(request_id = %request_id, "[{}] Error after response was rendered: {}", request_id, message);
                return response;
            }

            tracing::error!(request_id = %request_id, "[{}] Error: {}", request_id, message);
            internal_error_response(&request_id)
        }
        Err(panic) => {
            tracing::error!(
                request_id = %request_id,
                "[{}] Error: {}",
                request_id,
                panic_message(panic.as_ref())
            );
            internal_error_response(&request_id)
        }
    }
}

fn is_committed(response: &Response) -> bool {
    response.headers().contains_key(CONTENT_TYPE)
}

fn internal_error_response(request_id: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorEnvelope::new(INTERNAL_ERROR_MESSAGE).with_request_id(request_id)),
    )
        .into_response()
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else {
        "handler panicked".to_string()
    }
}
