// api-gateway-rs/src/summarize.rs
//
// POST /summarize - validate the body, run the analyzer, attach the request id
//
// Only metadata (sizes, confidence) is logged; the log payload itself never is.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::HeaderMap,
    Extension, Json,
};
use http_body_util::LengthLimitError;
use shared_types::SummarizeResponse;

use crate::error::ApiError;
use crate::request_id::RequestId;
use crate::validation::{exceeds_payload_limit, parse_summarize_request, MAX_PAYLOAD_SIZE};
use crate::AppState;

pub async fn summarize_handler(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<SummarizeResponse>, ApiError> {
    tracing::info!(request_id = %request_id, "[{}] Summarize request received", request_id);

    // Declared lengths are rejected up front; undeclared ones trip the read limit.
    if exceeds_payload_limit(&headers) {
        return Err(payload_too_large(&request_id));
    }

    let bytes = to_bytes(body, MAX_PAYLOAD_SIZE).await.map_err(|err| {
        if is_length_limit(err) {
            payload_too_large(&request_id)
        } else {
            ApiError::Internal("failed to read request body".to_string())
        }
    })?;

    let request = parse_summarize_request(&bytes).map_err(|issues| {
        tracing::warn!(
            request_id = %request_id,
            issues = issues.len(),
            "[{}] Summarize request rejected by validation",
            request_id
        );
        ApiError::InvalidRequest {
            request_id: request_id.clone(),
            issues,
        }
    })?;

    tracing::info!(
        request_id = %request_id,
        "[{}] Processing {} characters of log data",
        request_id,
        request.logs.chars().count()
    );

    let result = state.analyzer.analyze(&request.logs).await;

    tracing::info!(
        request_id = %request_id,
        "[{}] Summarization completed with confidence {}",
        request_id,
        result.confidence
    );

    Ok(Json(SummarizeResponse::new(result, request_id.as_str())))
}

fn payload_too_large(request_id: &RequestId) -> ApiError {
    tracing::warn!(request_id = %request_id, "[{}] Request body exceeds {} bytes", request_id, MAX_PAYLOAD_SIZE);
    ApiError::PayloadTooLarge {
        request_id: request_id.clone(),
    }
}

fn is_length_limit(err: axum::Error) -> bool {
    let source = err.into_inner();
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(source.as_ref());
    while let Some(err) = current {
        if err.is::<LengthLimitError>() {
            return true;
        }
        current = err.source();
    }
    false
}
