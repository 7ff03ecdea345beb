//! Response shapes.
//!
//! # Responsibilities
//! - Build the three terminal responses a request can receive
//! - Set `Content-Type: application/json` on JSON bodies
//!
//! Every request ends in exactly one of these; there are no partial or
//! streamed responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};

/// 200 with the delegate's result as the JSON body.
pub fn delegate_result(result: Value) -> Response {
    (StatusCode::OK, Json(result)).into_response()
}

/// 500 with `{"error": <message>}`.
///
/// Used for malformed payloads and delegate failures alike; the message is
/// the error's Display string, never its structure.
pub fn invoke_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}

/// 501 with an empty body, for any method other than POST.
pub fn not_implemented() -> Response {
    StatusCode::NOT_IMPLEMENTED.into_response()
}
