//! Outcome classification
//!
//! One generic classifier maps every data-access result onto an HTTP
//! response. Handlers never pick status codes themselves; they hand the
//! query result here together with a subject label for the messages.
//! Connection failures become 500 with a fixed detail, ordering validation
//! failures become 400 with a fixed parameter message, any other storage
//! fault becomes a generic 500 with the cause logged server-side, and an
//! empty result is an informational 200, never an error.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use partsbin_database::QueryError;
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use tracing::error;

/// 400 with the standard error body shape.
pub fn bad_request(message: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Classify a list-returning operation. An empty page is not an error.
pub fn list<T: Serialize>(
    operation: &str,
    subject: &str,
    result: Result<Vec<T>, QueryError>,
) -> Response {
    match result {
        Ok(items) if items.is_empty() => empty_ok(subject),
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(err) => error_response(operation, err),
    }
}

/// Classify a single-record read. A missing record is not an error.
pub fn one<T: Serialize>(
    operation: &str,
    subject: &str,
    result: Result<Option<T>, QueryError>,
) -> Response {
    match result {
        Ok(Some(item)) => (StatusCode::OK, Json(item)).into_response(),
        Ok(None) => empty_ok(subject),
        Err(err) => error_response(operation, err),
    }
}

/// Classify a create. The created record is returned as the body.
pub fn created<T: Serialize>(operation: &str, result: Result<T, QueryError>) -> Response {
    match result {
        Ok(item) => (StatusCode::OK, Json(item)).into_response(),
        Err(err) => error_response(operation, err),
    }
}

/// Classify a write acknowledged under a wrapper key, e.g.
/// `{"objectUpdated": ...}` or `{"objectDeleted": ...}`.
pub fn acknowledged<T: Serialize>(
    operation: &str,
    key: &str,
    subject: &str,
    result: Result<Option<T>, QueryError>,
) -> Response {
    match result {
        Ok(Some(item)) => (StatusCode::OK, Json(json!({ key: item }))).into_response(),
        Ok(None) => empty_ok(subject),
        Err(err) => error_response(operation, err),
    }
}

fn empty_ok(subject: &str) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "ok": format!("No items found according to {subject}.") })),
    )
        .into_response()
}

fn error_response(operation: &str, err: QueryError) -> Response {
    match &err {
        QueryError::InvalidSortField | QueryError::InvalidSortDirection => {
            bad_request(&err.to_string())
        }
        QueryError::Unavailable | QueryError::Refused { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": err.to_string() })),
        )
            .into_response(),
        QueryError::Internal(cause) => {
            // Full detail stays server-side; the caller gets a generic message.
            error!("ERROR in {operation}. Caused by {cause}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": format!("ERROR in {operation}.") })),
            )
                .into_response()
        }
    }
}

/// Last-resort boundary: a panicking handler becomes a 500, never a dead
/// process.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic".to_string()
    };
    error!("Unhandled fault while serving request: {detail}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Internal server error." })),
    )
        .into_response()
}
