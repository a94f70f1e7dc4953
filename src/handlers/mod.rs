pub mod fee_rules;
pub mod health;
pub mod platform_fees;

use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::services::ServiceError;

/// Single place where service errors become HTTP responses. Validation and
/// not-found carry their message; everything else turns into a generic 500 so
/// internal detail never leaks.
pub(crate) fn error_response(err: &ServiceError) -> (StatusCode, Json<Value>) {
    match err {
        ServiceError::Validation(message) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "message": message })))
        }
        ServiceError::NotFound(message) => {
            (StatusCode::NOT_FOUND, Json(json!({ "message": message })))
        }
        other => {
            error!("Unhandled service error: {}", other);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "An unexpected error has occurred." })),
            )
        }
    }
}
