//! Error-to-response conversion.
//!
//! Every handler failure goes through [`error_response`] so callers always
//! see the same `{ error, message }` shape. Internal details are logged,
//! never returned.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use duka_shared::AppError;

/// Renders an [`AppError`] as a JSON error response.
pub fn error_response(err: &AppError) -> Response {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match err {
        AppError::Database(_) | AppError::Internal(_) => {
            error!(error = %err, "Internal failure");
            "An error occurred".to_string()
        }
        other => other.to_string(),
    };

    (
        status,
        Json(json!({ "error": err.error_code(), "message": message })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_details_are_hidden() {
        let response = error_response(&AppError::Database("connection refused".into()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_status_mapping() {
        let response = error_response(&AppError::InsufficientStock("have 5".into()));
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = error_response(&AppError::NotFound("product".into()));
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
