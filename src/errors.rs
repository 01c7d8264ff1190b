use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// One failed field check, reported back to the form.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("validation failed")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    Conflict(String),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(errors) => {
                let message = errors
                    .first()
                    .map(|e| e.message.clone())
                    .unwrap_or_else(|| "Invalid request.".to_string());
                (
                    StatusCode::BAD_REQUEST,
                    serde_json::json!({ "message": message, "errors": errors }),
                )
            }
            AppError::Conflict(message) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "message": message }),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "message": self.to_string() }),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}
