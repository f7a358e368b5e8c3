use adventure_core::CoreError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub const GENERATION_FAILED: &str = "An error occurred while generating suggestions";

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    GenerationError(CoreError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::GenerationError(err) => {
                tracing::error!("Suggestion generation failed: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERATION_FAILED.to_string())
            },
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(msg) => Self::ValidationError(msg),
            other => Self::GenerationError(other),
        }
    }
}
