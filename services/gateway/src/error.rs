use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use types::errors::{CalculatorError, OutlineError, PortalError, ProgressError};

/// Central error type for the Gateway application
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Body rejections answer in the same JSON shape as handler errors.
/// Well-formed JSON whose fields fail validation is 422, anything else 400.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => AppError::Unprocessable(err.body_text()),
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

impl From<CalculatorError> for AppError {
    fn from(err: CalculatorError) -> Self {
        AppError::Unprocessable(err.to_string())
    }
}

impl From<ProgressError> for AppError {
    fn from(err: ProgressError) -> Self {
        match err {
            ProgressError::InvalidLessonKey(_) => AppError::BadRequest(err.to_string()),
            _ => AppError::Unprocessable(err.to_string()),
        }
    }
}

impl From<OutlineError> for AppError {
    fn from(err: OutlineError) -> Self {
        match err {
            OutlineError::CourseNotFound { .. } => AppError::NotFound(err.to_string()),
            _ => AppError::InternalError(err.into()),
        }
    }
}

impl From<PortalError> for AppError {
    fn from(err: PortalError) -> Self {
        match err {
            PortalError::Calculator(e) => e.into(),
            PortalError::Progress(e) => e.into(),
            PortalError::Outline(e) => e.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, code) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST"),
            AppError::Unprocessable(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg, "UNPROCESSABLE")
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, "NOT_FOUND"),
            AppError::InternalError(err) => {
                tracing::error!(error = %err, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    "INTERNAL_ERROR",
                )
            }
        };

        let body = Json(json!({
            "error": code,
            "message": error_message
        }));

        (status, body).into_response()
    }
}
