use std::any::Any;

use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::extraction::ExtractError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": "<message>"}`; the message is surfaced verbatim.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No file uploaded")]
    NoFile,

    #[error("No selected file")]
    NoSelectedFile,

    #[error(transparent)]
    Extraction(#[from] ExtractError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Multipart(#[from] MultipartError),

    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NoFile | AppError::NoSelectedFile | AppError::Extraction(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::Multipart(e) => e.status(),
            AppError::Analysis(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Multipart(e) => e.body_text(),
            other => other.to_string(),
        };

        if status.is_server_error() {
            tracing::error!("Request failed ({status}): {message}");
        } else {
            tracing::warn!("Request rejected ({status}): {message}");
        }

        (status, error_body(&message)).into_response()
    }
}

/// The JSON envelope shared by every error response.
pub fn error_body(message: &str) -> Json<serde_json::Value> {
    Json(json!({ "error": message }))
}

/// Best-effort text of a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}
