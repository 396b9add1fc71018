use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::render::pdf::PdfError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// External content-generation failures never reach this type — the assembler
/// masks them with fallbacks. Only validation, persistence, and rendering
/// failures fail a request.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Snapshot write failed: {0}")]
    Snapshot(#[source] anyhow::Error),

    #[error("PDF conversion failed: {0}")]
    Pdf(#[from] PdfError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Snapshot(e) => {
                tracing::error!("Snapshot error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "SNAPSHOT_ERROR",
                    "Failed to persist the brief".to_string(),
                )
            }
            AppError::Pdf(e) => {
                tracing::error!("PDF error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PDF_ERROR",
                    "Failed to convert the brief to PDF".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}
