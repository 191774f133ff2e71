//! Error types for the WordLens server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::assets::AssetFetchError;
use crate::ocr::RecognitionError;
use crate::translate::TranslationError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
///
/// No variant is fatal to the process; every error is scoped to the
/// triggering request and nothing is retried automatically.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid upload, rejected before any OCR/network work
    #[error("Invalid input: {0}")]
    Input(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Recognition failed: {0}")]
    Recognition(#[from] RecognitionError),

    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    #[error("Asset fetch failed: {0}")]
    AssetFetch(#[from] AssetFetchError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            AppError::Input(msg) => (StatusCode::BAD_REQUEST, "invalid_input", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Recognition(e) => {
                tracing::error!("Recognition error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "recognition_error",
                    "Text recognition failed".to_string(),
                )
            }
            AppError::Translation(e) => {
                tracing::warn!("Translation error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "translation_unavailable",
                    "Translation service unavailable".to_string(),
                )
            }
            AppError::AssetFetch(e) => {
                tracing::error!("Asset fetch error: {}", e);
                (
                    StatusCode::BAD_GATEWAY,
                    "asset_fetch_error",
                    "Upstream asset fetch failed".to_string(),
                )
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        });

        (status, body).into_response()
    }
}
