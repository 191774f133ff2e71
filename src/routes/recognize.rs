//! Image recognition route
//!
//! Accepts an uploaded image, validates it before any OCR or network work
//! begins, computes the display scale the raster will be fitted at, runs
//! the OCR collaborator and opens a reading session over the result.

use axum::{
    extract::{Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use uuid::Uuid;

use crate::annotate::{SentenceUnit, WordUnit};
use crate::error::{AppError, Result};
use crate::geometry::fit_scale;
use crate::overlay::Overlay;
use crate::session::{DisplayMode, ReadingSession};
use crate::state::AppState;

/// Create the recognize router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(recognize))
}

/// Response for a successful recognition run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeResponse {
    pub session_id: Uuid,
    /// Full recognized text
    pub text: String,
    /// Display scale the source raster was fitted at
    pub scale: f64,
    pub mode: DisplayMode,
    pub words: Vec<WordUnit>,
    pub sentences: Vec<SentenceUnit>,
    pub overlay: Overlay,
}

/// Recognize text in an uploaded image and open a session
async fn recognize(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<RecognizeResponse>> {
    // Input validation happens before any OCR/network work.
    let image_data = extract_image_field(&mut multipart).await?;

    let decoded = image::load_from_memory(&image_data)
        .map_err(|e| AppError::Input(format!("Could not decode image: {}", e)))?;
    let scale = fit_scale(decoded.width(), decoded.height());

    let outcome = state.ocr().recognize(&image_data).await?;

    tracing::info!(
        "recognized {} words at scale {:.3}",
        outcome.words.len(),
        scale
    );

    let session = ReadingSession::new(outcome, scale);
    let snapshot = session.clone();
    let session_id = state.sessions().insert(session).await;

    Ok(Json(RecognizeResponse {
        session_id,
        text: snapshot.text,
        scale,
        mode: snapshot.mode,
        words: snapshot.words,
        sentences: snapshot.sentences,
        overlay: snapshot.overlay,
    }))
}

/// Pull the image field out of the multipart body, rejecting missing
/// files and non-image MIME types.
async fn extract_image_field(multipart: &mut Multipart) -> Result<Vec<u8>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Input(format!("Malformed upload: {}", e)))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or("").to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::Input(
                "Please upload an image file (JPG, PNG, GIF, ...)".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Input(format!("Failed to read upload: {}", e)))?;
        if data.is_empty() {
            return Err(AppError::Input("Uploaded image is empty".to_string()));
        }
        return Ok(data.to_vec());
    }

    Err(AppError::Input("Please select an image file".to_string()))
}
