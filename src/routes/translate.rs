//! Translation route
//!
//! The endpoint the static client calls; goes through the shared
//! memoizing cache so repeated lookups never hit the remote provider.

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::state::AppState;

/// Create the translate router
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(translate))
}

#[derive(Debug, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranslateResponse {
    pub translation: String,
}

/// Translate a piece of text (English to Traditional Chinese)
async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Result<Json<TranslateResponse>> {
    let translation = state.translations().translate(&request.text).await?;
    Ok(Json(TranslateResponse { translation }))
}
