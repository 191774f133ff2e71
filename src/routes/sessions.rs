//! Session routes
//!
//! Mode switching and click dispatch against an open reading session.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::overlay::Overlay;
use crate::session::{resolve_click, ClickOutcome, DisplayMode, ReadingSession};
use crate::state::AppState;

/// Create the sessions router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:id", get(get_session).delete(delete_session))
        .route("/:id/mode", post(set_mode))
        .route("/:id/click", post(click))
}

/// Session view returned to the client
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub text: String,
    pub scale: f64,
    pub mode: DisplayMode,
    pub overlay: Overlay,
}

impl SessionSnapshot {
    fn new(session_id: Uuid, session: ReadingSession) -> Self {
        Self {
            session_id,
            text: session.text,
            scale: session.scale,
            mode: session.mode,
            overlay: session.overlay,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: DisplayMode,
}

#[derive(Debug, Deserialize)]
pub struct ClickRequest {
    /// Index of the clicked overlay box
    pub index: usize,
}

/// Click result. `handled: false` means the click hit nothing active
/// (stale index after a rebuild, or an inactive granularity).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickResponse {
    pub handled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<ClickOutcome>,
}

/// Fetch a session snapshot
async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>> {
    let session = state
        .sessions()
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    Ok(Json(SessionSnapshot::new(id, session)))
}

/// Discard a session once the client is done with it (or before
/// replacing it with a fresh upload), so the store does not grow without
/// bound in a long-running server
async fn delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.sessions().remove(&id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {} not found", id)))
    }
}

/// Switch the session's display mode and rebuild its overlay
async fn set_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SetModeRequest>,
) -> Result<Json<SessionSnapshot>> {
    let session = state
        .sessions()
        .set_mode(&id, request.mode)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;
    Ok(Json(SessionSnapshot::new(id, session)))
}

/// Dispatch a click on an overlay box
async fn click(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ClickRequest>,
) -> Result<Json<ClickResponse>> {
    let session = state
        .sessions()
        .get(&id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

    let Some(target) = session.click_target(request.index) else {
        return Ok(Json(ClickResponse {
            handled: false,
            outcome: None,
        }));
    };

    let outcome = resolve_click(session.mode, &target, state.translations()).await;

    if let Some(outcome) = &outcome {
        if let Some(utterance) = &outcome.utterance {
            let speech = state.speech();
            if speech.is_available().await {
                speech.speak(utterance).await;
            }
        }
    }

    Ok(Json(ClickResponse {
        handled: outcome.is_some(),
        outcome,
    }))
}
