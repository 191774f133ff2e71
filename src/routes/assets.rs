//! Asset delivery route
//!
//! Fronts the static client with the stale-while-revalidate cache. Only
//! GET requests reach this router; everything else on the server passes
//! the cache by entirely.

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    routing::get,
    Router,
};

use crate::assets::{ServeSource, ServedAsset};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Create the assets router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(serve_root))
        .route("/*path", get(serve_asset))
}

async fn serve_root(State(state): State<AppState>, headers: HeaderMap) -> Result<Response> {
    serve(&state, "/", &headers).await
}

async fn serve_asset(
    State(state): State<AppState>,
    Path(path): Path<String>,
    headers: HeaderMap,
) -> Result<Response> {
    serve(&state, &format!("/{}", path), &headers).await
}

async fn serve(state: &AppState, path: &str, headers: &HeaderMap) -> Result<Response> {
    let served = state
        .asset_cache()
        .handle_get(path, is_navigation(headers))
        .await?;
    into_response(served)
}

/// Whether the request is a full-page navigation.
///
/// Browsers mark navigations with `Sec-Fetch-Mode: navigate`; older ones
/// are recognized by an Accept header preferring HTML.
fn is_navigation(headers: &HeaderMap) -> bool {
    if let Some(mode) = headers.get("sec-fetch-mode").and_then(|v| v.to_str().ok()) {
        return mode.eq_ignore_ascii_case("navigate");
    }
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|accept| accept.contains("text/html"))
        .unwrap_or(false)
}

fn into_response(served: ServedAsset) -> Result<Response> {
    let cache_state = match served.source {
        ServeSource::Cache => "hit",
        ServeSource::Network => "miss",
        ServeSource::OfflineFallback => "offline",
    };

    Response::builder()
        .status(StatusCode::from_u16(served.status).unwrap_or(StatusCode::OK))
        .header(header::CONTENT_TYPE, served.content_type)
        .header("x-asset-cache", cache_state)
        .body(Body::from(served.body))
        .map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_navigation_sec_fetch_mode() {
        let mut headers = HeaderMap::new();
        headers.insert("sec-fetch-mode", "navigate".parse().unwrap());
        assert!(is_navigation(&headers));

        headers.insert("sec-fetch-mode", "cors".parse().unwrap());
        assert!(!is_navigation(&headers));
    }

    #[test]
    fn test_is_navigation_accept_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            "text/html,application/xhtml+xml".parse().unwrap(),
        );
        assert!(is_navigation(&headers));

        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, "application/json".parse().unwrap());
        assert!(!is_navigation(&headers));

        assert!(!is_navigation(&HeaderMap::new()));
    }
}
