//! HTTP routes

pub mod assets;
pub mod recognize;
pub mod sessions;
pub mod translate;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_check(State(_state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Assemble the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/recognize", recognize::router())
        .nest("/api/translate", translate::router())
        .nest("/api/sessions", sessions::router())
        .nest("/assets", assets::router())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum_test::multipart::{MultipartForm, Part};
    use axum_test::TestServer;
    use serde_json::Value;

    use crate::annotate::WordUnit;
    use crate::assets::{AssetCacheService, MockFetcher, ASSET_MANIFEST, OFFLINE_FALLBACK_PATH};
    use crate::config::Config;
    use crate::geometry::BoundingBox;
    use crate::ocr::{MockOcrEngine, OcrOutcome};
    use crate::session::TRANSLATION_FAILED_PLACEHOLDER;
    use crate::speech::DisabledSpeech;
    use crate::state::AppState;
    use crate::translate::{TranslationCache, TranslationError, Translator};

    use super::*;

    struct EchoTranslator {
        fail: bool,
    }

    #[async_trait]
    impl Translator for EchoTranslator {
        async fn translate(&self, text: &str) -> Result<String, TranslationError> {
            if self.fail {
                Err(TranslationError::Unavailable("down".to_string()))
            } else {
                Ok(format!("譯[{}]", text))
            }
        }
    }

    fn word(text: &str, x0: f64) -> WordUnit {
        WordUnit {
            text: text.to_string(),
            bbox: BoundingBox::new(x0, 0.0, x0 + 100.0, 50.0),
            confidence: 92.0,
        }
    }

    fn sample_outcome() -> OcrOutcome {
        OcrOutcome {
            text: "Hello world. Next".to_string(),
            words: vec![word("Hello", 0.0), word("world.", 120.0), word("Next", 240.0)],
        }
    }

    async fn test_server(translator_fails: bool) -> TestServer {
        let fetcher = MockFetcher::new();
        for path in ASSET_MANIFEST {
            fetcher.respond(path, 200, &format!("body of {}", path));
        }
        fetcher.respond(OFFLINE_FALLBACK_PATH, 200, "<h1>offline</h1>");

        let asset_cache = AssetCacheService::new(Arc::new(fetcher), "test");
        asset_cache.install().await.unwrap();
        asset_cache.activate().await;

        let state = AppState::new(
            Config::default(),
            Arc::new(MockOcrEngine {
                outcome: sample_outcome(),
            }),
            TranslationCache::new(Arc::new(EchoTranslator {
                fail: translator_fails,
            })),
            asset_cache,
            Arc::new(DisabledSpeech),
        );
        TestServer::new(app(state)).unwrap()
    }

    fn png_bytes() -> Vec<u8> {
        // 1600x1200 so the display scale is 0.5
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(1600, 1200));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn image_form() -> MultipartForm {
        MultipartForm::new().add_part(
            "image",
            Part::bytes(png_bytes())
                .file_name("photo.png")
                .mime_type("image/png"),
        )
    }

    #[tokio::test]
    async fn test_health() {
        let server = test_server(false).await;
        let response = server.get("/health").await;
        response.assert_status_ok();
    }

    #[tokio::test]
    async fn test_recognize_creates_session_with_scaled_overlay() {
        let server = test_server(false).await;

        let response = server.post("/api/recognize").multipart(image_form()).await;
        response.assert_status_ok();

        let body: Value = response.json();
        assert_eq!(body["text"], "Hello world. Next");
        assert_eq!(body["scale"], 0.5);
        assert_eq!(body["mode"], "original");
        assert_eq!(body["words"].as_array().unwrap().len(), 3);
        assert_eq!(body["sentences"].as_array().unwrap().len(), 2);
        // Word boxes projected at the fitted scale
        let first = &body["overlay"]["boxes"][0]["rect"];
        assert_eq!(first["left"], 0.0);
        assert_eq!(first["width"], 50.0);
        assert!(body["sessionId"].is_string());
    }

    #[tokio::test]
    async fn test_recognize_rejects_non_image_upload() {
        let server = test_server(false).await;

        let form = MultipartForm::new().add_part(
            "image",
            Part::bytes(b"not an image".to_vec())
                .file_name("notes.txt")
                .mime_type("text/plain"),
        );
        let response = server.post("/api/recognize").multipart(form).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_recognize_rejects_missing_file() {
        let server = test_server(false).await;

        let form = MultipartForm::new().add_text("comment", "no file here");
        let response = server.post("/api/recognize").multipart(form).await;
        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_mode_switch_repopulates_overlay() {
        let server = test_server(false).await;

        let created: Value = server
            .post("/api/recognize")
            .multipart(image_form())
            .await
            .json();
        let id = created["sessionId"].as_str().unwrap().to_string();
        assert_eq!(created["overlay"]["boxes"].as_array().unwrap().len(), 3);

        let switched: Value = server
            .post(&format!("/api/sessions/{}/mode", id))
            .json(&serde_json::json!({"mode": "sentence"}))
            .await
            .json();
        assert_eq!(switched["mode"], "sentence");
        assert_eq!(switched["overlay"]["boxes"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_click_in_translate_mode_returns_pair() {
        let server = test_server(false).await;

        let created: Value = server
            .post("/api/recognize")
            .multipart(image_form())
            .await
            .json();
        let id = created["sessionId"].as_str().unwrap().to_string();

        server
            .post(&format!("/api/sessions/{}/mode", id))
            .json(&serde_json::json!({"mode": "translate"}))
            .await
            .assert_status_ok();

        let clicked: Value = server
            .post(&format!("/api/sessions/{}/click", id))
            .json(&serde_json::json!({"index": 0}))
            .await
            .json();
        assert_eq!(clicked["handled"], true);
        assert_eq!(clicked["outcome"]["original"], "Hello");
        assert_eq!(clicked["outcome"]["translation"], "譯[Hello]");
        assert_eq!(clicked["outcome"]["utterance"]["language"], "zh-TW");
    }

    #[tokio::test]
    async fn test_click_translation_failure_uses_placeholder() {
        let server = test_server(true).await;

        let created: Value = server
            .post("/api/recognize")
            .multipart(image_form())
            .await
            .json();
        let id = created["sessionId"].as_str().unwrap().to_string();

        server
            .post(&format!("/api/sessions/{}/mode", id))
            .json(&serde_json::json!({"mode": "translate"}))
            .await
            .assert_status_ok();

        let clicked: Value = server
            .post(&format!("/api/sessions/{}/click", id))
            .json(&serde_json::json!({"index": 0}))
            .await
            .json();
        assert_eq!(
            clicked["outcome"]["translation"],
            TRANSLATION_FAILED_PLACEHOLDER
        );
        assert!(clicked["outcome"]["utterance"].is_null());
    }

    #[tokio::test]
    async fn test_click_out_of_range_is_noop() {
        let server = test_server(false).await;

        let created: Value = server
            .post("/api/recognize")
            .multipart(image_form())
            .await
            .json();
        let id = created["sessionId"].as_str().unwrap().to_string();

        let clicked: Value = server
            .post(&format!("/api/sessions/{}/click", id))
            .json(&serde_json::json!({"index": 99}))
            .await
            .json();
        assert_eq!(clicked["handled"], false);
    }

    #[tokio::test]
    async fn test_delete_session_frees_the_store_entry() {
        let server = test_server(false).await;

        let created: Value = server
            .post("/api/recognize")
            .multipart(image_form())
            .await
            .json();
        let id = created["sessionId"].as_str().unwrap().to_string();

        server
            .delete(&format!("/api/sessions/{}", id))
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);

        // The session is gone, not merely hidden.
        server
            .get(&format!("/api/sessions/{}", id))
            .await
            .assert_status_not_found();
        server
            .delete(&format!("/api/sessions/{}", id))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_unknown_session_is_404() {
        let server = test_server(false).await;
        let response = server
            .get(&format!("/api/sessions/{}", uuid::Uuid::new_v4()))
            .await;
        response.assert_status_not_found();
    }

    #[tokio::test]
    async fn test_translate_endpoint_roundtrip() {
        let server = test_server(false).await;
        let response: Value = server
            .post("/api/translate")
            .json(&serde_json::json!({"text": "cat"}))
            .await
            .json();
        assert_eq!(response["translation"], "譯[cat]");
    }

    #[tokio::test]
    async fn test_translate_endpoint_unavailable_is_502() {
        let server = test_server(true).await;
        let response = server
            .post("/api/translate")
            .json(&serde_json::json!({"text": "cat"}))
            .await;
        response.assert_status(axum::http::StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_asset_route_serves_cached_manifest_entry() {
        let server = test_server(false).await;
        let response = server.get("/assets/app.js").await;
        response.assert_status_ok();
        assert_eq!(response.text(), "body of /app.js");
    }
}
