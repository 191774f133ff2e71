//! WordLens Server
//!
//! Self-hosted OCR reading assistant: upload a photo of English text, get
//! word and sentence annotations with translation and offline-capable
//! client delivery.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::signal;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wordlens_server::assets::{AssetCacheService, HttpFetcher};
use wordlens_server::config::Config;
use wordlens_server::ocr::RemoteOcrEngine;
use wordlens_server::routes;
use wordlens_server::speech::DisabledSpeech;
use wordlens_server::state::AppState;
use wordlens_server::translate::{HttpTranslator, TranslationCache};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wordlens_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let config = Config::from_env().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config from env: {}, using defaults", e);
        Config::default()
    });

    tracing::info!("Starting WordLens Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("OCR endpoint: {}", config.collaborators.ocr_endpoint);
    tracing::info!("Asset upstream: {}", config.assets.upstream_origin);

    // Seed and activate the asset cache. A failed install leaves the cache
    // cold (misses pass through to the upstream) rather than aborting boot.
    let fetcher = Arc::new(HttpFetcher::new(&config.assets.upstream_origin));
    let asset_cache = AssetCacheService::new(fetcher, &config.assets.version_token);
    match asset_cache.install().await {
        Ok(()) => asset_cache.activate().await,
        Err(e) => tracing::warn!("Asset cache install failed: {}. Serving with a cold cache", e),
    }

    let ocr = Arc::new(RemoteOcrEngine::new(&config.collaborators.ocr_endpoint));
    let translations = TranslationCache::new(Arc::new(HttpTranslator::new(
        &config.collaborators.translate_endpoint,
    )));

    let app_state = AppState::new(
        config.clone(),
        ocr,
        translations,
        asset_cache,
        Arc::new(DisabledSpeech),
    );

    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = routes::app(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server with graceful shutdown
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    tracing::info!("WordLens Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown...");
        },
    }
}
