//! Application state management

use std::sync::Arc;

use crate::assets::AssetCacheService;
use crate::config::Config;
use crate::ocr::OcrEngine;
use crate::session::SessionStore;
use crate::speech::SpeechSynthesizer;
use crate::translate::TranslationCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: Config,
    ocr: Arc<dyn OcrEngine>,
    translations: TranslationCache,
    sessions: SessionStore,
    asset_cache: AssetCacheService,
    speech: Arc<dyn SpeechSynthesizer>,
}

impl AppState {
    pub fn new(
        config: Config,
        ocr: Arc<dyn OcrEngine>,
        translations: TranslationCache,
        asset_cache: AssetCacheService,
        speech: Arc<dyn SpeechSynthesizer>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                ocr,
                translations,
                sessions: SessionStore::new(),
                asset_cache,
                speech,
            }),
        }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    pub fn ocr(&self) -> &Arc<dyn OcrEngine> {
        &self.inner.ocr
    }

    pub fn translations(&self) -> &TranslationCache {
        &self.inner.translations
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.inner.sessions
    }

    pub fn asset_cache(&self) -> &AssetCacheService {
        &self.inner.asset_cache
    }

    pub fn speech(&self) -> &Arc<dyn SpeechSynthesizer> {
        &self.inner.speech
    }
}
