//! Configuration management for the WordLens server

use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub collaborators: CollaboratorConfig,
    pub assets: AssetConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Remote collaborator endpoints (OCR engine, translation provider).
#[derive(Debug, Clone, Deserialize)]
pub struct CollaboratorConfig {
    pub ocr_endpoint: String,
    pub translate_endpoint: String,
}

/// Static-client delivery settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetConfig {
    /// Upstream origin hosting the static client
    pub upstream_origin: String,
    /// Version token; bump whenever the asset manifest changes
    pub version_token: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            collaborators: CollaboratorConfig {
                ocr_endpoint: "http://localhost:8884/recognize".to_string(),
                translate_endpoint: "http://localhost:8885/translate".to_string(),
            },
            assets: AssetConfig {
                upstream_origin: "http://localhost:8080".to_string(),
                version_token: "v1".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: env::var("SERVER_PORT")
                    .unwrap_or_else(|_| "3000".to_string())
                    .parse()
                    .unwrap_or(3000),
            },
            collaborators: CollaboratorConfig {
                ocr_endpoint: env::var("OCR_ENDPOINT")?,
                translate_endpoint: env::var("TRANSLATE_ENDPOINT")?,
            },
            assets: AssetConfig {
                upstream_origin: env::var("ASSET_UPSTREAM_ORIGIN")?,
                version_token: env::var("ASSET_VERSION_TOKEN").unwrap_or_else(|_| "v1".to_string()),
            },
        })
    }
}
