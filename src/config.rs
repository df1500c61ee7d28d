//! Configuration for the document analyzer service

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};

/// Top-level service configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Hosted model configuration
    #[serde(default)]
    pub model: ModelConfig,
    /// Text extraction configuration
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Session lifecycle configuration
    #[serde(default)]
    pub session: SessionConfig,
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file; missing sections fall back to defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read {}: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid config {}: {}", path.display(), e)))
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address
    pub host: String,
    /// Port number
    pub port: u16,
    /// Enable CORS
    pub enable_cors: bool,
    /// Maximum upload size in bytes (default: 25MB)
    pub max_upload_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            enable_cors: true,
            max_upload_size: 25 * 1024 * 1024, // 25MB
        }
    }
}

/// Hosted model (Generative Language API) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// API base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Temperature for generation
    pub temperature: f32,
    /// Maximum output tokens
    pub max_output_tokens: u32,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-1.5-flash-latest".to_string(),
            temperature: 0.3, // Lower for more factual answers
            max_output_tokens: 1024,
            timeout_secs: 120,
        }
    }
}

/// Text extraction configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Timeout for PDF text extraction in seconds
    pub pdf_timeout_secs: u64,
    /// Characters of document text shown in the preview
    pub preview_chars: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            pdf_timeout_secs: 60,
            preview_chars: 2000,
        }
    }
}

/// Session lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Evict sessions idle for longer than this, in seconds
    pub idle_ttl_secs: u64,
    /// Interval between eviction sweeps, in seconds
    pub sweep_interval_secs: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_ttl_secs: 3600, // 1 hour
            sweep_interval_secs: 60,
        }
    }
}
