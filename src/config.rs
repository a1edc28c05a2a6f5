use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration structure
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AnalyzerConfig {
    /// Remote analysis service settings
    #[serde(default)]
    pub service: ServiceConfig,
    /// OCR settings for image input
    #[serde(default)]
    pub ocr: OcrConfig,
}

/// Configuration for the remote analysis service
#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Webhook URL that accepts `{ "message": ... }`
    #[serde(default = "default_service_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            url: default_service_url(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for the OCR engine
#[derive(Debug, Deserialize, Clone)]
pub struct OcrConfig {
    /// Language hint passed to the recognizer
    #[serde(default = "default_language")]
    pub language: String,
    /// API key (can also be set via GOOGLE_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for the vision endpoint (for proxies or tests)
    pub base_url: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            api_key: None,
            base_url: None,
        }
    }
}

// Default value functions
fn default_service_url() -> String {
    "http://localhost:5678/webhook/analyze-label".to_string()
}

fn default_timeout() -> u64 {
    60
}

fn default_language() -> String {
    "en".to_string()
}

impl AnalyzerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with LABEL_ANALYZER__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: LABEL_ANALYZER__SERVICE__URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`AnalyzerConfig::load`] for the source priority.
pub fn load_config() -> Result<AnalyzerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: LABEL_ANALYZER__OCR__API_KEY
        .add_source(
            Environment::with_prefix("LABEL_ANALYZER")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
