//! UniFFI bindings for food-label-analyzer
//!
//! This module provides FFI-compatible types and functions for use with iOS and Android.
//! It wraps the async Rust API with synchronous functions that manage their own tokio runtime.

use std::fmt;
use std::time::Duration;

use crate::{AnalysisError, AnalysisResult, IngredientRecord, RequestFailure};

// Re-export UniFFI macro
#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible ingredient record
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: String,
    pub description: String,
    /// 0..=100, higher is healthier
    pub health_score: u8,
    /// "Excellent", "Good", "Fair", "Poor" or "Harmful"
    pub band: String,
}

impl From<&IngredientRecord> for FfiIngredient {
    fn from(record: &IngredientRecord) -> Self {
        FfiIngredient {
            name: record.name().to_string(),
            description: record.description().to_string(),
            health_score: record.health_score(),
            band: record.band().label().to_string(),
        }
    }
}

/// FFI-compatible analysis result
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiAnalysisResult {
    pub ingredients: Vec<FfiIngredient>,
    pub overall_score: u8,
    pub raw_text: String,
}

impl From<AnalysisResult> for FfiAnalysisResult {
    fn from(result: AnalysisResult) -> Self {
        FfiAnalysisResult {
            ingredients: result.ingredients().iter().map(FfiIngredient::from).collect(),
            overall_score: result.overall_score(),
            raw_text: result.raw_text().to_string(),
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiAnalysisError {
    InsufficientText { message: String },
    NoTextRecognized { message: String },
    InvalidInput { message: String },
    RequestTimedOut { message: String },
    ServiceUnreachable { message: String },
    ServerError { message: String },
    NoAnalysisData { message: String },
    NoIngredientsParsed { message: String },
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiAnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiAnalysisError::InsufficientText { message }
            | FfiAnalysisError::NoTextRecognized { message }
            | FfiAnalysisError::InvalidInput { message }
            | FfiAnalysisError::RequestTimedOut { message }
            | FfiAnalysisError::ServiceUnreachable { message }
            | FfiAnalysisError::ServerError { message }
            | FfiAnalysisError::NoAnalysisData { message }
            | FfiAnalysisError::NoIngredientsParsed { message }
            | FfiAnalysisError::ConfigError { message } => write!(f, "{}", message),
            FfiAnalysisError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiAnalysisError {}

impl From<AnalysisError> for FfiAnalysisError {
    fn from(err: AnalysisError) -> Self {
        let message = err.to_string();
        match err {
            AnalysisError::InsufficientText => FfiAnalysisError::InsufficientText { message },
            AnalysisError::NoTextRecognized(_) => FfiAnalysisError::NoTextRecognized { message },
            AnalysisError::EmptyInput | AnalysisError::BuilderError(_) => {
                FfiAnalysisError::InvalidInput { message }
            }
            AnalysisError::AnalysisRequestFailed(failure) => match failure {
                RequestFailure::TimedOut => FfiAnalysisError::RequestTimedOut { message },
                RequestFailure::Unreachable(_) => FfiAnalysisError::ServiceUnreachable { message },
                RequestFailure::Status(_) | RequestFailure::InvalidResponse(_) => {
                    FfiAnalysisError::ServerError { message }
                }
            },
            AnalysisError::NoAnalysisData => FfiAnalysisError::NoAnalysisData { message },
            AnalysisError::NoIngredientsParsed => FfiAnalysisError::NoIngredientsParsed { message },
            AnalysisError::ConfigError(_) => FfiAnalysisError::ConfigError { message },
        }
    }
}

/// Configuration for an analysis call
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiAnalyzeConfig {
    /// Optional analysis service URL (uses configuration if not specified)
    pub service_url: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
    /// Optional OCR language hint
    pub language: Option<String>,
    /// Optional OCR API key (uses environment variable if not specified)
    pub ocr_api_key: Option<String>,
}

impl FfiAnalyzeConfig {
    fn apply(self, mut builder: crate::LabelAnalyzerBuilder) -> crate::LabelAnalyzerBuilder {
        if let Some(url) = self.service_url {
            builder = builder.service_url(url);
        }
        if let Some(timeout_secs) = self.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        if let Some(language) = self.language {
            builder = builder.language(language);
        }
        if let Some(key) = self.ocr_api_key {
            builder = builder.ocr_api_key(key);
        }
        builder
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiAnalysisError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiAnalysisError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Analyze ingredient text typed by the user
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn analyze_text(
    text: String,
    config: Option<FfiAnalyzeConfig>,
) -> Result<FfiAnalysisResult, FfiAnalysisError> {
    let rt = create_runtime()?;
    rt.block_on(async {
        let builder = crate::LabelAnalyzer::builder().text(text);
        let result = config.unwrap_or_default().apply(builder).build().await?;
        Ok(result.into())
    })
}

/// Analyze a label photo given as a file path or a `data:` URL
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn analyze_image(
    image: String,
    config: Option<FfiAnalyzeConfig>,
) -> Result<FfiAnalysisResult, FfiAnalysisError> {
    let rt = create_runtime()?;
    rt.block_on(async {
        let builder = if image.starts_with("data:") {
            crate::LabelAnalyzer::builder().data_url(image)
        } else {
            crate::LabelAnalyzer::builder().image(image)
        };
        let result = config.unwrap_or_default().apply(builder).build().await?;
        Ok(result.into())
    })
}

/// Parse analysis prose that was obtained elsewhere
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_analysis(analysis_text: String) -> Result<FfiAnalysisResult, FfiAnalysisError> {
    Ok(crate::parse(&analysis_text)?.into())
}

/// Clean raw OCR text the same way the image pipeline does
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn normalize_label_text(raw_text: String) -> Result<String, FfiAnalysisError> {
    Ok(crate::normalize(&raw_text)?)
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
