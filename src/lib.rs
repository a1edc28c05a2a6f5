pub mod analysis_service;
pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod images_to_text;
pub mod model;
pub mod normalizer;
pub mod pipelines;
pub mod score;

// UniFFI bindings for mobile platforms
pub mod uniffi_bindings;

// Re-export main types
pub use analysis_service::{resolve_analysis_text, AnalysisService, WebhookClient};
pub use builder::{InputSource, LabelAnalyzer, LabelAnalyzerBuilder};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, RequestFailure};
pub use extractors::extract;
pub use images_to_text::{GoogleVisionOcr, ImageSource, OcrEngine};
pub use model::{AnalysisResult, IngredientRecord};
pub use normalizer::normalize;
pub use pipelines::parse;
pub use score::{overall_score, ScoreBand};

/// Analyze ingredient text with the configured analysis service
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let result = food_label_analyzer::analyze_text("Sugar, palm oil, salt").await?;
/// for ingredient in result.ingredients() {
///     println!("{}: {}", ingredient.name(), ingredient.health_score());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn analyze_text(text: &str) -> Result<AnalysisResult, AnalysisError> {
    LabelAnalyzer::builder().text(text).build().await
}

/// Analyze a label photo: OCR, normalization, then the text pipeline
pub async fn analyze_image(image_path: &str) -> Result<AnalysisResult, AnalysisError> {
    LabelAnalyzer::builder().image(image_path).build().await
}
