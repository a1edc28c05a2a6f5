mod ocr;

pub use ocr::{GoogleVisionOcr, ImageSource};

use async_trait::async_trait;
use std::error::Error;

/// Recognizes text in a label image
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Get the engine name (e.g., "google_vision")
    fn engine_name(&self) -> &str;

    /// Returns the raw recognized text; `language` is a hint such as "en".
    async fn recognize(
        &self,
        image: &ImageSource,
        language: &str,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}
