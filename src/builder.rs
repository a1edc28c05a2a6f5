use std::time::Duration;

use crate::analysis_service::WebhookClient;
use crate::config::AnalyzerConfig;
use crate::images_to_text::{GoogleVisionOcr, ImageSource};
use crate::pipelines;
use crate::{AnalysisError, AnalysisResult};

/// Represents the input source for an analysis
#[derive(Debug, Clone)]
pub enum InputSource {
    /// Ingredient text entered directly
    Text(String),
    /// Label image (will be OCR'd and normalized)
    Image(ImageSource),
}

/// Builder for configuring and executing a label analysis
#[derive(Debug, Default)]
pub struct LabelAnalyzerBuilder {
    source: Option<InputSource>,
    config: Option<AnalyzerConfig>,
    service_url: Option<String>,
    timeout: Option<Duration>,
    language: Option<String>,
    ocr_api_key: Option<String>,
}

impl LabelAnalyzerBuilder {
    /// Set the input source to ingredient text
    ///
    /// Text input is sent to the analysis service as-is, without OCR cleanup.
    ///
    /// # Example
    /// ```
    /// use food_label_analyzer::LabelAnalyzer;
    ///
    /// let builder = LabelAnalyzer::builder()
    ///     .text("Sugar, wheat flour, palm oil, salt");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.source = Some(InputSource::Text(text.into()));
        self
    }

    /// Set the input source to an image file
    ///
    /// Requires an OCR API key in the configuration or `GOOGLE_API_KEY`.
    ///
    /// # Example
    /// ```
    /// use food_label_analyzer::LabelAnalyzer;
    ///
    /// let builder = LabelAnalyzer::builder()
    ///     .image("/path/to/label.jpg");
    /// ```
    pub fn image(mut self, image_path: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::Path(image_path.into())));
        self
    }

    /// Set the input source to base64-encoded image data
    pub fn image_base64(mut self, data: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::Base64(data.into())));
        self
    }

    /// Set the input source to a `data:image/...;base64,...` URL
    pub fn data_url(mut self, url: impl Into<String>) -> Self {
        self.source = Some(InputSource::Image(ImageSource::DataUrl(url.into())));
        self
    }

    /// Use this configuration instead of loading `config.toml` and the environment
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Override the analysis service URL
    ///
    /// # Example
    /// ```
    /// use food_label_analyzer::LabelAnalyzer;
    ///
    /// let builder = LabelAnalyzer::builder()
    ///     .text("Sugar, salt")
    ///     .service_url("http://localhost:5678/webhook/analyze-label");
    /// ```
    pub fn service_url(mut self, url: impl Into<String>) -> Self {
        self.service_url = Some(url.into());
        self
    }

    /// Set a timeout for the analysis request
    ///
    /// # Example
    /// ```
    /// use food_label_analyzer::LabelAnalyzer;
    /// use std::time::Duration;
    ///
    /// let builder = LabelAnalyzer::builder()
    ///     .text("Sugar, salt")
    ///     .timeout(Duration::from_secs(30));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Set the OCR language hint (e.g. "en")
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    /// Set the API key for the OCR engine
    pub fn ocr_api_key(mut self, key: impl Into<String>) -> Self {
        self.ocr_api_key = Some(key.into());
        self
    }

    /// Build and execute the analysis
    ///
    /// # Errors
    /// Returns `AnalysisError` if:
    /// - No input source was specified
    /// - Configuration cannot be loaded
    /// - OCR, normalization, the analysis request or parsing fails
    ///
    /// # Example
    /// ```no_run
    /// # use food_label_analyzer::LabelAnalyzer;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let result = LabelAnalyzer::builder()
    ///     .text("Sugar, wheat flour, palm oil, salt")
    ///     .build()
    ///     .await?;
    /// println!("Overall score: {}", result.overall_score());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(self) -> Result<AnalysisResult, AnalysisError> {
        // Validate that source is set
        let source = self.source.ok_or_else(|| {
            AnalysisError::BuilderError(
                "No input source specified. Use .text() or .image()".to_string(),
            )
        })?;

        let mut config = match self.config {
            Some(config) => config,
            None => AnalyzerConfig::load()?,
        };
        if let Some(url) = self.service_url {
            config.service.url = url;
        }
        if let Some(language) = self.language {
            config.ocr.language = language;
        }
        if let Some(key) = self.ocr_api_key {
            config.ocr.api_key = Some(key);
        }

        let service = match self.timeout {
            Some(timeout) => WebhookClient::new(config.service.url.clone(), timeout)?,
            None => WebhookClient::from_config(&config.service)?,
        };

        match source {
            InputSource::Text(text) => pipelines::text::process(&text, &service).await,
            InputSource::Image(image) => {
                let ocr = GoogleVisionOcr::new(&config.ocr).map_err(|e| {
                    AnalysisError::BuilderError(format!("Failed to initialize OCR: {}", e))
                })?;
                pipelines::image::process(&image, &ocr, &config.ocr.language, &service).await
            }
        }
    }
}

/// Main entry point for the builder API
pub struct LabelAnalyzer;

impl LabelAnalyzer {
    /// Creates a new builder for analyzing a label
    ///
    /// # Example
    /// ```
    /// use food_label_analyzer::LabelAnalyzer;
    ///
    /// let builder = LabelAnalyzer::builder();
    /// ```
    pub fn builder() -> LabelAnalyzerBuilder {
        LabelAnalyzerBuilder::default()
    }
}
