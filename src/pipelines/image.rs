use log::{info, warn};

use crate::analysis_service::AnalysisService;
use crate::images_to_text::{ImageSource, OcrEngine};
use crate::model::AnalysisResult;
use crate::normalizer::normalize;
use crate::AnalysisError;

/// Analyzes a photographed label.
///
/// Recognized text is normalized before it reaches the text pipeline; OCR
/// failures and blank recognitions stop the request before normalization.
pub async fn process(
    image: &ImageSource,
    ocr: &dyn OcrEngine,
    language: &str,
    service: &dyn AnalysisService,
) -> Result<AnalysisResult, AnalysisError> {
    info!(
        "Recognizing text in {} with {}",
        image.describe(),
        ocr.engine_name()
    );

    let raw = ocr.recognize(image, language).await.map_err(|e| {
        warn!("OCR failed: {}", e);
        AnalysisError::NoTextRecognized(e.to_string())
    })?;

    if raw.trim().is_empty() {
        return Err(AnalysisError::NoTextRecognized(
            "recognizer returned no text".to_string(),
        ));
    }

    let text = normalize(&raw)?;
    super::text::process(&text, service).await
}
