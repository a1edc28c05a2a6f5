use log::info;

use crate::analysis_service::AnalysisService;
use crate::model::AnalysisResult;
use crate::AnalysisError;

/// Analyzes ingredient text typed by the user or recovered by OCR.
///
/// This pipeline:
/// 1. Rejects blank input
/// 2. Sends the text to the analysis service
/// 3. Extracts ingredient records from the returned prose
/// 4. Aggregates them into an [`AnalysisResult`]
pub async fn process(
    text: &str,
    service: &dyn AnalysisService,
) -> Result<AnalysisResult, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::EmptyInput);
    }

    info!("Analyzing {} characters of label text", text.len());
    let analysis_text = service.analyze(text).await?;

    super::parse(&analysis_text)
}
