pub mod image;
pub mod text;

use log::info;

use crate::extractors;
use crate::model::AnalysisResult;
use crate::AnalysisError;

/// Builds a result from analysis prose that was already obtained.
///
/// # Errors
/// [`AnalysisError::NoAnalysisData`] for blank prose,
/// [`AnalysisError::NoIngredientsParsed`] when no ingredient is recognized.
pub fn parse(analysis_text: &str) -> Result<AnalysisResult, AnalysisError> {
    if analysis_text.trim().is_empty() {
        return Err(AnalysisError::NoAnalysisData);
    }

    let ingredients = extractors::extract(analysis_text);
    let result = AnalysisResult::new(ingredients, analysis_text)?;

    info!(
        "Parsed {} ingredients, overall score {}",
        result.ingredients().len(),
        result.overall_score()
    );
    Ok(result)
}
