use serde::Serialize;

use crate::score::{overall_score, ScoreBand};
use crate::AnalysisError;

/// Highest value a health score can take
pub const MAX_HEALTH_SCORE: i64 = 100;

/// A single ingredient recovered from analysis prose
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IngredientRecord {
    name: String,
    description: String,
    health_score: u8,
}

impl IngredientRecord {
    /// Builds a record, or `None` when the score is outside 0..=100 or when
    /// the trimmed name is empty. The description may be empty.
    pub fn new(name: &str, description: &str, health_score: i64) -> Option<Self> {
        if !(0..=MAX_HEALTH_SCORE).contains(&health_score) {
            return None;
        }

        let name = name.trim();
        let description = description.trim();
        if name.is_empty() {
            return None;
        }

        Some(IngredientRecord {
            name: name.to_string(),
            description: description.to_string(),
            health_score: health_score as u8,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn health_score(&self) -> u8 {
        self.health_score
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.health_score)
    }
}

/// The outcome of one analysis request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    ingredients: Vec<IngredientRecord>,
    overall_score: u8,
    raw_text: String,
}

impl AnalysisResult {
    /// Wraps extracted records together with their aggregate score.
    ///
    /// Fails with [`AnalysisError::NoIngredientsParsed`] when `ingredients` is
    /// empty, so a result always carries at least one record.
    pub fn new(
        ingredients: Vec<IngredientRecord>,
        raw_text: impl Into<String>,
    ) -> Result<Self, AnalysisError> {
        let overall_score =
            overall_score(&ingredients).ok_or(AnalysisError::NoIngredientsParsed)?;

        Ok(AnalysisResult {
            ingredients,
            overall_score,
            raw_text: raw_text.into(),
        })
    }

    pub fn ingredients(&self) -> &[IngredientRecord] {
        &self.ingredients
    }

    pub fn overall_score(&self) -> u8 {
        self.overall_score
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.overall_score)
    }
}
