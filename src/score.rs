use serde::Serialize;

use crate::model::IngredientRecord;

/// Rounded mean of the records' health scores.
///
/// Halves round up (57.5 becomes 58). The mean is computed in integer
/// arithmetic so the result does not depend on float formatting. Returns
/// `None` for an empty slice.
pub fn overall_score(records: &[IngredientRecord]) -> Option<u8> {
    if records.is_empty() {
        return None;
    }

    let count = records.len() as u64;
    let sum: u64 = records.iter().map(|r| u64::from(r.health_score())).sum();

    // floor((sum / count) + 1/2) == floor((2 * sum + count) / (2 * count))
    let rounded = (2 * sum + count) / (2 * count);
    Some(rounded as u8)
}

/// Display classification of a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
    Harmful,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            80.. => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            20..=39 => ScoreBand::Poor,
            _ => ScoreBand::Harmful,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "Excellent",
            ScoreBand::Good => "Good",
            ScoreBand::Fair => "Fair",
            ScoreBand::Poor => "Poor",
            ScoreBand::Harmful => "Harmful",
        }
    }
}
