use log::{debug, info};

use super::scanner::{next_analysis_head, next_score_marker};
use super::Extractor;
use crate::model::IngredientRecord;

/// Matches `<name> Analysis: <description> Health Score: <n>/100` blocks.
///
/// The description runs from the keyword to the first following score marker
/// and may span any number of lines.
pub struct StructuredExtractor;

impl Extractor for StructuredExtractor {
    fn name(&self) -> &'static str {
        "structured"
    }

    fn extract(&self, text: &str) -> Vec<IngredientRecord> {
        let mut records = Vec::new();
        let mut floor = 0;
        let mut matched = 0;

        while let Some(head) = next_analysis_head(text, floor, floor) {
            let Some(marker) = next_score_marker(text, head.body_start) else {
                break;
            };
            matched += 1;

            let description = &text[head.body_start..marker.start];
            match marker.value() {
                Some(score) => match IngredientRecord::new(head.name, description, score) {
                    Some(record) => records.push(record),
                    None => debug!("Dropping '{}': score {} out of range or empty name", head.name, score),
                },
                None => debug!("Dropping '{}': unreadable score {}", head.name, marker.digits),
            }

            floor = marker.end;
        }

        info!(
            "Structured extraction matched {} blocks, kept {}",
            matched,
            records.len()
        );
        records
    }
}
