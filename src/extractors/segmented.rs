use log::{debug, info};

use super::scanner::{next_analysis_head, score_markers};
use super::Extractor;
use crate::model::IngredientRecord;

const NAME_SOURCE_CHARS: usize = 100;
const MAX_NAME_CHARS: usize = 50;

/// Splits the text on `Health Score: <n>/100` markers and pairs every score
/// with the text before it.
///
/// Used when the structured pattern finds nothing. Text after the last marker
/// has no score and is discarded.
pub struct SegmentedExtractor;

impl Extractor for SegmentedExtractor {
    fn name(&self) -> &'static str {
        "segmented"
    }

    fn extract(&self, text: &str) -> Vec<IngredientRecord> {
        let mut records = Vec::new();
        let mut segment_start = 0;

        for marker in score_markers(text) {
            let segment = text[segment_start..marker.start].trim();
            segment_start = marker.end;

            if segment.is_empty() {
                continue;
            }
            let Some(score) = marker.value() else {
                debug!("Skipping segment with unreadable score {}", marker.digits);
                continue;
            };

            if let Some(record) = segment_record(segment, score) {
                records.push(record);
            } else {
                debug!("Skipping segment with score {}", score);
            }
        }

        info!("Segmented extraction kept {} records", records.len());
        records
    }
}

fn segment_record(segment: &str, score: i64) -> Option<IngredientRecord> {
    if let Some(head) = next_analysis_head(segment, 0, 0) {
        return IngredientRecord::new(head.name, &segment[head.body_start..], score);
    }

    IngredientRecord::new(&derive_name(segment), segment, score)
}

/// Names a segment after its last sentence, cut to [`MAX_NAME_CHARS`].
fn derive_name(segment: &str) -> String {
    let source = segment
        .split(|c: char| matches!(c, '.' | '!' | '?'))
        .map(str::trim)
        .rfind(|s| !s.is_empty())
        .unwrap_or_else(|| tail(segment, NAME_SOURCE_CHARS).trim());

    if source.chars().count() > MAX_NAME_CHARS {
        let truncated: String = source.chars().take(MAX_NAME_CHARS).collect();
        format!("{}...", truncated)
    } else {
        source.to_string()
    }
}

fn tail(text: &str, chars: usize) -> &str {
    let skip = text.chars().count().saturating_sub(chars);
    text.char_indices()
        .nth(skip)
        .map(|(i, _)| &text[i..])
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract(text: &str) -> Vec<IngredientRecord> {
        SegmentedExtractor.extract(text)
    }

    #[test]
    fn test_two_markers_without_analysis_keyword() {
        let text = "Sugar is a refined sweetener. Raises blood glucose quickly. Health Score: 15/100\n\
                    Olive oil provides monounsaturated fats! Health Score: 85/100";
        let records = extract(text);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name(), "Raises blood glucose quickly");
        assert_eq!(
            records[0].description(),
            "Sugar is a refined sweetener. Raises blood glucose quickly."
        );
        assert_eq!(records[0].health_score(), 15);
        assert_eq!(records[1].name(), "Olive oil provides monounsaturated fats");
        assert_eq!(
            records[1].description(),
            "Olive oil provides monounsaturated fats!"
        );
        assert_eq!(records[1].health_score(), 85);
    }

    #[test]
    fn test_trailing_segment_is_discarded() {
        let records = extract("Salt. Health Score: 30/100 Overall this product is average.");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Salt");
    }

    #[test]
    fn test_long_name_is_truncated() {
        let sentence = "Maltodextrin is a highly processed starch derivative used as filler";
        let records = extract(&format!("{} Health Score: 25/100", sentence));

        assert_eq!(records.len(), 1);
        let expected: String = sentence.chars().take(50).collect();
        assert_eq!(records[0].name(), format!("{}...", expected));
        assert_eq!(records[0].description(), sentence);
    }

    #[test]
    fn test_name_of_exactly_fifty_chars_is_kept() {
        let sentence = "a".repeat(50);
        let records = extract(&format!("{} Health Score: 60/100", sentence));
        assert_eq!(records[0].name(), sentence);
    }

    #[test]
    fn test_punctuation_only_segment_uses_tail() {
        let records = extract("... Health Score: 40/100");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "...");
        assert_eq!(records[0].description(), "...");
    }

    #[test]
    fn test_empty_segments_and_bad_scores_are_skipped() {
        let text = "Health Score: 50/100 Corn syrup. Health Score: 120/100 \
                    Honey. Health Score: -1/100 Oats. Health Score: 77/100";
        let records = extract(text);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Oats");
        assert_eq!(records[0].health_score(), 77);
    }

    #[test]
    fn test_segment_with_analysis_keyword() {
        let records = extract("Intro text: Cane Sugar Analysis: refined sugar Health Score: 12/100");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name(), "Cane Sugar");
        assert_eq!(records[0].description(), "refined sugar");
    }

    #[test]
    fn test_no_marker() {
        assert!(extract("This product contains sugar and salt.").is_empty());
    }

    #[test]
    fn test_tail() {
        assert_eq!(tail("abcdef", 3), "def");
        assert_eq!(tail("ab", 3), "ab");
        assert_eq!(tail("çàé", 2), "àé");
    }
}
