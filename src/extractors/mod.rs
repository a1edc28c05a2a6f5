use log::debug;

use crate::model::IngredientRecord;

pub mod scanner;
mod segmented;
mod structured;

pub use self::segmented::SegmentedExtractor;
pub use self::structured::StructuredExtractor;

/// One way of recovering ingredient records from analysis prose
pub trait Extractor {
    /// Short identifier used in log output (e.g., "structured")
    fn name(&self) -> &'static str;

    /// Records in order of appearance; empty when the strategy does not apply.
    fn extract(&self, text: &str) -> Vec<IngredientRecord>;
}

/// Extraction strategies in priority order
pub fn default_extractors() -> Vec<Box<dyn Extractor>> {
    vec![Box::new(StructuredExtractor), Box::new(SegmentedExtractor)]
}

/// Runs `extractors` in order and returns the first non-empty result.
pub fn extract_with(extractors: &[Box<dyn Extractor>], text: &str) -> Vec<IngredientRecord> {
    for extractor in extractors {
        let records = extractor.extract(text);
        if !records.is_empty() {
            debug!(
                "Extractor '{}' recovered {} ingredients",
                extractor.name(),
                records.len()
            );
            return records;
        }
        debug!("Extractor '{}' found nothing", extractor.name());
    }

    Vec::new()
}

/// Recovers ingredient records from analysis prose.
///
/// The structured `<name> Analysis: ... Health Score: n/100` pattern is
/// authoritative whenever it yields a record; otherwise the text is segmented
/// on score markers. Never fails: unparseable text gives an empty vector.
pub fn extract(text: &str) -> Vec<IngredientRecord> {
    extract_with(&default_extractors(), text)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<IngredientRecord>);

    impl Extractor for Fixed {
        fn name(&self) -> &'static str {
            "fixed"
        }

        fn extract(&self, _text: &str) -> Vec<IngredientRecord> {
            self.0.clone()
        }
    }

    #[test]
    fn test_structured_takes_precedence() {
        // Segmentation would also turn the trailing note into a record.
        let records = extract("X Analysis: Y Health Score: 73/100 Extra note. Health Score: 40/100");
        assert_eq!(records, vec![IngredientRecord::new("X", "Y", 73).unwrap()]);
    }

    #[test]
    fn test_falls_back_to_segments() {
        let records = extract("Cheap filler. Health Score: 10/100 Pure protein. Health Score: 90/100");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].description(), "Cheap filler.");
        assert_eq!(records[1].description(), "Pure protein.");
    }

    #[test]
    fn test_falls_back_when_structured_scores_are_invalid() {
        // Structured match exists but its only record is dropped, so the
        // segmented strategy runs and also rejects the score.
        assert!(extract("X Analysis: Y Health Score: 150/100").is_empty());
    }

    #[test]
    fn test_no_markers_yields_nothing() {
        assert!(extract("Sugar Analysis: sweet but no score anywhere").is_empty());
    }

    #[test]
    fn test_extract_with_custom_order() {
        let record = IngredientRecord::new("Fixed", "Always", 1).unwrap();
        let extractors: Vec<Box<dyn Extractor>> = vec![
            Box::new(Fixed(Vec::new())),
            Box::new(Fixed(vec![record.clone()])),
            Box::new(StructuredExtractor),
        ];

        let records = extract_with(&extractors, "X Analysis: Y Health Score: 73/100");
        assert_eq!(records, vec![record]);
    }
}
