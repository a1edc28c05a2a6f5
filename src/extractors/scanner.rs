//! Keyword scanner shared by the extraction strategies.
//!
//! Fields in analysis prose are delimited by two literal keywords,
//! `Analysis:` and `Health Score: <n>/100`, never by line breaks. The scanner
//! finds them with a single forward search per keyword and no backtracking, so
//! the cost stays linear in the input size.

const ANALYSIS_KEYWORD: &str = "analysis:";
const HEALTH_KEYWORD: &str = "health";
const SCORE_KEYWORD: &str = "score:";
const SCORE_SUFFIX: &str = "/100";

/// A `Health Score: <n>/100` occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreMarker<'a> {
    /// Byte offset where `Health` starts
    pub start: usize,
    /// Byte offset just past `/100`
    pub end: usize,
    /// The captured number, sign included
    pub digits: &'a str,
}

impl ScoreMarker<'_> {
    /// The captured number, or `None` when it does not fit an `i64`
    pub fn value(&self) -> Option<i64> {
        self.digits.parse().ok()
    }
}

/// A `<name> Analysis:` occurrence that can head an ingredient record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisHead<'a> {
    /// The cleaned name preceding the keyword
    pub name: &'a str,
    /// Byte offset of the keyword itself
    pub keyword_start: usize,
    /// Byte offset where the description starts (after the keyword's whitespace)
    pub body_start: usize,
}

/// Finds `keyword` (lowercase ASCII) in `text` at or after `from`, ignoring ASCII case.
pub fn find_keyword(text: &str, from: usize, keyword: &str) -> Option<usize> {
    let haystack = text.as_bytes();
    let needle = keyword.as_bytes();
    if needle.is_empty() || from >= haystack.len() || haystack.len() - from < needle.len() {
        return None;
    }

    (from..=haystack.len() - needle.len())
        .find(|&i| haystack[i..i + needle.len()].eq_ignore_ascii_case(needle))
}

/// Characters allowed in an ingredient name
pub fn is_name_char(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || matches!(c, '(' | ')' | ',' | '.' | '-')
}

/// Next score marker starting at or after `from`.
pub fn next_score_marker(text: &str, from: usize) -> Option<ScoreMarker<'_>> {
    let mut search = from;

    while let Some(start) = find_keyword(text, search, HEALTH_KEYWORD) {
        if let Some(marker) = match_score_marker(text, start) {
            return Some(marker);
        }
        search = start + HEALTH_KEYWORD.len();
    }

    None
}

/// All score markers in order of appearance, non-overlapping
pub fn score_markers(text: &str) -> impl Iterator<Item = ScoreMarker<'_>> {
    let mut from = 0;
    std::iter::from_fn(move || {
        let marker = next_score_marker(text, from)?;
        from = marker.end;
        Some(marker)
    })
}

fn match_score_marker(text: &str, start: usize) -> Option<ScoreMarker<'_>> {
    let mut pos = start + HEALTH_KEYWORD.len();

    let after_space = skip_whitespace(text, pos);
    if after_space == pos {
        return None;
    }
    pos = after_space;

    if !starts_with_keyword(text, pos, SCORE_KEYWORD) {
        return None;
    }
    pos = skip_whitespace(text, pos + SCORE_KEYWORD.len());

    let digits_start = pos;
    let bytes = text.as_bytes();
    if matches!(bytes.get(pos), Some(b'-' | b'+')) {
        pos += 1;
    }
    let first_digit = pos;
    while bytes.get(pos).is_some_and(u8::is_ascii_digit) {
        pos += 1;
    }
    if pos == first_digit {
        return None;
    }
    let digits_end = pos;

    if !text[pos..].starts_with(SCORE_SUFFIX) {
        return None;
    }

    Some(ScoreMarker {
        start,
        end: pos + SCORE_SUFFIX.len(),
        digits: &text[digits_start..digits_end],
    })
}

/// First `Analysis:` keyword at or after `from` that heads a record.
///
/// The name is the run of name characters right before the keyword, never
/// reaching below `floor`. A keyword heads a record only when whitespace
/// surrounds it and the cleaned name is non-empty.
pub fn next_analysis_head(text: &str, floor: usize, from: usize) -> Option<AnalysisHead<'_>> {
    let mut search = from.max(floor);

    while let Some(keyword_start) = find_keyword(text, search, ANALYSIS_KEYWORD) {
        search = keyword_start + ANALYSIS_KEYWORD.len();

        if let Some(head) = match_analysis_head(text, floor, keyword_start) {
            return Some(head);
        }
    }

    None
}

fn match_analysis_head(text: &str, floor: usize, keyword_start: usize) -> Option<AnalysisHead<'_>> {
    let before = &text[floor..keyword_start];
    if !before.chars().next_back().is_some_and(char::is_whitespace) {
        return None;
    }

    let keyword_end = keyword_start + ANALYSIS_KEYWORD.len();
    let body_start = skip_whitespace(text, keyword_end);
    if body_start == keyword_end {
        return None;
    }

    let name_start = before
        .char_indices()
        .rev()
        .take_while(|(_, c)| is_name_char(*c))
        .last()
        .map(|(i, _)| floor + i)?;

    let name = clean_name(&text[name_start..keyword_start]);
    if name.is_empty() {
        return None;
    }

    Some(AnalysisHead {
        name,
        keyword_start,
        body_start,
    })
}

/// Trims whitespace and the separator punctuation a name run picks up from
/// the previous sentence or a list bullet.
fn clean_name(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | ',' | '-'))
}

fn starts_with_keyword(text: &str, pos: usize, keyword: &str) -> bool {
    text.as_bytes()
        .get(pos..pos + keyword.len())
        .is_some_and(|slice| slice.eq_ignore_ascii_case(keyword.as_bytes()))
}

fn skip_whitespace(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .find(|(_, c)| !c.is_whitespace())
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_keyword_ignores_case() {
        assert_eq!(find_keyword("Sugar ANALYSIS: x", 0, "analysis:"), Some(6));
        assert_eq!(find_keyword("Sugar analysis: x", 7, "analysis:"), None);
        assert_eq!(find_keyword("short", 0, "analysis:"), None);
        assert_eq!(find_keyword("", 0, "health"), None);
    }

    #[test]
    fn test_score_marker_basic() {
        let text = "good stuff. Health Score: 73/100.";
        let marker = next_score_marker(text, 0).unwrap();
        assert_eq!(marker.start, 12);
        assert_eq!(&text[marker.start..marker.end], "Health Score: 73/100");
        assert_eq!(marker.value(), Some(73));
    }

    #[test]
    fn test_score_marker_spacing_and_case() {
        let text = "HEALTH\n  score:42/100";
        let marker = next_score_marker(text, 0).unwrap();
        assert_eq!(marker.value(), Some(42));
        assert_eq!(marker.end, text.len());
    }

    #[test]
    fn test_score_marker_with_sign() {
        let marker = next_score_marker("Health Score: -5/100", 0).unwrap();
        assert_eq!(marker.digits, "-5");
        assert_eq!(marker.value(), Some(-5));
    }

    #[test]
    fn test_score_marker_overflow() {
        let marker = next_score_marker("Health Score: 99999999999999999999999/100", 0).unwrap();
        assert_eq!(marker.value(), None);
    }

    #[test]
    fn test_incomplete_markers_are_skipped() {
        assert!(next_score_marker("Health Score: high", 0).is_none());
        assert!(next_score_marker("Health Score: 50/10", 0).is_none());
        assert!(next_score_marker("HealthScore: 50/100", 0).is_none());

        let text = "Health Score: n/a. Health Score: 60/100";
        let marker = next_score_marker(text, 0).unwrap();
        assert_eq!(marker.value(), Some(60));
    }

    #[test]
    fn test_score_markers_in_order() {
        let text = "a Health Score: 1/100 b Health Score: 2/100 c";
        let values: Vec<_> = score_markers(text).filter_map(|m| m.value()).collect();
        assert_eq!(values, vec![1, 2]);
    }

    #[test]
    fn test_analysis_head_name() {
        let text = "Whole Wheat Flour Analysis: fiber";
        let head = next_analysis_head(text, 0, 0).unwrap();
        assert_eq!(head.name, "Whole Wheat Flour");
        assert_eq!(&text[head.body_start..], "fiber");
    }

    #[test]
    fn test_analysis_head_stops_at_non_name_chars() {
        let text = "Results: Palm Oil (refined) Analysis: saturated fat";
        let head = next_analysis_head(text, 0, 0).unwrap();
        assert_eq!(head.name, "Palm Oil (refined)");
    }

    #[test]
    fn test_analysis_head_respects_floor() {
        let text = "20/100. Vitamin C Analysis: antioxidant";
        let head = next_analysis_head(text, 6, 6).unwrap();
        assert_eq!(head.name, "Vitamin C");
    }

    #[test]
    fn test_analysis_head_strips_bullet() {
        let head = next_analysis_head("- Salt Analysis: sodium", 0, 0).unwrap();
        assert_eq!(head.name, "Salt");
    }

    #[test]
    fn test_analysis_head_requires_whitespace() {
        assert!(next_analysis_head("SaltAnalysis: sodium", 0, 0).is_none());
        assert!(next_analysis_head("Salt Analysis:sodium", 0, 0).is_none());
        assert!(next_analysis_head("Analysis: sodium", 0, 0).is_none());
        assert!(next_analysis_head("**Salt** Analysis: sodium", 0, 0).is_none());
    }

    #[test]
    fn test_analysis_head_skips_invalid_occurrence() {
        let text = "Note:Analysis: x. Sugar Analysis: sweet";
        let head = next_analysis_head(text, 0, 0).unwrap();
        assert_eq!(head.name, "x. Sugar");
    }
}
