//! Cleanup of raw OCR output before it is sent for analysis.
//!
//! Text recognized from photographed labels has line breaks mid-word, stray
//! punctuation and misread glyphs. The allowed-character whitelist trades
//! recall for precision because the extractor relies on clean delimiters.

use log::debug;

use crate::AnalysisError;

/// Normalized text shorter than this is rejected
pub const MIN_TEXT_LENGTH: usize = 5;

/// Cleans recognized label text.
///
/// Steps, in order:
/// 1. `|` and `\` become `I` (OCR confusion for a capital I)
/// 2. whitespace runs collapse to a single space
/// 3. characters other than alphanumerics, whitespace and `, . - ( ) %` are dropped
/// 4. the result is trimmed
///
/// # Errors
/// Returns [`AnalysisError::InsufficientText`] when fewer than
/// [`MIN_TEXT_LENGTH`] characters remain.
pub fn normalize(raw: &str) -> Result<String, AnalysisError> {
    let replaced: String = raw
        .chars()
        .map(|c| if matches!(c, '|' | '\\') { 'I' } else { c })
        .collect();

    let collapsed = collapse_whitespace(&replaced);

    let filtered: String = collapsed.chars().filter(|c| is_allowed(*c)).collect();
    let normalized = filtered.trim().to_string();

    let length = normalized.chars().count();
    if length < MIN_TEXT_LENGTH {
        debug!("Normalized text too short: {} characters", length);
        return Err(AnalysisError::InsufficientText);
    }

    debug!(
        "Normalized {} raw characters into {}",
        raw.chars().count(),
        length
    );
    Ok(normalized)
}

fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                out.push(' ');
            }
            in_whitespace = true;
        } else {
            out.push(c);
            in_whitespace = false;
        }
    }

    out
}

fn is_allowed(c: char) -> bool {
    c.is_alphanumeric() || c.is_whitespace() || matches!(c, ',' | '.' | '-' | '(' | ')' | '%')
}
