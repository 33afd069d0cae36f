//! Script-based language hint for message selection.
//!
//! Not language identification: any Devanagari character means Hindi, else
//! any Telugu character means Telugu, else English. Mixed Devanagari/Telugu
//! text is tagged Hindi because Devanagari is checked first.

use super::types::Language;

const DEVANAGARI: (char, char) = ('\u{0900}', '\u{097F}');
const TELUGU: (char, char) = ('\u{0C00}', '\u{0C7F}');

/// Detect the language of already-normalized text.
pub fn detect_language(normalized: &str) -> Language {
    if contains_script(normalized, DEVANAGARI) {
        Language::Hi
    } else if contains_script(normalized, TELUGU) {
        Language::Te
    } else {
        Language::En
    }
}

fn contains_script(text: &str, (lo, hi): (char, char)) -> bool {
    text.chars().any(|c| (lo..=hi).contains(&c))
}
