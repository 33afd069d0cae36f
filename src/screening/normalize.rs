//! Canonical form of free text for phrase matching.
//!
//! Lower-cases, then keeps only word characters separated by single spaces.
//! Both the input and every catalog phrase go through the same function, so
//! a phrase matches whenever its canonical form is a substring of the text's.

/// Character class used by [`normalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    Space,
    Word,
    Other,
}

/// Indic script ranges kept whole, so vowel signs, viramas and nuktas stay
/// attached to their consonants. Dandas (U+0964, U+0965) are punctuation.
const INDIC_WORD_RANGES: &[(char, char)] = &[
    ('\u{0900}', '\u{0963}'), // Devanagari letters and signs
    ('\u{0966}', '\u{097F}'), // Devanagari digits and extensions
    ('\u{0C00}', '\u{0C7F}'), // Telugu
];

/// Classify one (already lower-cased) character.
pub fn classify_char(c: char) -> CharClass {
    if c.is_whitespace() {
        CharClass::Space
    } else if c.is_alphanumeric() || in_ranges(c, INDIC_WORD_RANGES) {
        CharClass::Word
    } else {
        CharClass::Other
    }
}

fn in_ranges(c: char, ranges: &[(char, char)]) -> bool {
    ranges.iter().any(|&(lo, hi)| (lo..=hi).contains(&c))
}

/// Normalize raw text. Empty input yields an empty string.
///
/// `normalize(normalize(x)) == normalize(x)` holds for every input: the output
/// only contains lower-cased word characters and single interior spaces.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lower = text.to_lowercase();
    let mut out = String::with_capacity(lower.len());
    let mut gap = false;

    for c in lower.chars() {
        match classify_char(c) {
            CharClass::Word => {
                if gap && !out.is_empty() {
                    out.push(' ');
                }
                gap = false;
                out.push(c);
            }
            CharClass::Space | CharClass::Other => gap = true,
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_inputs() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \t\n"), "");
        assert_eq!(normalize("?!..."), "");
    }

    #[test]
    fn lower_cases_and_collapses_punctuation() {
        assert_eq!(normalize("  Chest PAIN!!  and   Jaw-pain. "), "chest pain and jaw pain");
        assert_eq!(normalize("can't breathe"), "can t breathe");
    }

    #[test]
    fn keeps_devanagari_words_whole() {
        assert_eq!(normalize("सीने में दर्द!"), "सीने में दर्द");
        assert_eq!(normalize("बढ़ रहा है।"), "बढ़ रहा है");
    }

    #[test]
    fn keeps_telugu_words_whole() {
        assert_eq!(normalize("ఛాతిలో నొప్పి..."), "ఛాతిలో నొప్పి");
    }

    #[test]
    fn digits_are_word_characters() {
        assert_eq!(normalize("Pain 10/10"), "pain 10 10");
    }

    #[test]
    fn classifier_table() {
        assert_eq!(classify_char(' '), CharClass::Space);
        assert_eq!(classify_char('\u{00A0}'), CharClass::Space);
        assert_eq!(classify_char('a'), CharClass::Word);
        assert_eq!(classify_char('7'), CharClass::Word);
        assert_eq!(classify_char('ी'), CharClass::Word); // vowel sign ii
        assert_eq!(classify_char('्'), CharClass::Word); // virama
        assert_eq!(classify_char('़'), CharClass::Word); // nukta
        assert_eq!(classify_char('ి'), CharClass::Word); // telugu vowel sign i
        assert_eq!(classify_char('।'), CharClass::Other);
        assert_eq!(classify_char('॥'), CharClass::Other);
        assert_eq!(classify_char('-'), CharClass::Other);
        assert_eq!(classify_char('⚠'), CharClass::Other);
    }

    #[test]
    fn idempotent_over_mixed_inputs() {
        let samples = [
            "",
            "Chest pain, SUDDEN!!",
            "  mixed सीने में दर्द and ఛాతిలో నొప్పి  ",
            "ΟΔΥΣ. ΣΤΗΘΟΥΣ",
            "İstanbul — ﬁre & ice",
            "tabs\tand\nnewlines\r\n",
            "😀 emoji 😀 only",
            "।॥ danda । separated ॥ words",
        ];
        for s in samples {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {s:?}");
        }
    }

    #[test]
    fn output_has_no_edge_or_double_spaces() {
        let out = normalize(" -- a -- b -- ");
        assert_eq!(out, "a b");
        assert!(!out.contains("  "));
    }
}
