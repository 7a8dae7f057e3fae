//! Search-key normalizer: NFD, drop non-spacing marks, lowercase
//!
//! The client-side search compares user input against these keys, so the
//! folding here has to stay in lockstep with the browser's
//! `s.normalize("NFD").replace(/\p{Mn}/gu, "").toLowerCase()`.
//!
//! # Guarantees
//!
//! - **Deterministic**: depends only on the Unicode tables, never on locale
//! - **Idempotent**: `normalize(normalize(x)) == normalize(x)` for text
//!   whose lowercase mapping introduces no new marks
//! - **Mark-free**: output contains no general category `Mn` code points
//!   coming from the decomposition

use unicode_normalization::UnicodeNormalization;
use unicode_properties::{GeneralCategory, UnicodeGeneralCategory};

/// Fold `text` into its search key.
///
/// Steps, in this order:
/// 1. Canonical decomposition (NFD)
/// 2. Remove every non-spacing combining mark (`Mn`)
/// 3. Full Unicode lowercase
///
/// Characters without a decomposition or a case mapping (digits,
/// punctuation, `ß`, CJK) pass through untouched.
pub fn normalize(text: &str) -> String {
    let stripped: String = text.nfd().filter(|c| !is_nonspacing_mark(*c)).collect();
    stripped.to_lowercase()
}

#[inline]
fn is_nonspacing_mark(c: char) -> bool {
    c.general_category() == GeneralCategory::NonspacingMark
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_acute() {
        assert_eq!(normalize("Café"), "cafe");
    }

    #[test]
    fn test_normalize_uppercase_accents() {
        assert_eq!(normalize("ÀÉÎ"), "aei");
    }

    #[test]
    fn test_normalize_plain_ascii_unchanged() {
        assert_eq!(normalize("hello"), "hello");
        assert_eq!(normalize("Allegro"), "allegro");
    }

    #[test]
    fn test_normalize_musical_terms() {
        assert_eq!(normalize("Più"), "piu");
        assert_eq!(normalize("Ré"), "re");
        assert_eq!(normalize("Über"), "uber");
        assert_eq!(normalize("Crescendo poco à poco"), "crescendo poco a poco");
    }

    #[test]
    fn test_normalize_eszett_is_kept() {
        // ß has no canonical decomposition and lowercases to itself;
        // it is not expanded to "ss".
        assert_eq!(normalize("Straße"), "straße");
        assert_eq!(normalize("STRASSE"), "strasse");
    }

    #[test]
    fn test_normalize_already_decomposed_input() {
        // "e" + U+0301 COMBINING ACUTE ACCENT
        assert_eq!(normalize("Cafe\u{0301}"), "cafe");
    }

    #[test]
    fn test_normalize_keeps_spacing_marks() {
        // U+093E DEVANAGARI VOWEL SIGN AA is Mc, not Mn
        assert_eq!(normalize("का"), "का");
    }

    #[test]
    fn test_normalize_uncased_passthrough() {
        assert_eq!(normalize("123 — ♩ = 60"), "123 — ♩ = 60");
        assert_eq!(normalize("音楽"), "音楽");
    }

    #[test]
    fn test_normalize_strips_precomposed_non_latin_marks() {
        // Greek tonos decomposes to U+0301
        assert_eq!(normalize("Ἄλφα"), "αλφα");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for s in ["Café", "ÀÉÎ", "Straße", "Più mosso", "Ad libitum"] {
            let once = normalize(s);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_normalize_determinism_100_iterations() {
        let first = normalize("Sforzando — Ça ira, Überall");
        for i in 0..100 {
            assert_eq!(
                normalize("Sforzando — Ça ira, Überall"),
                first,
                "Non-determinism at iteration {}",
                i
            );
        }
    }
}
