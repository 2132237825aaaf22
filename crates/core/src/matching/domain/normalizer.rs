use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

// Letters, digits, percent, apostrophe and hyphen survive; everything else
// is a separator. Keeps contractions ("it's") and tokens like "100%" whole.
static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[a-zA-Z0-9%'-]+").unwrap());

/// Canonical form of a piece of transcript or search-phrase text: lowercase,
/// diacritics folded to their base letter, punctuation dropped, tokens joined
/// by single spaces.
///
/// Idempotent, and never fails regardless of input.
pub fn normalize(text: &str) -> String {
    let stripped = strip_diacritics(&text.to_lowercase());
    WORD_PATTERN
        .find_iter(&stripped)
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !is_combining_mark(*c)).collect()
}
