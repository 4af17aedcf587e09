//! Orthographic folding and diacritic stripping.
//!
//! Latin editions disagree on `j`/`i` and `v`/`u`, mark vowel length with
//! macrons and breves, and use brackets for editorial notes. Folding erases
//! all of that so that `Iūlius`, `Julius` and `[Iulius]` index the same way.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\s]+").expect("letter class pattern is valid"));

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{L}\p{N}\s]+").expect("alphanumeric class pattern is valid")
});

const EDITORIAL_MARKS: [char; 8] = ['[', ']', '{', '}', '(', ')', '<', '>'];

/// Fold spelling variants and strip diacritics.
///
/// ```
/// use diachron::analysis::fold;
///
/// assert_eq!(fold("iūs"), "ius");
/// assert_eq!(fold("[uirtus]"), "uirtus");
/// assert_eq!(fold("jvvenis"), "iuuenis");
/// ```
pub fn fold(text: &str) -> String {
    let replaced: String = text
        .chars()
        .filter(|c| !EDITORIAL_MARKS.contains(c))
        .map(|c| match c {
            'j' => 'i',
            'v' => 'u',
            other => other,
        })
        .collect();

    replaced
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .nfc()
        .collect()
}

/// Prepare a raw corpus line for tokenization.
///
/// Everything that is not a letter becomes whitespace.
pub fn normalize_line(line: &str) -> String {
    NON_LETTERS.replace_all(&fold(line), " ").into_owned()
}

/// Normalize a single token or user-supplied word.
pub fn normalize_token(token: &str) -> String {
    fold(&token.trim().to_lowercase())
}

/// Render a source line for display next to an occurrence.
///
/// Unlike [`normalize_line`] digits survive, since they often carry verse
/// numbering.
pub fn normalize_display_line(line: &str) -> String {
    NON_ALPHANUMERIC.replace_all(&fold(line), " ").into_owned()
}
