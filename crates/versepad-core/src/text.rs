//! Text processing utilities.
//!
//! Provides word extraction and stanza/line splitting for the scanner and
//! the meter analyzer.

use crate::phonetics::normalize;

/// Split text on whitespace and trim surrounding punctuation, keeping the
/// words as written (`"Summer's,"` → `"Summer's"`).
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Extract normalized lookup keys from text.
///
/// Tokens that normalize to nothing (numbers, stray punctuation) are dropped.
pub fn extract_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(normalize)
        .filter(|w| !w.is_empty())
        .collect()
}

/// The last word of the text as written, if any.
///
/// This is the word a rhyme panel looks up when no cursor word is given.
pub fn last_word(text: &str) -> Option<&str> {
    split_words(text)
        .into_iter()
        .rev()
        .find(|w| w.chars().any(|c| c.is_alphabetic()))
}

/// Split text into stanzas (separated by blank lines).
pub fn split_stanzas(text: &str) -> Vec<&str> {
    let mut stanzas = Vec::new();
    let mut start: Option<usize> = None;
    let mut end = 0;
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if line.trim().is_empty() {
            if let Some(s) = start.take() {
                stanzas.push(text[s..end].trim());
            }
        } else {
            start.get_or_insert(line_start);
            end = offset;
        }
    }
    if let Some(s) = start {
        stanzas.push(text[s..end].trim());
    }

    stanzas
}

/// Non-empty, trimmed lines of a stanza.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect()
}
