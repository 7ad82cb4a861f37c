//! Whole-poem analysis.
//!
//! Splits a document into stanzas and lines, then runs syllable counting
//! and meter classification on every line in parallel. Line results come
//! back in document order.

use std::collections::BTreeSet;

use rayon::prelude::*;

use crate::dictionary::PronunciationDictionary;
use crate::lexicon::Lexicon;
use crate::meter::{self, StressPattern};
use crate::reports::{LineReport, ScanReport};
use crate::syllables;
use crate::text;

/// A line to analyze, located in the document.
struct LineRef<'a> {
    stanza: usize,
    line: usize,
    text: &'a str,
}

/// Analyze every line of `text` against `lexicon`'s dictionary.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn scan(lexicon: &Lexicon, text: &str) -> ScanReport {
    let stanzas = text::split_stanzas(text);
    let refs: Vec<LineRef<'_>> = stanzas
        .iter()
        .enumerate()
        .flat_map(|(s, stanza)| {
            text::split_lines(stanza)
                .into_iter()
                .map(move |line| (s + 1, line))
        })
        .enumerate()
        .map(|(i, (stanza, line))| LineRef {
            stanza,
            line: i + 1,
            text: line,
        })
        .collect();

    let dictionary = lexicon.dictionary();
    let lines: Vec<LineReport> = refs
        .par_iter()
        .map(|line| analyze_line(dictionary, line))
        .collect();

    let mut pattern = StressPattern::default();
    let mut unknown = BTreeSet::new();
    for line in &lines {
        pattern.extend(line.pattern.levels().iter().copied());
        unknown.extend(line.unknown_words.iter().cloned());
    }
    let meter = meter::classify(&pattern);

    tracing::debug!(
        stanzas = stanzas.len(),
        lines = lines.len(),
        %meter,
        "scanned document"
    );

    ScanReport {
        dictionary: lexicon.availability().clone(),
        stanza_count: stanzas.len(),
        line_count: lines.len(),
        closing_word: text::last_word(text).map(str::to_string),
        unknown_words: unknown.into_iter().collect(),
        lines,
        pattern,
        meter,
    }
}

fn analyze_line(dictionary: &PronunciationDictionary, line: &LineRef<'_>) -> LineReport {
    let words = text::extract_words(line.text);
    let analysis = meter::analyze(dictionary, &words);
    let syllable_count: usize = words
        .iter()
        .filter_map(|w| syllables::syllable_count(dictionary, w))
        .sum();

    LineReport {
        stanza: line.stanza,
        line: line.line,
        text: line.text.to_string(),
        syllable_count,
        pattern: analysis.pattern,
        meter: analysis.meter,
        unknown_words: analysis.unknown_words,
    }
}
