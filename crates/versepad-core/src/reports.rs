//! Serializable results for presentation layers.
//!
//! These structs carry plain data only. Ordering and truncation of rhyme
//! sets happen here, at the boundary, since the engine itself returns
//! unordered sets.

use std::collections::HashSet;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::PronunciationDictionary;
use crate::lexicon::Availability;
use crate::meter::{self, MeterLabel, StressPattern};
use crate::phonetics::{Transcription, normalize};
use crate::rhyme::RhymeIndex;
use crate::syllables;
use crate::text;

/// Everything known about one word.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WordReport {
    /// The word as given.
    pub word: String,
    /// Normalized lookup key.
    pub normalized: String,
    /// Whether the dictionary knows the word.
    pub known: bool,
    /// Every pronunciation, default first.
    pub pronunciations: Vec<String>,
    /// Syllables of the default pronunciation, as phoneme strings.
    pub syllables: Vec<String>,
    /// Syllable count, if known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syllable_count: Option<usize>,
    /// Hyphenated display form.
    pub hyphenated: String,
    /// Stress levels of the default pronunciation.
    pub stress: StressPattern,
    /// Rhyme key of the default pronunciation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rhyme_key: Option<String>,
}

impl WordReport {
    /// Look `word` up and describe it. A miss gives a report with
    /// `known: false` and the word itself as the hyphenated form.
    pub fn build(dictionary: &PronunciationDictionary, word: &str) -> Self {
        let transcriptions = dictionary.lookup(word);
        let first = transcriptions.first();
        let breakdown = syllables::word_syllables(dictionary, word);

        Self {
            word: word.to_string(),
            normalized: normalize(word),
            known: first.is_some(),
            pronunciations: transcriptions.iter().map(Transcription::to_string).collect(),
            syllables: breakdown.syllables.iter().map(ToString::to_string).collect(),
            syllable_count: breakdown.syllable_count,
            hyphenated: breakdown.hyphenated,
            stress: first.map_or_else(StressPattern::default, |t| {
                StressPattern::from_levels(t.stresses().map(|s| s.level()).collect::<Vec<_>>())
            }),
            rhyme_key: first.map(Transcription::rhyme_key_text),
        }
    }
}

/// Which rhyme set to report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum RhymeKind {
    /// Identical rhyme keys.
    #[default]
    Perfect,
    /// Same final two phonemes.
    Near,
    /// Perfect rhymes longer than one syllable.
    Multi,
}

impl RhymeKind {
    /// Lowercase name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Perfect => "perfect",
            Self::Near => "near",
            Self::Multi => "multi",
        }
    }
}

/// A sorted, possibly truncated rhyme set.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct RhymeReport {
    /// The query word.
    pub word: String,
    /// Which rhyme set this is.
    pub kind: RhymeKind,
    /// Size of the full set before truncation.
    pub total: usize,
    /// Rhymes in alphabetical order.
    pub rhymes: Vec<String>,
    /// Whether `rhymes` was cut to the limit.
    pub truncated: bool,
}

impl RhymeReport {
    /// Query `index` and order the result alphabetically, keeping at most
    /// `limit` entries when a limit is given.
    pub fn build(index: &RhymeIndex<'_>, word: &str, kind: RhymeKind, limit: Option<usize>) -> Self {
        let set = match kind {
            RhymeKind::Perfect => index.perfect_rhymes(word),
            RhymeKind::Near => index.near_rhymes(word),
            RhymeKind::Multi => index.multisyllabic_rhymes(word),
        };
        Self::from_set(word, kind, &set, limit)
    }

    /// Order and truncate an already computed rhyme set.
    pub fn from_set(word: &str, kind: RhymeKind, set: &HashSet<&str>, limit: Option<usize>) -> Self {
        let mut rhymes: Vec<String> = set.iter().map(ToString::to_string).collect();
        rhymes.sort_unstable();
        let total = rhymes.len();
        if let Some(limit) = limit {
            rhymes.truncate(limit);
        }
        Self {
            word: word.to_string(),
            kind,
            total,
            truncated: rhymes.len() < total,
            rhymes,
        }
    }
}

/// Meter of a single line of text.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MeterReport {
    /// The line as given.
    pub text: String,
    /// Normalized words that were looked up.
    pub words: Vec<String>,
    /// Concatenated stress levels.
    pub pattern: StressPattern,
    /// Classification of `pattern`.
    pub meter: MeterLabel,
    /// Words missing from the dictionary.
    pub unknown_words: Vec<String>,
}

impl MeterReport {
    /// Analyze one line.
    pub fn build(dictionary: &PronunciationDictionary, line: &str) -> Self {
        let words = text::extract_words(line);
        let analysis = meter::analyze(dictionary, &words);
        Self {
            text: line.to_string(),
            words,
            pattern: analysis.pattern,
            meter: analysis.meter,
            unknown_words: analysis.unknown_words,
        }
    }
}

/// Analysis of one line of a poem.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LineReport {
    /// 1-based stanza number.
    pub stanza: usize,
    /// 1-based line number across the whole poem, blank lines excluded.
    pub line: usize,
    /// The line text, trimmed.
    pub text: String,
    /// Total syllables of the words the dictionary knows.
    pub syllable_count: usize,
    /// Concatenated stress levels.
    pub pattern: StressPattern,
    /// Classification of `pattern`.
    pub meter: MeterLabel,
    /// Words missing from the dictionary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_words: Vec<String>,
}

/// Analysis of a whole poem.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScanReport {
    /// State of the dictionary used for the scan.
    pub dictionary: Availability,
    /// Number of stanzas.
    pub stanza_count: usize,
    /// Number of non-blank lines.
    pub line_count: usize,
    /// Per-line results in document order.
    pub lines: Vec<LineReport>,
    /// Stress pattern of all lines concatenated.
    pub pattern: StressPattern,
    /// Classification of the whole-poem pattern.
    pub meter: MeterLabel,
    /// Last word of the poem, for the rhyme panel.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub closing_word: Option<String>,
    /// Distinct unknown words across the poem, sorted.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_words: Vec<String>,
}

/// Suggested rhyming phrases.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PhraseReport {
    /// The query word.
    pub word: String,
    /// Phrases in suggestion order.
    pub phrases: Vec<String>,
    /// Seed used for the random source, when one was given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embedded() -> PronunciationDictionary {
        PronunciationDictionary::embedded().unwrap()
    }

    #[test]
    fn word_report_for_known_word() {
        let dict = embedded();
        let report = WordReport::build(&dict, "Read");
        assert!(report.known);
        assert_eq!(report.normalized, "read");
        assert_eq!(report.pronunciations, vec!["R IY1 D", "R EH1 D"]);
        assert_eq!(report.syllable_count, Some(1));
        assert_eq!(report.stress.levels(), &[1]);
        assert_eq!(report.rhyme_key.as_deref(), Some("IY1 D"));
    }

    #[test]
    fn word_report_for_unknown_word() {
        let dict = embedded();
        let report = WordReport::build(&dict, "Zyzzyva");
        assert!(!report.known);
        assert!(report.pronunciations.is_empty());
        assert_eq!(report.hyphenated, "Zyzzyva");
        assert!(report.stress.is_empty());
        assert!(report.rhyme_key.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("syllable_count").is_none());
    }

    #[test]
    fn rhyme_report_is_sorted_and_truncated() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let report = RhymeReport::build(&index, "cat", RhymeKind::Perfect, Some(3));
        assert_eq!(report.total, 7);
        assert_eq!(report.rhymes, vec!["bat", "flat", "hat"]);
        assert!(report.truncated);

        let full = RhymeReport::build(&index, "cat", RhymeKind::Perfect, None);
        assert!(!full.truncated);
        assert_eq!(full.rhymes.len(), 7);
        assert!(full.rhymes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rhyme_report_kinds() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let multi = RhymeReport::build(&index, "day", RhymeKind::Multi, None);
        assert!(multi.rhymes.contains(&"away".to_string()));
        assert!(!multi.rhymes.contains(&"say".to_string()));

        let near = RhymeReport::build(&index, "see", RhymeKind::Near, None);
        assert_eq!(near.rhymes, vec!["sea"]);
    }

    #[test]
    fn meter_report_for_line() {
        let dict = embedded();
        let report = MeterReport::build(&dict, "Silver river");
        assert_eq!(report.words, vec!["silver", "river"]);
        assert_eq!(report.meter, MeterLabel::Trochaic);
        assert!(report.unknown_words.is_empty());
    }

    #[test]
    fn rhyme_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&RhymeKind::Multi).unwrap(), "\"multi\"");
        assert_eq!(RhymeKind::Near.as_str(), "near");
    }
}
