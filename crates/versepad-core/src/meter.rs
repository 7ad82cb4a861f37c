//! Stress patterns and meter classification.
//!
//! A line's [`StressPattern`] is the concatenated stress levels of every
//! nucleus in each word's default pronunciation. Words the dictionary does
//! not know contribute nothing; they are skipped rather than zero-filled.
//!
//! Classification order (first match wins):
//!
//! 1. Iambic: unstressed/stressed alternation over the first `2*(n/2)` syllables
//! 2. Trochaic: stressed/unstressed alternation over the same span
//! 3. Anapestic/Dactylic: contains `001` or `100`
//! 4. Stress-heavy: more stressed than unstressed syllables
//! 5. Light stress: more unstressed than stressed
//! 6. Mixed rhythm: equal counts
//! 7. No pattern: empty
//!
//! Secondary stress (2) counts as stressed throughout.

use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::PronunciationDictionary;
use crate::phonetics::{Stress, normalize};
use crate::text;

/// Ordered stress levels (0, 1 or 2), one per syllable of a line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct StressPattern(Vec<u8>);

impl StressPattern {
    /// Build a pattern from raw levels. Levels above 2 are treated as stressed.
    pub fn from_levels(levels: impl Into<Vec<u8>>) -> Self {
        Self(levels.into())
    }

    /// The levels in order.
    pub fn levels(&self) -> &[u8] {
        &self.0
    }

    /// Number of syllables in the pattern.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the pattern has no syllables.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The pattern reduced to stressed (`true`) / unstressed (`false`).
    pub fn binary(&self) -> Vec<bool> {
        self.0.iter().map(|&level| level > 0).collect()
    }

    /// Count of stressed syllables.
    pub fn stressed_count(&self) -> usize {
        self.0.iter().filter(|&&level| level > 0).count()
    }

    /// Count of unstressed syllables.
    pub fn unstressed_count(&self) -> usize {
        self.0.len() - self.stressed_count()
    }

    fn extend_stresses(&mut self, stresses: impl Iterator<Item = Stress>) {
        self.0.extend(stresses.map(Stress::level));
    }
}

impl Extend<u8> for StressPattern {
    fn extend<I: IntoIterator<Item = u8>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl fmt::Display for StressPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, level) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{level}")?;
        }
        Ok(())
    }
}

/// Rhythm classification of a stress pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum MeterLabel {
    /// Alternating unstressed/stressed (da-DUM).
    Iambic,
    /// Alternating stressed/unstressed (DUM-da).
    Trochaic,
    /// Contains a triple foot: `001` or `100`.
    AnapesticDactylic,
    /// More stressed than unstressed syllables.
    StressHeavy,
    /// More unstressed than stressed syllables.
    LightStress,
    /// Equal counts with no regular pattern.
    MixedRhythm,
    /// Empty pattern.
    NoPattern,
}

impl MeterLabel {
    /// Display name of the label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Iambic => "Iambic",
            Self::Trochaic => "Trochaic",
            Self::AnapesticDactylic => "Anapestic/Dactylic",
            Self::StressHeavy => "Stress-heavy",
            Self::LightStress => "Light stress",
            Self::MixedRhythm => "Mixed rhythm",
            Self::NoPattern => "No pattern",
        }
    }
}

impl fmt::Display for MeterLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a stress pattern. Total: every pattern gets exactly one label.
pub fn classify(pattern: &StressPattern) -> MeterLabel {
    if pattern.is_empty() {
        return MeterLabel::NoPattern;
    }

    let binary = pattern.binary();
    if alternates(&binary, false) {
        return MeterLabel::Iambic;
    }
    if alternates(&binary, true) {
        return MeterLabel::Trochaic;
    }
    if has_triple_foot(&binary) {
        return MeterLabel::AnapesticDactylic;
    }

    let stressed = pattern.stressed_count();
    let unstressed = pattern.unstressed_count();
    match stressed.cmp(&unstressed) {
        std::cmp::Ordering::Greater => MeterLabel::StressHeavy,
        std::cmp::Ordering::Less => MeterLabel::LightStress,
        std::cmp::Ordering::Equal => MeterLabel::MixedRhythm,
    }
}

/// Whether every complete two-syllable foot is `(first, !first)`.
///
/// Needs at least one whole foot; a lone syllable is not a meter.
fn alternates(binary: &[bool], first: bool) -> bool {
    let feet = binary.chunks_exact(2);
    feet.len() > 0 && feet.into_iter().all(|foot| foot[0] == first && foot[1] != first)
}

fn has_triple_foot(binary: &[bool]) -> bool {
    binary
        .windows(3)
        .any(|w| matches!(w, [false, false, true] | [true, false, false]))
}

/// Stress pattern and meter of a line.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MeterAnalysis {
    /// Concatenated stress levels.
    pub pattern: StressPattern,
    /// Classification of `pattern`.
    pub meter: MeterLabel,
    /// Words that contributed nothing because the dictionary lacks them.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unknown_words: Vec<String>,
}

/// Build the stress pattern of `words` and classify it.
///
/// Words are normalized before lookup; words that normalize to nothing are
/// ignored entirely, and unknown words are reported but skipped.
pub fn analyze<S: AsRef<str>>(dictionary: &PronunciationDictionary, words: &[S]) -> MeterAnalysis {
    let mut pattern = StressPattern::default();
    let mut unknown_words = Vec::new();

    for word in words {
        let word = normalize(word.as_ref());
        if word.is_empty() {
            continue;
        }
        match dictionary.lookup_first(&word) {
            Some(transcription) => pattern.extend_stresses(transcription.stresses()),
            None => unknown_words.push(word),
        }
    }

    let meter = classify(&pattern);
    tracing::trace!(%pattern, %meter, unknown = unknown_words.len(), "classified line");
    MeterAnalysis {
        pattern,
        meter,
        unknown_words,
    }
}

/// Split a line of text into words and analyze it.
pub fn analyze_line(dictionary: &PronunciationDictionary, line: &str) -> MeterAnalysis {
    analyze(dictionary, &text::extract_words(line))
}
