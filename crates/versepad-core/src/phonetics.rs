//! Phonemes, stress levels and transcriptions.
//!
//! Transcriptions use ARPABET-style tokens as found in the CMU Pronouncing
//! Dictionary: a symbol of ASCII letters, optionally followed by a single
//! stress digit on vowel nuclei (`AE1`, `IH0`, `OW2`).

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalize a word for dictionary lookup.
///
/// Lowercases and drops every character outside `a-z`. Idempotent, and the
/// only normalization used anywhere in the engine.
pub fn normalize(word: &str) -> String {
    word.chars()
        .flat_map(char::to_lowercase)
        .filter(char::is_ascii_lowercase)
        .collect()
}

/// Stress carried by a vowel nucleus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Stress {
    /// No stress (`0`).
    Unstressed,
    /// Primary stress (`1`).
    Primary,
    /// Secondary stress (`2`).
    Secondary,
}

impl Stress {
    /// Parse a CMUdict stress digit.
    pub const fn from_digit(digit: char) -> Option<Self> {
        match digit {
            '0' => Some(Self::Unstressed),
            '1' => Some(Self::Primary),
            '2' => Some(Self::Secondary),
            _ => None,
        }
    }

    /// Numeric stress level: 0, 1 or 2.
    pub const fn level(self) -> u8 {
        match self {
            Self::Unstressed => 0,
            Self::Primary => 1,
            Self::Secondary => 2,
        }
    }

    /// Primary and secondary stress both count as stressed.
    pub const fn is_stressed(self) -> bool {
        !matches!(self, Self::Unstressed)
    }
}

/// One unit of pronunciation.
///
/// Equality compares both the symbol and the stress, so `AE1` and `AE0`
/// are different phonemes for rhyme matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Phoneme {
    symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    stress: Option<Stress>,
}

impl Phoneme {
    /// A consonant (or any phoneme without stress).
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            stress: None,
        }
    }

    /// A vowel nucleus carrying the given stress.
    pub fn vowel(symbol: impl Into<String>, stress: Stress) -> Self {
        Self {
            symbol: symbol.into(),
            stress: Some(stress),
        }
    }

    /// The bare symbol without its stress digit.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Stress level, present only on vowel nuclei.
    pub const fn stress(&self) -> Option<Stress> {
        self.stress
    }

    /// Whether this phoneme carries a stress value (is a syllable nucleus).
    pub const fn is_stress_bearing(&self) -> bool {
        self.stress.is_some()
    }
}

impl fmt::Display for Phoneme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.symbol)?;
        if let Some(stress) = self.stress {
            write!(f, "{}", stress.level())?;
        }
        Ok(())
    }
}

/// Why a phoneme token or transcription was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsePhonemeError {
    /// A token is not an ARPAbet symbol with an optional stress digit.
    Token(String),
    /// A transcription must hold at least one phoneme.
    Empty,
}

impl fmt::Display for ParsePhonemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => write!(f, "invalid phoneme {token:?}"),
            Self::Empty => f.write_str("transcription has no phonemes"),
        }
    }
}

impl std::error::Error for ParsePhonemeError {}

impl FromStr for Phoneme {
    type Err = ParsePhonemeError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let err = || ParsePhonemeError::Token(token.to_string());

        let (symbol, stress) = match token.chars().last() {
            Some(last) if last.is_ascii_digit() => {
                let stress = Stress::from_digit(last).ok_or_else(err)?;
                (&token[..token.len() - 1], Some(stress))
            }
            Some(_) => (token, None),
            None => return Err(err()),
        };

        if symbol.is_empty() || !symbol.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(err());
        }

        Ok(Self {
            symbol: symbol.to_ascii_uppercase(),
            stress,
        })
    }
}

/// One pronunciation of one word: an ordered, immutable, non-empty
/// phoneme sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, JsonSchema)]
#[serde(transparent)]
pub struct Transcription(Vec<Phoneme>);

impl Transcription {
    /// Wrap a phoneme sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ParsePhonemeError::Empty`] when `phonemes` is empty.
    pub fn new(phonemes: Vec<Phoneme>) -> Result<Self, ParsePhonemeError> {
        if phonemes.is_empty() {
            return Err(ParsePhonemeError::Empty);
        }
        Ok(Self(phonemes))
    }

    /// The phonemes in order.
    pub fn phonemes(&self) -> &[Phoneme] {
        &self.0
    }

    /// Number of phonemes.
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no phonemes; never true for a constructed value.
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Stress of every stress-bearing phoneme, in order.
    pub fn stresses(&self) -> impl Iterator<Item = Stress> + '_ {
        self.0.iter().filter_map(Phoneme::stress)
    }

    /// Number of stress-bearing phonemes.
    pub fn nucleus_count(&self) -> usize {
        self.stresses().count()
    }

    /// The rhyme-matching tail: from the last stressed vowel to the end.
    ///
    /// Only primary and secondary stress mark the start of the key. A
    /// transcription with no stressed vowel rhymes on its whole length.
    pub fn rhyme_key(&self) -> &[Phoneme] {
        let start = self
            .0
            .iter()
            .rposition(|p| p.stress().is_some_and(Stress::is_stressed))
            .unwrap_or(0);
        &self.0[start..]
    }

    /// The rhyme key in display form (`AE1 T`).
    pub fn rhyme_key_text(&self) -> String {
        join_phonemes(self.rhyme_key())
    }

    /// The final two phonemes, if there are at least two.
    pub fn tail2(&self) -> Option<&[Phoneme]> {
        (self.0.len() >= 2).then(|| &self.0[self.0.len() - 2..])
    }
}

fn join_phonemes(phonemes: &[Phoneme]) -> String {
    phonemes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Transcription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_phonemes(&self.0))
    }
}

impl FromStr for Transcription {
    type Err = ParsePhonemeError;

    /// Parse a whitespace-separated list of phoneme tokens (`K AE1 T`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .and_then(Self::new)
    }
}

impl TryFrom<Vec<Phoneme>> for Transcription {
    type Error = ParsePhonemeError;

    fn try_from(phonemes: Vec<Phoneme>) -> Result<Self, Self::Error> {
        Self::new(phonemes)
    }
}
