//! Pronunciation dictionary and phonetic lookup.
//!
//! Parses the CMU Pronouncing Dictionary text format:
//!
//! ```text
//! ;;; comment
//! CAT  K AE1 T
//! READ  R IY1 D
//! READ(2)  R EH1 D
//! tomato t ah0 m ey1 t ow0 # lowercase cmudict.dict style is accepted too
//! ```
//!
//! Keys are stored normalized (see [`normalize`]), so `O'ER` and `oer`
//! resolve to the same entry. Variants are kept in file order; the first
//! one is the default pronunciation.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{LexiconError, LexiconResult};
use crate::phonetics::{Transcription, normalize};

/// The sample lexicon compiled into the crate.
const EMBEDDED_DICT: &str = include_str!("../data/sample.dict");

/// One CMUdict entry line: word, optional `(n)` variant marker, phonemes,
/// optional trailing `# comment`.
static ENTRY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<word>\S+?)(?:\((?P<variant>\d+)\))?(?:\s+(?P<phones>[^#]*))?(?:#.*)?$")
        .expect("valid regex")
});

/// Read-only map from normalized word to its transcriptions.
#[derive(Debug, Clone, Default)]
pub struct PronunciationDictionary {
    entries: HashMap<String, Vec<Transcription>>,
}

impl PronunciationDictionary {
    /// An empty dictionary; every lookup misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The sample lexicon bundled with the crate.
    pub fn embedded() -> LexiconResult<Self> {
        Self::parse(EMBEDDED_DICT)
    }

    /// Parse CMUdict-format text.
    ///
    /// Blank lines and `;;;` comments are skipped. Any malformed entry is a
    /// hard error: a dictionary that is half-parsed would silently turn real
    /// words into lookup misses.
    #[tracing::instrument(skip_all, fields(text_len = text.len()))]
    pub fn parse(text: &str) -> LexiconResult<Self> {
        let mut entries: HashMap<String, Vec<Transcription>> = HashMap::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with(";;;") || line.starts_with('#') {
                continue;
            }
            let parse_err = |reason: String| LexiconError::Parse {
                line: idx + 1,
                reason,
            };

            let caps = ENTRY_PATTERN
                .captures(line)
                .ok_or_else(|| parse_err(format!("unrecognized entry {line:?}")))?;
            let word = &caps["word"];
            let phones = caps.name("phones").map_or("", |m| m.as_str()).trim();
            if phones.is_empty() {
                return Err(parse_err(format!("{word:?} has no phonemes")));
            }

            let transcription: Transcription = phones
                .parse()
                .map_err(|e| parse_err(format!("{word:?}: {e}")))?;

            let key = normalize(word);
            if key.is_empty() {
                // Punctuation entries such as "!EXCLAMATION-POINT" normalize
                // to something usable; pure symbols like "%" do not.
                continue;
            }
            entries.entry(key).or_default().push(transcription);
        }

        tracing::debug!(words = entries.len(), "parsed pronunciation dictionary");
        Ok(Self { entries })
    }

    /// All transcriptions of `word`, possibly none.
    ///
    /// The word is normalized first, so callers may pass raw text.
    pub fn lookup(&self, word: &str) -> &[Transcription] {
        self.entries
            .get(normalize(word).as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The default (first) transcription of `word`.
    pub fn lookup_first(&self, word: &str) -> Option<&Transcription> {
        self.lookup(word).first()
    }

    /// A specific pronunciation variant of `word` (0 = default).
    pub fn lookup_variant(&self, word: &str, variant: usize) -> Option<&Transcription> {
        self.lookup(word).get(variant)
    }

    /// Whether `word` has at least one transcription.
    pub fn contains(&self, word: &str) -> bool {
        !self.lookup(word).is_empty()
    }

    /// Every word with its default transcription.
    pub fn first_transcriptions(&self) -> impl Iterator<Item = (&str, &Transcription)> {
        self.entries
            .iter()
            .filter_map(|(word, ts)| ts.first().map(|t| (word.as_str(), t)))
    }

    /// Every word in the dictionary.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the dictionary has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
;;; tiny test lexicon
CAT  K AE1 T
HAT  H AE1 T
DOG  D AA1 G
READ  R IY1 D
READ(2)  R EH1 D
O'ER  OW1 R
tomato t ah0 m ey1 t ow0 # trailing comment
";

    #[test]
    fn parses_entries_and_variants() {
        let dict = PronunciationDictionary::parse(SAMPLE).unwrap();
        assert_eq!(dict.len(), 6);
        assert_eq!(dict.lookup("read").len(), 2);
        assert_eq!(dict.lookup_first("read").unwrap().to_string(), "R IY1 D");
        assert_eq!(
            dict.lookup_variant("read", 1).unwrap().to_string(),
            "R EH1 D"
        );
        assert!(dict.lookup_variant("read", 2).is_none());
    }

    #[test]
    fn lookup_normalizes_input() {
        let dict = PronunciationDictionary::parse(SAMPLE).unwrap();
        assert!(dict.contains("Cat,"));
        assert!(dict.contains("o'er"));
        assert!(dict.contains("OER"));
        assert_eq!(
            dict.lookup_first("Tomato").unwrap().to_string(),
            "T AH0 M EY1 T OW0"
        );
    }

    #[test]
    fn miss_is_empty_not_error() {
        let dict = PronunciationDictionary::parse(SAMPLE).unwrap();
        assert!(dict.lookup("zyzzyva").is_empty());
        assert!(dict.lookup("").is_empty());
        assert!(dict.lookup_first("zyzzyva").is_none());
    }

    #[test]
    fn corrupt_stress_digit_is_an_error() {
        let err = PronunciationDictionary::parse("CAT  K AE7 T\n").unwrap_err();
        match err {
            LexiconError::Parse { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn entry_without_phonemes_is_an_error() {
        let err = PronunciationDictionary::parse("CAT  K AE1 T\nDOG\n").unwrap_err();
        assert!(matches!(err, LexiconError::Parse { line: 2, .. }));
    }

    #[test]
    fn punctuation_words_parse() {
        let dict =
            PronunciationDictionary::parse("(PAREN  P ER0 EH1 N\n)CLOSE-PAREN  K L OW1 Z P ER0 EH1 N\n")
                .unwrap();
        assert!(dict.contains("paren"));
        assert!(dict.contains("closeparen"));
    }

    #[test]
    fn symbol_only_entries_are_skipped() {
        let dict = PronunciationDictionary::parse("%  P ER0 S EH1 N T\nCAT  K AE1 T\n").unwrap();
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn embedded_lexicon_loads() {
        let dict = PronunciationDictionary::embedded().unwrap();
        assert!(dict.len() > 100);
        assert!(dict.contains("cat"));
        assert!(dict.contains("dancing"));
    }

    #[test]
    fn empty_dictionary_misses_everything() {
        let dict = PronunciationDictionary::empty();
        assert!(dict.is_empty());
        assert!(dict.lookup("cat").is_empty());
    }
}
