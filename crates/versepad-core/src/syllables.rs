//! Syllabification of transcriptions and hyphenated display of words.
//!
//! The phonetic split is exact with respect to the transcription: syllables
//! always partition it. The orthographic split used for display is a
//! vowel-run heuristic and can disagree with dictionary hyphenation; treat
//! it as an approximation.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dictionary::PronunciationDictionary;
use crate::phonetics::{Phoneme, Stress, Transcription};

/// A contiguous run of phonemes around one nucleus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct Syllable(Vec<Phoneme>);

impl Syllable {
    /// The phonemes of this syllable in order.
    pub fn phonemes(&self) -> &[Phoneme] {
        &self.0
    }

    /// Stress of the nucleus, or `None` for a vowelless syllable.
    pub fn stress(&self) -> Option<Stress> {
        self.0.iter().find_map(Phoneme::stress)
    }
}

impl std::fmt::Display for Syllable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, phoneme) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{phoneme}")?;
        }
        Ok(())
    }
}

/// Split a transcription into syllables.
///
/// A syllable closes as soon as it holds a stress-bearing phoneme. Trailing
/// consonants join the last syllable; a transcription without any nucleus
/// becomes a single syllable. Transcriptions are never empty, so the result
/// always holds at least one syllable.
pub fn syllabify(transcription: &Transcription) -> Vec<Syllable> {
    let mut syllables = Vec::with_capacity(transcription.nucleus_count().max(1));
    let mut current = Vec::new();

    for phoneme in transcription.phonemes() {
        current.push(phoneme.clone());
        if phoneme.is_stress_bearing() {
            syllables.push(Syllable(std::mem::take(&mut current)));
        }
    }

    if !current.is_empty() {
        match syllables.last_mut() {
            Some(Syllable(last)) => last.extend(current),
            None => syllables.push(Syllable(current)),
        }
    }

    syllables
}

/// Hyphenated display form of `word` given its transcription.
///
/// Single-syllable words come back unchanged; longer words go through
/// [`hyphenate_orthographic`], since phoneme boundaries do not line up with
/// letters.
pub fn hyphenate(word: &str, transcription: &Transcription) -> String {
    if syllabify(transcription).len() <= 1 {
        word.to_string()
    } else {
        hyphenate_orthographic(word)
    }
}

/// Approximate written syllable breaks.
///
/// Walks the word tracking vowel runs (`aeiou`, and `y` unless it starts the
/// word). At the second and every later vowel run, a cut goes before the
/// last consonant of the consonant run that precedes it: `dancing` →
/// `dan-cing`, `beautiful` → `beau-ti-ful`.
pub fn hyphenate_orthographic(word: &str) -> String {
    let chars: Vec<char> = word.chars().collect();
    let is_vowel = |i: usize| {
        let c = chars[i].to_ascii_lowercase();
        matches!(c, 'a' | 'e' | 'i' | 'o' | 'u') || (c == 'y' && i > 0)
    };

    let mut cuts = Vec::new();
    let mut runs_seen = 0usize;
    let mut in_vowel_run = false;
    let mut last_consonant = None;

    for (i, ch) in chars.iter().enumerate() {
        if is_vowel(i) {
            if !in_vowel_run {
                runs_seen += 1;
                if runs_seen >= 2
                    && let Some(cut) = last_consonant
                {
                    cuts.push(cut);
                }
                in_vowel_run = true;
            }
            last_consonant = None;
        } else {
            in_vowel_run = false;
            if ch.is_alphabetic() {
                last_consonant = Some(i);
            }
        }
    }

    let mut out = String::with_capacity(word.len() + cuts.len());
    let mut cuts = cuts.into_iter().peekable();
    for (i, ch) in chars.into_iter().enumerate() {
        if cuts.next_if_eq(&i).is_some() {
            out.push('-');
        }
        out.push(ch);
    }
    out
}

/// Syllable information for one written word.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WordSyllables {
    /// The word as given.
    pub word: String,
    /// Phonetic syllables of the default pronunciation (empty on a miss).
    pub syllables: Vec<Syllable>,
    /// Syllable count, or `None` when the word is not in the dictionary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub syllable_count: Option<usize>,
    /// Hyphenated display form; the word itself on a miss.
    pub hyphenated: String,
}

/// Look up `word` and syllabify its default pronunciation.
///
/// A lookup miss falls back to the original word as a single unit.
pub fn word_syllables(dictionary: &PronunciationDictionary, word: &str) -> WordSyllables {
    match dictionary.lookup_first(word) {
        Some(transcription) => {
            let syllables = syllabify(transcription);
            WordSyllables {
                word: word.to_string(),
                syllable_count: Some(syllables.len()),
                hyphenated: hyphenate(word, transcription),
                syllables,
            }
        }
        None => WordSyllables {
            word: word.to_string(),
            syllables: Vec::new(),
            syllable_count: None,
            hyphenated: word.to_string(),
        },
    }
}

/// Syllable count of a word's default pronunciation, if known.
pub fn syllable_count(dictionary: &PronunciationDictionary, word: &str) -> Option<usize> {
    dictionary
        .lookup_first(word)
        .map(|t| syllabify(t).len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> Transcription {
        s.parse().unwrap()
    }

    fn concat(syllables: &[Syllable]) -> Vec<Phoneme> {
        syllables
            .iter()
            .flat_map(|s| s.phonemes().iter().cloned())
            .collect()
    }

    #[test]
    fn dancing_has_two_syllables() {
        let dancing = t("D AE1 N S IH0 NG");
        let syllables = syllabify(&dancing);
        assert_eq!(syllables.len(), 2);
        assert_eq!(syllables[0].to_string(), "D AE1");
        assert_eq!(syllables[1].to_string(), "N S IH0 NG");
        assert_eq!(concat(&syllables), dancing.phonemes());
    }

    #[test]
    fn syllables_partition_every_transcription() {
        for s in [
            "K AE1 T",
            "B Y UW1 T AH0 F AH0 L",
            "AE2 F T ER0 N UW1 N",
            "OW2 K EY1",
            "S T AA1 R Z",
            "P S T",
            "AH0",
            "SH",
            "W ER1 L D",
        ] {
            let transcription = t(s);
            let syllables = syllabify(&transcription);
            assert_eq!(concat(&syllables), transcription.phonemes(), "partition of {s}");
            assert_eq!(
                syllables.len(),
                transcription.nucleus_count().max(1),
                "count for {s}"
            );
            assert!(syllables.iter().all(|syl| !syl.phonemes().is_empty()));
        }
    }

    #[test]
    fn no_vowel_is_one_syllable() {
        let syllables = syllabify(&t("P S T"));
        assert_eq!(syllables.len(), 1);
        assert_eq!(syllables[0].stress(), None);
    }

    #[test]
    fn trailing_consonants_join_last_syllable() {
        let syllables = syllabify(&t("S T AA1 R Z"));
        assert_eq!(syllables.len(), 1);
        assert_eq!(syllables[0].to_string(), "S T AA1 R Z");
    }

    #[test]
    fn syllable_count_is_at_least_one() {
        for phones in [
            "AH0",
            "HH M",
            "K AE1 T",
            "D AE1 N S IH0 NG",
            "S T R EH1 NG K TH S",
        ] {
            let transcription = t(phones);
            let syllables = syllabify(&transcription);
            assert_eq!(syllables.len(), transcription.nucleus_count().max(1), "{phones}");
            let joined: Vec<_> = syllables.iter().flat_map(|s| s.phonemes().to_vec()).collect();
            assert_eq!(joined, transcription.phonemes(), "{phones}");
        }
    }

    #[test]
    fn orthographic_splits() {
        assert_eq!(hyphenate_orthographic("dancing"), "dan-cing");
        assert_eq!(hyphenate_orthographic("beautiful"), "beau-ti-ful");
        assert_eq!(hyphenate_orthographic("hello"), "hel-lo");
        assert_eq!(hyphenate_orthographic("summer"), "sum-mer");
        assert_eq!(hyphenate_orthographic("poetry"), "poet-ry");
        assert_eq!(hyphenate_orthographic("o'er"), "o'er");
        assert_eq!(hyphenate_orthographic("cat"), "cat");
        assert_eq!(hyphenate_orthographic(""), "");
    }

    #[test]
    fn orthographic_keeps_case() {
        assert_eq!(hyphenate_orthographic("Morning"), "Mor-ning");
    }

    #[test]
    fn single_syllable_words_are_not_hyphenated() {
        assert_eq!(hyphenate("there", &t("DH EH1 R")), "there");
        assert_eq!(hyphenate("dancing", &t("D AE1 N S IH0 NG")), "dan-cing");
    }

    #[test]
    fn word_syllables_lookup_miss_falls_back_to_word() {
        let dict = PronunciationDictionary::embedded().unwrap();
        let report = word_syllables(&dict, "Zyzzyva");
        assert_eq!(report.hyphenated, "Zyzzyva");
        assert!(report.syllables.is_empty());
        assert!(report.syllable_count.is_none());
    }

    #[test]
    fn word_syllables_uses_first_pronunciation() {
        let dict = PronunciationDictionary::embedded().unwrap();
        let report = word_syllables(&dict, "Dancing");
        assert_eq!(report.syllable_count, Some(2));
        assert_eq!(report.hyphenated, "Dan-cing");
        assert_eq!(syllable_count(&dict, "beautiful"), Some(3));
        assert_eq!(syllable_count(&dict, "zyzzyva"), None);
    }
}
