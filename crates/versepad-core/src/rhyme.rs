//! Rhyme matching over a pronunciation dictionary.
//!
//! Two words are perfect rhymes when their rhyme keys (last stressed vowel
//! to the end, default pronunciation) are identical. Near rhymes compare
//! only the final two phonemes, which is coarser: it usually returns a
//! superset of the perfect rhymes, but not when the rhyme key is a single
//! phoneme (`see` rhymes with `bee`, yet their final pairs `S IY1` and
//! `B IY1` differ).
//!
//! The index is built once over a frozen dictionary. Buckets borrow the
//! dictionary's phoneme slices, so queries are a hash lookup plus a filter
//! and return exactly what a full scan would.

use std::collections::{HashMap, HashSet};

use crate::dictionary::PronunciationDictionary;
use crate::phonetics::{Phoneme, normalize};
use crate::syllables::syllabify;

/// Buckets of words sharing a rhyme key or a final phoneme pair.
#[derive(Debug, Clone)]
pub struct RhymeIndex<'d> {
    dictionary: &'d PronunciationDictionary,
    by_key: HashMap<&'d [Phoneme], Vec<&'d str>>,
    by_tail: HashMap<&'d [Phoneme], Vec<&'d str>>,
}

impl<'d> RhymeIndex<'d> {
    /// Index every word of `dictionary` by its default pronunciation.
    #[tracing::instrument(skip_all, fields(words = dictionary.len()))]
    pub fn new(dictionary: &'d PronunciationDictionary) -> Self {
        let mut by_key: HashMap<&'d [Phoneme], Vec<&'d str>> = HashMap::new();
        let mut by_tail: HashMap<&'d [Phoneme], Vec<&'d str>> = HashMap::new();

        for (word, transcription) in dictionary.first_transcriptions() {
            let key = transcription.rhyme_key();
            if !key.is_empty() {
                by_key.entry(key).or_default().push(word);
            }
            if let Some(tail) = transcription.tail2() {
                by_tail.entry(tail).or_default().push(word);
            }
        }

        tracing::debug!(
            keys = by_key.len(),
            tails = by_tail.len(),
            "built rhyme index"
        );
        Self {
            dictionary,
            by_key,
            by_tail,
        }
    }

    /// The dictionary this index was built from.
    pub const fn dictionary(&self) -> &'d PronunciationDictionary {
        self.dictionary
    }

    /// Rhyme key of `word`'s default pronunciation, if the word is known.
    pub fn rhyme_key(&self, word: &str) -> Option<&'d [Phoneme]> {
        self.dictionary.lookup_first(word).map(|t| t.rhyme_key())
    }

    /// Words whose rhyme key equals `word`'s, excluding `word` itself.
    ///
    /// Empty when `word` is not in the dictionary.
    pub fn perfect_rhymes(&self, word: &str) -> HashSet<&'d str> {
        let query = normalize(word);
        self.rhyme_key(&query)
            .filter(|key| !key.is_empty())
            .and_then(|key| self.by_key.get(key))
            .map(|bucket| exclude(bucket, &query))
            .unwrap_or_default()
    }

    /// Words ending in the same two phonemes as `word`, excluding `word`.
    ///
    /// Both transcriptions need at least two phonemes. Empty when `word` is
    /// not in the dictionary.
    pub fn near_rhymes(&self, word: &str) -> HashSet<&'d str> {
        let query = normalize(word);
        self.dictionary
            .lookup_first(&query)
            .and_then(|t| t.tail2())
            .and_then(|tail| self.by_tail.get(tail))
            .map(|bucket| exclude(bucket, &query))
            .unwrap_or_default()
    }

    /// Perfect rhymes that are themselves longer than one syllable.
    pub fn multisyllabic_rhymes(&self, word: &str) -> HashSet<&'d str> {
        let mut rhymes = self.perfect_rhymes(word);
        rhymes.retain(|candidate| {
            self.dictionary
                .lookup_first(candidate)
                .is_some_and(|t| syllabify(t).len() > 1)
        });
        rhymes
    }
}

fn exclude<'d>(bucket: &[&'d str], query: &str) -> HashSet<&'d str> {
    bucket.iter().copied().filter(|w| *w != query).collect()
}
