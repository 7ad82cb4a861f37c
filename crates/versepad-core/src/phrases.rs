//! Rhyming phrase suggestions.
//!
//! Phrases pair the query word with its multi-syllabic perfect rhymes
//! through small templates. Randomness is injected so callers (and tests)
//! control reproducibility.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{AnalysisError, AnalysisResult};
use crate::rhyme::RhymeIndex;

/// Templates used when none are configured.
pub const DEFAULT_TEMPLATES: [&str; 3] = ["{word} and {rhyme}", "{rhyme} {word}", "{word} {rhyme}"];

const WORD_SLOT: &str = "{word}";
const RHYME_SLOT: &str = "{rhyme}";

/// Fills phrase templates with rhymes.
#[derive(Debug, Clone)]
pub struct PhraseSuggester {
    templates: Vec<String>,
}

impl Default for PhraseSuggester {
    fn default() -> Self {
        Self {
            templates: DEFAULT_TEMPLATES.iter().map(ToString::to_string).collect(),
        }
    }
}

impl PhraseSuggester {
    /// Build a suggester from custom templates.
    ///
    /// # Errors
    ///
    /// Every template must contain both `{word}` and `{rhyme}`, and at least
    /// one template is required.
    pub fn new<I, S>(templates: I) -> AnalysisResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let templates: Vec<String> = templates.into_iter().map(Into::into).collect();
        if templates.is_empty() {
            return Err(AnalysisError::NoTemplates);
        }
        for template in &templates {
            for slot in [WORD_SLOT, RHYME_SLOT] {
                if !template.contains(slot) {
                    return Err(AnalysisError::InvalidTemplate {
                        template: template.clone(),
                        reason: format!("missing {slot} placeholder"),
                    });
                }
            }
        }
        Ok(Self { templates })
    }

    /// The templates in rotation order.
    pub fn templates(&self) -> &[String] {
        &self.templates
    }

    /// Up to `count` phrases pairing `word` with its multi-syllabic rhymes.
    ///
    /// Rhymes are shuffled once. The first pass gives every rhyme one
    /// template; later passes rotate the templates so no (rhyme, template)
    /// pair repeats. Returns fewer than `count` phrases when the pairs run
    /// out, and nothing when the word has no multi-syllabic rhymes.
    #[tracing::instrument(skip(self, index, rng))]
    pub fn suggest<R: Rng + ?Sized>(
        &self,
        index: &RhymeIndex<'_>,
        word: &str,
        count: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let mut rhymes: Vec<&str> = index.multisyllabic_rhymes(word).into_iter().collect();
        if rhymes.is_empty() || count == 0 {
            return Vec::new();
        }
        // Set order is arbitrary; sort so a seeded rng is reproducible.
        rhymes.sort_unstable();
        rhymes.shuffle(rng);

        let word = word.trim();
        let passes = self.templates.len();
        let phrases: Vec<String> = (0..passes)
            .flat_map(|pass| {
                rhymes.iter().enumerate().map(move |(i, rhyme)| {
                    let template = &self.templates[(i + pass) % passes];
                    template.replace(WORD_SLOT, word).replace(RHYME_SLOT, rhyme)
                })
            })
            .take(count)
            .collect();

        tracing::debug!(rhymes = rhymes.len(), phrases = phrases.len(), "suggested phrases");
        phrases
    }
}

/// [`PhraseSuggester::suggest`] with the default templates.
pub fn suggest_phrases<R: Rng + ?Sized>(
    index: &RhymeIndex<'_>,
    word: &str,
    count: usize,
    rng: &mut R,
) -> Vec<String> {
    PhraseSuggester::default().suggest(index, word, count, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::PronunciationDictionary;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    const DANCING_RHYMES: [&str; 5] = ["prancing", "advancing", "glancing", "romancing", "enhancing"];

    fn embedded() -> PronunciationDictionary {
        PronunciationDictionary::embedded().unwrap()
    }

    #[test]
    fn dancing_phrases_use_its_rhymes() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let mut rng = StdRng::seed_from_u64(7);
        let phrases = suggest_phrases(&index, "dancing", 5, &mut rng);

        assert_eq!(phrases.len(), 5);
        for phrase in &phrases {
            assert!(phrase.contains("dancing"), "{phrase}");
            assert!(DANCING_RHYMES.iter().any(|r| phrase.contains(r)), "{phrase}");
        }
        // One pass: each rhyme used exactly once.
        let used: HashSet<&str> = DANCING_RHYMES
            .iter()
            .copied()
            .filter(|r| phrases.iter().any(|p| p.contains(r)))
            .collect();
        assert_eq!(used.len(), 5);
    }

    #[test]
    fn no_multisyllabic_rhymes_means_no_phrases() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(suggest_phrases(&index, "cat", 9, &mut rng).is_empty());
        assert!(suggest_phrases(&index, "zyzzyva", 9, &mut rng).is_empty());
    }

    #[test]
    fn zero_count_means_no_phrases() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(suggest_phrases(&index, "dancing", 0, &mut rng).is_empty());
    }

    #[test]
    fn phrases_never_repeat_and_cap_at_all_pairs() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let mut rng = StdRng::seed_from_u64(3);
        let phrases = suggest_phrases(&index, "dancing", 100, &mut rng);

        assert_eq!(phrases.len(), DANCING_RHYMES.len() * DEFAULT_TEMPLATES.len());
        let unique: HashSet<&String> = phrases.iter().collect();
        assert_eq!(unique.len(), phrases.len());
    }

    #[test]
    fn same_seed_same_phrases() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let a = suggest_phrases(&index, "stay", 9, &mut StdRng::seed_from_u64(42));
        let b = suggest_phrases(&index, "stay", 9, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.len(), 9);
    }

    #[test]
    fn custom_templates_are_used() {
        let dict = embedded();
        let index = RhymeIndex::new(&dict);
        let suggester = PhraseSuggester::new(["{word}, {rhyme}!"]).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let phrases = suggester.suggest(&index, "dancing", 2, &mut rng);
        assert_eq!(phrases.len(), 2);
        assert!(phrases.iter().all(|p| p.starts_with("dancing, ") && p.ends_with('!')));
    }

    #[test]
    fn templates_need_both_placeholders() {
        let err = PhraseSuggester::new(["{word} alone"]).unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidTemplate { .. }));
        assert!(err.to_string().contains("{rhyme}"));

        let err = PhraseSuggester::new(Vec::<String>::new()).unwrap_err();
        assert!(matches!(err, AnalysisError::NoTemplates));
    }
}
