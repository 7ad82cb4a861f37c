//! Phrases command: rhyming phrase suggestions.

use clap::Args;
use owo_colors::OwoColorize;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, instrument};

use versepad_core::phrases::PhraseSuggester;
use versepad_core::reports::PhraseReport;
use versepad_core::rhyme::RhymeIndex;

/// Arguments for the `phrases` subcommand.
#[derive(Args, Debug)]
pub struct PhrasesArgs {
    /// The word to build phrases around.
    pub word: String,

    /// How many phrases to suggest.
    #[arg(short = 'n', long, value_name = "N")]
    pub count: Option<usize>,

    /// Seed for reproducible suggestions.
    #[arg(short, long)]
    pub seed: Option<u64>,
}

/// Suggest phrases pairing a word with its multi-syllabic rhymes.
#[instrument(name = "cmd_phrases", skip_all, fields(word = %args.word))]
pub fn cmd_phrases(
    args: PhrasesArgs,
    global_json: bool,
    index: &RhymeIndex<'_>,
    suggester: &PhraseSuggester,
    config_count: usize,
) -> anyhow::Result<()> {
    let count = args.count.unwrap_or(config_count);
    debug!(word = %args.word, count, seed = ?args.seed, "executing phrases command");

    let word = args.word.trim();
    let phrases = match args.seed {
        Some(seed) => suggester.suggest(index, word, count, &mut StdRng::seed_from_u64(seed)),
        None => suggester.suggest(index, word, count, &mut rand::rng()),
    };
    let report = PhraseReport {
        word: word.to_string(),
        phrases,
        seed: args.seed,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if report.phrases.is_empty() {
        println!(
            "{} {}",
            "No multi-syllable rhymes to build phrases for".yellow(),
            report.word.bold()
        );
    } else {
        for phrase in &report.phrases {
            println!("{phrase}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use versepad_core::Lexicon;

    #[test]
    fn seeded_and_unseeded_runs() {
        let lexicon = Lexicon::embedded().unwrap();
        let index = lexicon.rhyme_index();
        let suggester = PhraseSuggester::default();
        for seed in [Some(11), None] {
            let args = PhrasesArgs {
                word: "dancing".to_string(),
                count: Some(4),
                seed,
            };
            assert!(cmd_phrases(args, false, &index, &suggester, 9).is_ok());
        }
    }

    #[test]
    fn word_without_rhymes_prints_notice() {
        let lexicon = Lexicon::embedded().unwrap();
        let index = lexicon.rhyme_index();
        let args = PhrasesArgs {
            word: "cat".to_string(),
            count: None,
            seed: Some(1),
        };
        assert!(cmd_phrases(args, true, &index, &PhraseSuggester::default(), 9).is_ok());
    }
}
