//! Word command: pronunciation, syllables and stress of one word.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use versepad_core::Lexicon;
use versepad_core::reports::WordReport;

/// Arguments for the `word` subcommand.
#[derive(Args, Debug)]
pub struct WordArgs {
    /// The word to look up.
    pub word: String,
}

/// Describe a single word.
///
/// A word missing from the dictionary is reported, not treated as an error.
#[instrument(name = "cmd_word", skip_all, fields(word = %args.word))]
pub fn cmd_word(args: WordArgs, global_json: bool, lexicon: &Lexicon) -> anyhow::Result<()> {
    debug!(word = %args.word, "executing word command");

    let report = WordReport::build(lexicon.dictionary(), args.word.trim());

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if !report.known {
        println!(
            "{} {}",
            report.word.bold(),
            "not in the pronunciation dictionary".yellow()
        );
        return Ok(());
    }

    println!("{}  ({})", report.word.bold(), report.hyphenated.cyan());
    for (i, pronunciation) in report.pronunciations.iter().enumerate() {
        let label = if i == 0 { "Pronunciation" } else { "Variant" };
        println!("{}: {pronunciation}", label.dimmed());
    }
    if let Some(count) = report.syllable_count {
        println!(
            "{}: {} ({count})",
            "Syllables".dimmed(),
            report.syllables.join(" | ")
        );
    }
    println!("{}: {}", "Stress".dimmed(), report.stress);
    if let Some(ref key) = report.rhyme_key {
        println!("{}: {key}", "Rhyme key".dimmed());
    }

    Ok(())
}
