//! Rhymes command: perfect, near or multi-syllabic rhymes for a word.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use versepad_core::config::rhyme_cap;
use versepad_core::reports::{RhymeKind, RhymeReport};
use versepad_core::rhyme::RhymeIndex;

/// Arguments for the `rhymes` subcommand.
#[derive(Args, Debug)]
pub struct RhymesArgs {
    /// The word to rhyme with.
    pub word: String,

    /// Which rhymes to find.
    #[arg(short, long, value_enum, default_value_t)]
    pub kind: RhymeKind,

    /// Show at most N rhymes (0 for all).
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,
}

/// List rhymes for a word, alphabetically.
#[instrument(name = "cmd_rhymes", skip_all, fields(word = %args.word, kind = args.kind.as_str()))]
pub fn cmd_rhymes(
    args: RhymesArgs,
    global_json: bool,
    index: &RhymeIndex<'_>,
    config_limit: usize,
) -> anyhow::Result<()> {
    let limit = rhyme_cap(args.limit.unwrap_or(config_limit));
    debug!(word = %args.word, ?limit, "executing rhymes command");

    let report = RhymeReport::build(index, args.word.trim(), args.kind, limit);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.rhymes.is_empty() {
        println!(
            "{} {}",
            format!("No {} rhymes for", report.kind.as_str()).yellow(),
            report.word.bold()
        );
        return Ok(());
    }

    for rhyme in &report.rhymes {
        println!("{rhyme}");
    }
    if report.truncated {
        println!(
            "{}",
            format!("(showing {} of {})", report.rhymes.len(), report.total).dimmed()
        );
    }

    Ok(())
}
