//! Scan command: line-by-line analysis of a poem.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use versepad_core::Lexicon;
use versepad_core::config::rhyme_cap;
use versepad_core::reports::{RhymeKind, RhymeReport, ScanReport};
use versepad_core::scan;

use super::read_input_file;

/// Arguments for the `scan` subcommand.
#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Poem to analyze.
    pub file: Utf8PathBuf,
}

/// Scan report plus rhymes for the closing word.
#[derive(Serialize)]
struct ScanOutput {
    #[serde(flatten)]
    report: ScanReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    closing_rhymes: Option<RhymeReport>,
}

/// Analyze every line of a poem.
#[instrument(name = "cmd_scan", skip_all, fields(file = %args.file))]
pub fn cmd_scan(
    args: ScanArgs,
    global_json: bool,
    lexicon: &Lexicon,
    rhyme_limit: usize,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, "executing scan command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let report = scan::scan(lexicon, &content);

    let closing_rhymes = report.closing_word.as_deref().map(|word| {
        let index = lexicon.rhyme_index();
        RhymeReport::build(&index, word, RhymeKind::Perfect, rhyme_cap(rhyme_limit))
    });
    let output = ScanOutput {
        report,
        closing_rhymes,
    };

    if global_json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    print_text(&output);
    Ok(())
}

fn print_text(output: &ScanOutput) {
    let report = &output.report;
    let mut stanza = 0;
    for line in &report.lines {
        if line.stanza != stanza {
            if stanza != 0 {
                println!();
            }
            stanza = line.stanza;
        }
        println!(
            "{:>3} {:>2}  {:<18} {}",
            line.line.dimmed(),
            line.syllable_count,
            line.meter.as_str().cyan(),
            line.text
        );
        if !line.unknown_words.is_empty() {
            println!(
                "        {} {}",
                "unknown:".dimmed(),
                line.unknown_words.join(", ").yellow()
            );
        }
    }

    println!();
    println!(
        "{}: {} ({} stanzas, {} lines)",
        "Overall meter".bold(),
        report.meter,
        report.stanza_count,
        report.line_count
    );
    if let Some(ref rhymes) = output.closing_rhymes {
        let listed = if rhymes.rhymes.is_empty() {
            "none found".dimmed().to_string()
        } else {
            rhymes.rhymes.join(", ")
        };
        println!("{} {}: {listed}", "Rhymes for".bold(), rhymes.word.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn scans_a_file() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("poem.txt")).unwrap();
        std::fs::write(&path, "Silver river\n\nAway, today!\n").unwrap();

        let lexicon = Lexicon::embedded().unwrap();
        let args = ScanArgs { file: path.clone() };
        assert!(cmd_scan(args, false, &lexicon, 20, None).is_ok());
        let args = ScanArgs { file: path };
        assert!(cmd_scan(args, true, &lexicon, 20, None).is_ok());
    }

    #[test]
    fn missing_file_is_an_error() {
        let lexicon = Lexicon::embedded().unwrap();
        let args = ScanArgs {
            file: Utf8PathBuf::from("/nonexistent/poem.txt"),
        };
        assert!(cmd_scan(args, false, &lexicon, 20, None).is_err());
    }
}
