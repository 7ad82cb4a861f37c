//! Meter command: stress pattern and meter of one line.

use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use versepad_core::Lexicon;
use versepad_core::reports::MeterReport;

use super::check_input_size;

/// Arguments for the `meter` subcommand.
#[derive(Args, Debug)]
pub struct MeterArgs {
    /// The line to scan (multiple arguments are joined with spaces).
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,
}

/// Classify the meter of a line of verse.
#[instrument(name = "cmd_meter", skip_all)]
pub fn cmd_meter(
    args: MeterArgs,
    global_json: bool,
    lexicon: &Lexicon,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    let line = args.text.join(" ");
    check_input_size(&line, max_input_bytes)?;
    debug!(line_len = line.len(), "executing meter command");

    let report = MeterReport::build(lexicon.dictionary(), &line);

    if global_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", report.meter.as_str().bold());
    if !report.pattern.is_empty() {
        println!("{}: {}", "Pattern".dimmed(), report.pattern);
    }
    if !report.unknown_words.is_empty() {
        println!(
            "{}: {}",
            "Unknown".dimmed(),
            report.unknown_words.join(", ").yellow()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> MeterArgs {
        MeterArgs {
            text: line.split(' ').map(String::from).collect(),
        }
    }

    #[test]
    fn scans_a_line() {
        let lexicon = Lexicon::embedded().unwrap();
        assert!(cmd_meter(args("Silver river"), false, &lexicon, None).is_ok());
        assert!(cmd_meter(args("Away, today!"), true, &lexicon, None).is_ok());
    }

    #[test]
    fn rejects_oversized_line() {
        let lexicon = Lexicon::embedded().unwrap();
        let err = cmd_meter(args("Silver river"), false, &lexicon, Some(4)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }
}
