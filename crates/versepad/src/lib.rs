//! Library interface for the `versepad` CLI.
//!
//! This crate exposes the CLI's argument parser and command structure as a library,
//! primarily for documentation generation and testing. The actual entry point is
//! in `main.rs`.
//!
//! # Structure
//!
//! - [`Cli`] - The root argument parser (clap derive)
//! - [`Commands`] - Available subcommands
//! - [`commands`] - Command implementations
//! - `server` - MCP server (feature `mcp`)

pub mod commands;

#[cfg(feature = "mcp")]
pub mod server;

use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;

/// Color output preference.
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect terminal capabilities automatically.
    #[default]
    Auto,
    /// Always emit colors.
    Always,
    /// Never emit colors.
    Never,
}

impl ColorChoice {
    /// Configure global color output based on this choice.
    ///
    /// Call this once at startup to set the color mode.
    pub fn apply(self) {
        match self {
            Self::Auto => {} // owo-colors auto-detects by default
            Self::Always => owo_colors::set_override(true),
            Self::Never => owo_colors::set_override(false),
        }
    }
}

const ENV_HELP: &str = "\
ENVIRONMENT VARIABLES:
    RUST_LOG               Log filter (e.g., debug, versepad_core=trace)
    VERSEPAD_LOG_PATH      Explicit log file path
    VERSEPAD_LOG_DIR       Log directory
    VERSEPAD_DICTIONARY    Pronunciation dictionary (CMUdict format)
    VERSEPAD_RHYME_LIMIT   Rhymes to show per query
";

/// Command-line interface definition for versepad.
#[derive(Parser)]
#[command(name = "versepad")]
#[command(about = "Phonetic analysis for poets: syllables, stress, meter and rhyme", long_about = None)]
#[command(version, arg_required_else_help = true)]
#[command(after_long_help = ENV_HELP)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Print only the version number (for scripting)
    #[arg(long)]
    pub version_only: bool,

    /// Path to configuration file (overrides discovery)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run as if started in DIR
    #[arg(short = 'C', long, global = true)]
    pub chdir: Option<PathBuf>,

    /// Pronunciation dictionary in CMUdict format (overrides config)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub dictionary: Option<PathBuf>,

    /// Only print errors (suppresses warnings/info)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// More detail (repeatable; e.g. -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Colorize output
    #[arg(long, global = true, value_enum, default_value_t)]
    pub color: ColorChoice,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available subcommands for the CLI.
#[derive(Subcommand)]
pub enum Commands {
    /// Show pronunciation, syllables and stress of a word
    Word(commands::word::WordArgs),

    /// Find rhymes for a word
    Rhymes(commands::rhymes::RhymesArgs),

    /// Classify the meter of a line
    Meter(commands::meter::MeterArgs),

    /// Suggest rhyming phrases for a word
    Phrases(commands::phrases::PhrasesArgs),

    /// Analyze a poem line by line
    Scan(commands::scan::ScanArgs),

    /// Show package information
    Info(commands::info::InfoArgs),

    /// Start MCP (Model Context Protocol) server on stdio
    #[cfg(feature = "mcp")]
    Serve(commands::serve::ServeArgs),
}

impl Commands {
    /// Whether the command needs the pronunciation dictionary loaded.
    pub const fn needs_lexicon(&self) -> bool {
        !matches!(self, Self::Info(_))
    }
}

/// Returns the clap command for documentation generation
pub fn command() -> clap::Command {
    Cli::command()
}
