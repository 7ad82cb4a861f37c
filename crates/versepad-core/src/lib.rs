//! Core library for versepad.
//!
//! Phonetic analysis for poets: syllables, stress, meter and rhyme, all
//! derived from a CMU-style pronunciation dictionary. This crate provides
//! the engine used by the `versepad` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`phonetics`] - Phonemes, stress levels, transcriptions, normalization
//! - [`dictionary`] - CMUdict parsing and lookup
//! - [`lexicon`] - Dictionary loading, availability and the shared copy
//! - [`syllables`] - Syllabification and hyphenated display
//! - [`meter`] - Stress patterns and meter classification
//! - [`rhyme`] - Perfect, near and multi-syllabic rhymes
//! - [`phrases`] - Rhyming phrase suggestions
//! - [`scan`] - Whole-poem analysis
//! - [`reports`] - Serializable results for presentation layers
//! - [`text`] - Word, line and stanza splitting
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```no_run
//! use versepad_core::{Lexicon, RhymeIndex, meter};
//!
//! let lexicon = Lexicon::embedded().expect("embedded lexicon parses");
//! let index = RhymeIndex::new(lexicon.dictionary());
//!
//! let rhymes = index.perfect_rhymes("moon");
//! let line = meter::analyze_line(lexicon.dictionary(), "Silver river");
//! println!("{} rhymes, meter: {}", rhymes.len(), line.meter);
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionary;
pub mod error;
pub mod lexicon;
pub mod meter;
pub mod phonetics;
pub mod phrases;
pub mod reports;
pub mod rhyme;
pub mod scan;
pub mod syllables;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use dictionary::PronunciationDictionary;
pub use error::{
    AnalysisError, AnalysisResult, ConfigError, ConfigResult, LexiconError, LexiconResult,
};
pub use lexicon::{Availability, DictionarySource, Lexicon};
pub use meter::{MeterAnalysis, MeterLabel, StressPattern};
pub use phonetics::{Phoneme, Stress, Transcription, normalize};
pub use phrases::PhraseSuggester;
pub use reports::{
    LineReport, MeterReport, PhraseReport, RhymeKind, RhymeReport, ScanReport, WordReport,
};
pub use rhyme::RhymeIndex;
pub use syllables::{Syllable, syllabify};

/// Default maximum input size: 5 MiB.
///
/// Applies to files read by the CLI and text passed to the MCP server.
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
