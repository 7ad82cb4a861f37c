//! Error types for versepad-core.
//!
//! Lookup misses are never errors. These types only cover configuration
//! problems, a pronunciation dictionary that cannot be used at all, and
//! invalid caller-supplied phrase templates.

use std::sync::Arc;

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that abort loading a pronunciation dictionary.
///
/// A missing dictionary file is not one of these: it yields an
/// unavailable [`Lexicon`](crate::lexicon::Lexicon) instead.
#[derive(Error, Debug, Clone)]
pub enum LexiconError {
    /// The dictionary file exists but could not be read.
    #[error("failed to read pronunciation dictionary {path}")]
    Read {
        /// The file that failed to read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: Arc<std::io::Error>,
    },

    /// A line of the dictionary is not valid CMUdict format.
    #[error("corrupt pronunciation dictionary at line {line}: {reason}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        reason: String,
    },

    /// The dictionary parsed but contained no entries.
    #[error("pronunciation dictionary {source_name} has no entries")]
    Empty {
        /// Human-readable name of the source (path or "embedded").
        source_name: String,
    },
}

/// Result type alias using [`LexiconError`].
pub type LexiconResult<T> = Result<T, LexiconError>;

/// Errors that can occur when configuring an analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// A phrase template is missing a required placeholder.
    #[error("invalid phrase template {template:?}: {reason}")]
    InvalidTemplate {
        /// The template as supplied.
        template: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No phrase templates were supplied.
    #[error("at least one phrase template is required")]
    NoTemplates,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
