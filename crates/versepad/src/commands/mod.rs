//! Command implementations.

use std::time::Duration;

use anyhow::Context;
use camino::Utf8Path;
use indicatif::{ProgressBar, ProgressStyle};

use versepad_core::lexicon::{self, DictionarySource, Lexicon};

pub mod info;
pub mod meter;
pub mod phrases;
pub mod rhymes;
pub mod scan;
#[cfg(feature = "mcp")]
pub mod serve;
pub mod word;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Preflight: check file size via metadata before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = metadata.len() as usize;
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    let content = std::fs::read_to_string(path.as_std_path())
        .with_context(|| format!("failed to read {path}"))?;
    Ok(content)
}

/// Reject inline text over the configured limit.
pub fn check_input_size(text: &str, max_bytes: Option<usize>) -> anyhow::Result<()> {
    if let Some(max) = max_bytes
        && text.len() > max
    {
        anyhow::bail!(
            "input too large: {} bytes (limit: {max} bytes)",
            text.len()
        );
    }
    Ok(())
}

/// Load the process-wide lexicon, showing a spinner for external files.
///
/// A missing dictionary file is not fatal: the lexicon comes back in the
/// unavailable state and every lookup misses.
pub fn load_lexicon(source: DictionarySource, show_progress: bool) -> anyhow::Result<&'static Lexicon> {
    let spinner = if show_progress && matches!(source, DictionarySource::File(_)) {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(format!("loading {source}"));
        pb.enable_steady_tick(Duration::from_millis(80));
        pb
    } else {
        ProgressBar::hidden()
    };

    let described = source.to_string();
    let result = lexicon::shared::init(source);
    spinner.finish_and_clear();

    result.with_context(|| format!("failed to load pronunciation dictionary {described}"))
}
