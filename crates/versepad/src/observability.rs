//! Logging setup for the CLI.
//!
//! Human-readable logs go to stderr. When a log file is configured, a JSONL
//! copy is written through a non-blocking appender; keep the returned guard
//! alive until exit so buffered lines are flushed.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

/// Explicit log file path.
pub const ENV_LOG_PATH: &str = "VERSEPAD_LOG_PATH";
/// Log directory; the file inside it is [`LOG_FILE_NAME`].
pub const ENV_LOG_DIR: &str = "VERSEPAD_LOG_DIR";
/// File name used inside a log directory.
pub const LOG_FILE_NAME: &str = "versepad.jsonl";

/// Where logs go besides stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// JSONL log file, if file logging is enabled.
    pub log_file: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve the log file from the environment, falling back to the
    /// configured `log_dir`.
    ///
    /// `VERSEPAD_LOG_PATH` wins over `VERSEPAD_LOG_DIR`, which wins over
    /// `log_dir`.
    pub fn from_env_with_overrides(log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            log_dir,
        )
    }

    fn resolve(
        log_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_dir: Option<PathBuf>,
    ) -> Self {
        let log_file = log_path.or_else(|| {
            env_dir
                .or(config_dir)
                .map(|dir| dir.join(LOG_FILE_NAME))
        });
        Self { log_file }
    }
}

/// Build the log filter from CLI flags and the configured level.
///
/// `RUST_LOG` overrides everything. Otherwise `--quiet` means errors only,
/// `-v` debug, `-vv` trace, and no flag the configured level.
pub fn env_filter(quiet: bool, verbose: u8, log_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, log_level))
}

fn level_directive(quiet: bool, verbose: u8, log_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => log_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Returns the appender guard when file logging is enabled.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (file_layer, guard) = match &config.log_file {
        Some(path) => {
            let (writer, guard) = file_writer(path)?;
            let layer = fmt::layer().json().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

fn file_writer(
    path: &Path,
) -> anyhow::Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_path_wins() {
        let config = ObservabilityConfig::resolve(
            Some("/tmp/explicit.log".into()),
            Some("/tmp/env".into()),
            Some("/tmp/config".into()),
        );
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/explicit.log")));
    }

    #[test]
    fn env_dir_beats_config_dir() {
        let config =
            ObservabilityConfig::resolve(None, Some("/tmp/env".into()), Some("/tmp/config".into()));
        assert_eq!(
            config.log_file,
            Some(PathBuf::from("/tmp/env").join(LOG_FILE_NAME))
        );
    }

    #[test]
    fn no_file_logging_by_default() {
        assert_eq!(
            ObservabilityConfig::resolve(None, None, None),
            ObservabilityConfig::default()
        );
    }

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_directive(true, 2, "info"), "error");
        assert_eq!(level_directive(false, 0, "warn"), "warn");
        assert_eq!(level_directive(false, 1, "info"), "debug");
        assert_eq!(level_directive(false, 3, "info"), "trace");
    }
}
