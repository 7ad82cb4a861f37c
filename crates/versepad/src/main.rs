//! versepad CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use versepad::{Cli, Commands, commands};
use versepad_core::config::ConfigLoader;
use versepad_core::lexicon::{DictionarySource, shared};

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    // arg_required_else_help ensures we have --version-only or a subcommand
    let Some(command) = cli.command else {
        return Ok(());
    };

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let (config, config_sources) = loader.load().context("failed to load configuration")?;

    let obs_config = observability::ObservabilityConfig::from_env_with_overrides(
        config
            .log_dir
            .as_ref()
            .map(|dir| dir.as_std_path().to_path_buf()),
    );
    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    let _guard = observability::init_observability(&obs_config, env_filter)
        .context("failed to initialize logging/tracing")?;

    debug!(
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        color = ?cli.color,
        chdir = ?cli.chdir,
        dictionary = ?cli.dictionary,
        "CLI initialized"
    );

    let dictionary = match cli.dictionary {
        Some(ref path) => {
            let path = camino::Utf8PathBuf::try_from(path.clone()).map_err(|e| {
                anyhow::anyhow!(
                    "dictionary path is not valid UTF-8: {}",
                    e.into_path_buf().display()
                )
            })?;
            DictionarySource::File(path)
        }
        None => config.dictionary_source(config_sources.primary_dir()),
    };

    if command.needs_lexicon() {
        commands::load_lexicon(dictionary.clone(), !cli.quiet && !cli.json)?;
    }

    let max_input = config.input_limit();

    // Execute command
    let result = match command {
        Commands::Word(args) => commands::word::cmd_word(args, cli.json, shared::get()),
        Commands::Rhymes(args) => commands::rhymes::cmd_rhymes(
            args,
            cli.json,
            shared::rhyme_index(),
            config.rhyme_limit(),
        ),
        Commands::Meter(args) => {
            commands::meter::cmd_meter(args, cli.json, shared::get(), max_input)
        }
        Commands::Phrases(args) => config
            .phrase_suggester()
            .context("invalid phrase templates in configuration")
            .and_then(|suggester| {
                commands::phrases::cmd_phrases(
                    args,
                    cli.json,
                    shared::rhyme_index(),
                    &suggester,
                    config.phrase_count(),
                )
            }),
        Commands::Scan(args) => commands::scan::cmd_scan(
            args,
            cli.json,
            shared::get(),
            config.rhyme_limit(),
            max_input,
        ),
        Commands::Info(args) => {
            commands::info::cmd_info(args, cli.json, &config, &config_sources, &dictionary)
        }
        #[cfg(feature = "mcp")]
        Commands::Serve(args) => versepad::server::ServerOptions::from_config(&config)
            .context("invalid phrase templates in configuration")
            .and_then(|options| {
                let rt = tokio::runtime::Runtime::new()
                    .context("failed to create async runtime for MCP server")?;
                rt.block_on(commands::serve::cmd_serve(args, options))
            }),
    };
    if let Err(ref err) = result {
        tracing::error!(error = %err, "fatal error");
    }
    result
}
