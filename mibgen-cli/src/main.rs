//! mibgen -- command-line front end
//!
//! Loads `mibgen.toml` (or defaults), initializes logging and dispatches
//! to the subcommand handler. Errors map to exit codes via [`CliError::exit_code`].

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use mibgen_core::config::MibgenConfig;

use crate::cli::{Cli, Commands};
use crate::error::CliError;
use crate::output::OutputWriter;

const DEFAULT_CONFIG_PATH: &str = "mibgen.toml";

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };

    if let Err(e) = logging::init_tracing(&config.general) {
        eprintln!("error: {e:#}");
        return ExitCode::FAILURE;
    }

    // Warnings raised while loading config predate the subscriber.
    for &env_key in config.ignored_env_overrides() {
        tracing::warn!(env_key, "empty value in env var, ignoring");
    }

    let writer = OutputWriter::new(cli.output);
    let result = match cli.command {
        Commands::Generate(args) => commands::generate::execute(args, &config.generator, &writer),
        Commands::Dump(args) => commands::dump::execute(args, &config.generator, &writer),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            fail(&e)
        }
    }
}

fn fail(e: &CliError) -> ExitCode {
    eprintln!("error: {e}");
    ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
}

/// Load the effective configuration.
///
/// An explicit `--config` must exist. Without it, `mibgen.toml` in the
/// working directory is used when present, otherwise defaults plus env overrides.
fn load_config(cli: &Cli) -> Result<MibgenConfig, CliError> {
    let mut config = match &cli.config {
        Some(path) => MibgenConfig::load(path)?,
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            MibgenConfig::load(DEFAULT_CONFIG_PATH)?
        }
        None => {
            let mut config = MibgenConfig::default();
            config.apply_env_overrides();
            config.validate()?;
            config
        }
    };

    if let Some(level) = &cli.log_level {
        config.general.log_level.clone_from(level);
        config.validate()?;
    }

    Ok(config)
}
