//! Log setup for the `mibgen` binary.
//!
//! Everything is written to stderr: `dump` lines and `--output json`
//! summaries own stdout and must stay parseable when piped.

use anyhow::{Context, Result, bail};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use mibgen_core::config::GeneralConfig;

/// Install the global subscriber from `[general]` (`log_level`, `log_format`).
///
/// `RUST_LOG`, when set and valid, replaces `log_level`. `log_format` is
/// `"pretty"` for terminals or `"json"` for one JSON object per line.
pub fn init_tracing(config: &GeneralConfig) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let stderr = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    let layer = match config.log_format.as_str() {
        "json" => stderr.json().boxed(),
        "pretty" => stderr.pretty().boxed(),
        other => bail!("unknown log format '{other}', expected 'json' or 'pretty'"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .with_context(|| format!("failed to install {} log subscriber", config.log_format))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_is_rejected_before_install() {
        let config = GeneralConfig {
            log_format: "xml".to_owned(),
            ..GeneralConfig::default()
        };
        let err = init_tracing(&config).expect_err("xml is not a log format");
        assert!(err.to_string().contains("xml"));
    }
}
