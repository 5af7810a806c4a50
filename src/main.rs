mod cli;
mod command_handlers;
mod config;
mod default_sdk;
mod error;
mod matcher;
mod pin;
mod platform;
mod rewrite;
mod runner;

use anyhow::{Context, Result};
use clap::Parser;

use crate::cli::{management_args, Cli};
use crate::config::Settings;
use crate::default_sdk::PathResolver;
use crate::rewrite::CompletionState;

/// Log filter, e.g. PINCLOUD_LOG=debug.
const LOG_ENV: &str = "PINCLOUD_LOG";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, "info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            report(&e);
            std::process::exit(1);
        }
    }
}

// Failures reach stderr even when PINCLOUD_LOG silences the logger.
fn report(e: &anyhow::Error) {
    let text = error_text(e);
    if log::log_enabled!(log::Level::Error) {
        log::error!("{text}");
    } else {
        eprintln!("pincloud: {text}");
    }
}

fn error_text(e: &anyhow::Error) -> String {
    format!("{e:#}")
}

fn run() -> Result<i32> {
    let argv: Vec<String> = std::env::args_os()
        .map(|a| a.to_string_lossy().into_owned())
        .collect();
    let settings = Settings::from_env();
    log::debug!("config dir {:?}", settings.config_dir);

    // `gcloud pincloud ...` never reaches the real SDK.
    if let Some(args) = management_args(&argv) {
        let cli = Cli::parse_from(args);
        command_handlers::dispatch::dispatch(cli.command, &settings)?;
        return Ok(0);
    }

    let pins = config::load_pins(&settings)?;
    let completion = CompletionState::from_env();
    let resolution = rewrite::resolve(
        &pins,
        &argv,
        completion.as_ref(),
        &PathResolver::from_env(),
    )
    .context("Could not map command")?;
    runner::run(&resolution)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_text_carries_cause_chain() {
        let pins = config::parse_pins("kubectl get: 1.0.0", std::path::Path::new("/v"));
        let err = pins.context("Could not load pins").unwrap_err();
        let text = error_text(&err);
        assert!(text.starts_with("Could not load pins: line 1"), "{text}");
        assert!(text.contains("kubectl get: 1.0.0"), "{text}");
    }
}
