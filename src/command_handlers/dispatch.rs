use crate::cli::Commands;
use crate::command_handlers::{install, list, remove};
use crate::config::Settings;
use crate::default_sdk::PathResolver;
use anyhow::Result;

pub fn dispatch(cmd: Commands, settings: &Settings) -> Result<()> {
    match cmd {
        Commands::Install { version } => {
            install::run_install(settings, &version, &PathResolver::from_env())
        }
        Commands::Remove { version } => remove::remove_version(settings, &version),
        Commands::List => list::list_versions(settings),
    }
}
