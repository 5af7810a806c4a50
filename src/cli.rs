use clap::{Parser, Subcommand};

/// Reserved first argument that routes to pincloud itself instead of gcloud.
pub const MANAGE_COMMAND: &str = "pincloud";

#[derive(Parser, Debug)]
#[command(
    version,
    name = "pincloud",
    about = "pincloud: manage the gcloud SDK versions that pins.cfg refers to",
    override_usage = "gcloud pincloud {install,remove} VERSION\n       gcloud pincloud list"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Clone the default SDK into the versions directory and update it to VERSION.
    /// Example:
    ///   gcloud pincloud install 135.0.0
    Install {
        /// SDK version to install (e.g. 135.0.0)
        #[arg(value_name = "VERSION")]
        version: String,
    },
    /// Delete an installed SDK version directory
    Remove {
        #[arg(value_name = "VERSION")]
        version: String,
    },
    /// List installed SDK versions and the pins that use them
    List,
}

/// `Some` when argv asks for a management command, i.e. `gcloud pincloud ...`.
pub fn management_args(argv: &[String]) -> Option<&[String]> {
    match argv.get(1) {
        Some(first) if first == MANAGE_COMMAND => Some(&argv[1..]),
        _ => None,
    }
}
