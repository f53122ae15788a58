//! CLI argument definitions for TACO.
//!
//! Uses `clap` derive macros to define the command surface. Each command
//! corresponds to a handler in the [`super::commands`] module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "taco",
    version,
    about = "Tools for Apache Cordova",
    long_about = "TACO wraps the Cordova CLI with kits: pinned, tested sets of Cordova CLI, \
                  platform and plugin versions recorded per project in taco.json."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Kit metadata file to use instead of the bundled catalog
    #[arg(long, global = true, env = "TACO_KIT_METADATA", value_name = "PATH")]
    pub kit_metadata: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List kits or select one for a project
    Kit {
        #[command(subcommand)]
        action: Option<KitAction>,

        #[command(flatten)]
        list: KitListArgs,
    },

    /// Create a new Cordova project
    Create {
        /// Directory to create the project in
        path: PathBuf,
        /// Reverse-domain application id (e.g., com.example.hello)
        id: Option<String>,
        /// Display name of the application
        name: Option<String>,
        /// Kit to pin the project to
        #[arg(long, conflicts_with = "cordova")]
        kit: Option<String>,
        /// Cordova CLI version to pin the project to
        #[arg(long)]
        cordova: Option<String>,
        /// Directory whose contents become the project's www/
        #[arg(long, value_name = "DIR")]
        copy_from: Option<PathBuf>,
        /// Cordova executable to run
        #[arg(long, env = "TACO_CORDOVA_BIN", value_name = "PATH")]
        cordova_bin: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum KitAction {
    /// List available kits (the default)
    List(KitListArgs),
    /// Switch a project to a kit or a Cordova CLI version
    Select {
        /// Kit to select
        #[arg(long, conflicts_with = "cordova")]
        kit: Option<String>,
        /// Cordova CLI version to select
        #[arg(long)]
        cordova: Option<String>,
        /// Project directory (defaults to the nearest directory with taco.json)
        #[arg(long, value_name = "DIR")]
        project: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Default)]
pub struct KitListArgs {
    /// Show a single kit
    #[arg(long)]
    pub kit: Option<String>,
    /// Also write the listing as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub json: Option<PathBuf>,
}

/// Parse command-line arguments into a [`Cli`] struct.
pub fn parse() -> Cli {
    Cli::parse()
}
