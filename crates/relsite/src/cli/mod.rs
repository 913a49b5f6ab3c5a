pub mod check;
pub mod notes;
pub mod render;
pub mod stage;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use relsite_fetch::ReqwestClient;

use crate::config::{Config, DEFAULT_CONFIG_FILE};

#[derive(Clone, Debug, Parser)]
#[command(name = "relsite", version = env!("CARGO_PKG_VERSION"), about, long_about = None, propagate_version = true)]
pub struct App {
    /// Configuration file; missing files fall back to defaults.
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Log at debug level regardless of RELSITE_LOG.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Fetch the latest release into the snapshot file for the build
    #[command(name = "stage")]
    Stage(stage::StageArg),
    /// Render the staged snapshot as release JSON or an HTML fragment
    #[command(alias = "r", name = "render")]
    Render(render::RenderArg),
    /// Refresh the cached release the way the download page does
    #[command(name = "check")]
    Check(check::CheckArg),
    /// Print release notes for a milestone
    #[command(name = "notes")]
    Notes(notes::NotesArg),
}

impl Commands {
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Commands::Stage(arg) => arg.run(config).await,
            Commands::Render(arg) => arg.run(config),
            Commands::Check(arg) => arg.run(config).await,
            Commands::Notes(arg) => arg.run(config).await,
        }
    }
}

pub(crate) fn http_client(config: &Config) -> anyhow::Result<ReqwestClient> {
    ReqwestClient::new(&config.upstream.user_agent, config.timeout())
        .context("failed to build HTTP client")
}
