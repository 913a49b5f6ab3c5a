use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use relsite_fetch::stage_snapshot;

use crate::config::Config;

#[derive(Clone, Debug, Args)]
pub struct StageArg {
    /// Destination; defaults to `render.snapshot`.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl StageArg {
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let dest = self.output.unwrap_or_else(|| config.render.snapshot.clone());
        let url = config.latest_release_url();
        let client = super::http_client(config)?;

        stage_snapshot(&client, &url, &dest)
            .await
            .with_context(|| format!("failed to stage {} into {}", url, dest.display()))?;
        Ok(())
    }
}
