use anyhow::Context;
use clap::Args;
use relsite_fetch::ReleaseNotes;

use crate::config::Config;

#[derive(Clone, Debug, Args)]
pub struct NotesArg {
    /// Milestone title, e.g. `1.4`
    pub milestone: String,
}

impl NotesArg {
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let client = super::http_client(config)?;
        let upstream = &config.upstream;

        let notes = ReleaseNotes::collect(
            &client,
            &upstream.api_base,
            &upstream.owner,
            &upstream.repo,
            &self.milestone,
        )
        .await
        .with_context(|| format!("failed to collect issues for milestone {}", self.milestone))?;

        print!("{notes}");
        Ok(())
    }
}
