use std::fmt::Write;

use clap::Args;
use relsite_fetch::{ConditionalFetcher, load_cached};
use relsite_release::Release;
use tracing::debug;

use crate::config::Config;

#[derive(Clone, Debug, Args)]
pub struct CheckArg {
    /// Print the cached release without contacting upstream.
    #[arg(long)]
    pub offline: bool,
}

impl CheckArg {
    /// Upstream and cache failures degrade the output but never the exit
    /// status; only an unusable configuration is an error.
    pub async fn run(self, config: &Config) -> anyhow::Result<()> {
        let release = if self.offline {
            cached_release(config)
        } else {
            let client = super::http_client(config)?;
            let fetcher = ConditionalFetcher::new(client, config.file_store(), config.fetch_options()?);
            let refresh = fetcher.refresh().await;
            // the fetcher already warned about the failure
            if refresh.outcome.is_failed() {
                debug!("showing cached release");
            }
            refresh.state.release
        };

        print!("{}", summary(release.as_ref()));
        Ok(())
    }
}

/// The release a page load would show before any request is made.
pub fn cached_release(config: &Config) -> Option<Release> {
    load_cached(&config.file_store(), config.cache.schema_version).release
}

pub fn summary(release: Option<&Release>) -> String {
    let Some(release) = release else {
        return "No release information available.\n".to_string();
    };

    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", release.name(), release.date());
    let _ = writeln!(out, "  notes: {}", release.html_url());
    for artifact in release.source_artifacts() {
        let _ = writeln!(out, "  source: {} {}", artifact.name, artifact.url);
    }
    for (os, asset) in release.binary_assets().iter() {
        let _ = writeln!(
            out,
            "  {} [{}]: {} ({}) {}",
            os, asset.cpu, asset.name, asset.size, asset.url
        );
    }
    out
}
