use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, ValueEnum};
use relsite_fs::{AtomicWriteOptions, atomic_read, atomic_write};
use relsite_release::{ClassifyPolicy, Normalizer, RawRelease, Release};
use tracing::info;

use crate::config::Config;
use crate::html;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Canonical release JSON
    #[default]
    Json,
    /// Download-page fragment
    Html,
}

#[derive(Clone, Debug, Args)]
pub struct RenderArg {
    /// Snapshot to read; defaults to `render.snapshot`.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write here instead of stdout. Only written when rendering succeeds.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
}

impl RenderArg {
    pub fn run(self, config: &Config) -> anyhow::Result<()> {
        let input = self.input.unwrap_or_else(|| config.render.snapshot.clone());
        let release = load(config, &input)?;
        let rendered = render(&release, self.format)?;

        match self.output {
            Some(path) => {
                atomic_write(&path, rendered.as_bytes(), AtomicWriteOptions::new().create_parent(true))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(path = %path.display(), release = release.name(), "rendered release");
            }
            None => std::io::stdout()
                .write_all(rendered.as_bytes())
                .context("failed to write to stdout")?,
        }
        Ok(())
    }
}

/// Read and strictly normalize the staged snapshot.
pub fn load(config: &Config, input: &Path) -> anyhow::Result<Release> {
    let bytes = atomic_read(input)
        .with_context(|| format!("failed to read release snapshot {}", input.display()))?;
    let raw = RawRelease::from_json(&bytes)
        .with_context(|| format!("malformed release snapshot {}", input.display()))?;

    let options = config.normalize_options(ClassifyPolicy::Strict)?;
    Normalizer::new(options)
        .normalize(&raw)
        .with_context(|| format!("cannot publish release {:?}", raw.name))
}

pub fn render(release: &Release, format: Format) -> anyhow::Result<String> {
    Ok(match format {
        Format::Json => {
            let mut json = serde_json::to_string_pretty(release).context("failed to encode release")?;
            json.push('\n');
            json
        }
        Format::Html => html::fragment(release),
    })
}
