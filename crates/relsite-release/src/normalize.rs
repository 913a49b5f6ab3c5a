use chrono_tz::Tz;
use relsite_platform::{Classifier, ClassifyPolicy, RuleSet};
use tracing::debug;

use crate::format::{format_date, format_size};
use crate::model::{Asset, BinaryAssets, Release, SourceArtifact};
use crate::raw::RawRelease;
use crate::{Error, Result};

/// Display zone used by the download page.
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::America::Los_Angeles;

/// Configuration of a [`Normalizer`].
#[derive(Debug, Clone)]
pub struct NormalizeOptions {
    pub policy:    ClassifyPolicy,
    pub time_zone: Tz,
    pub rules:     RuleSet,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            policy:    ClassifyPolicy::Strict,
            time_zone: DEFAULT_TIME_ZONE,
            rules:     RuleSet::default(),
        }
    }
}

impl NormalizeOptions {
    pub fn policy(mut self, policy: ClassifyPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Set the display zone from an IANA name such as `"Europe/Berlin"`.
    pub fn time_zone_named(self, name: &str) -> Result<Self> {
        let tz: Tz = name
            .parse()
            .map_err(|_| Error::UnknownTimeZone(name.to_string()))?;
        Ok(self.time_zone(tz))
    }

    pub fn rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }
}

/// Turns [`RawRelease`] records into [`Release`]s.
#[derive(Debug, Clone)]
pub struct Normalizer {
    classifier: Classifier,
    time_zone:  Tz,
}

impl Default for Normalizer {
    fn default() -> Self { Self::new(NormalizeOptions::default()) }
}

impl Normalizer {
    pub fn new(options: NormalizeOptions) -> Self {
        Self {
            classifier: Classifier::new(options.rules, options.policy),
            time_zone:  options.time_zone,
        }
    }

    pub fn policy(&self) -> ClassifyPolicy { self.classifier.policy() }

    /// Build the display model.
    ///
    /// Checks run in a fixed order: publishability, then the date, then the
    /// assets. Unuploaded assets are dropped before classification, and two
    /// assets with the same OS label leave only the later one.
    pub fn normalize(&self, raw: &RawRelease) -> Result<Release> {
        if !raw.is_publishable() {
            return Err(Error::NotPublishable {
                draft:      raw.draft,
                prerelease: raw.prerelease,
            });
        }

        let date = format_date(raw.timestamp().ok_or(Error::MissingDate)?, self.time_zone)?;

        let source_artifacts = [
            SourceArtifact {
                url:  raw.tarball_url.clone(),
                name: format!("{}.tar", raw.name),
            },
            SourceArtifact {
                url:  raw.zipball_url.clone(),
                name: format!("{}.zip", raw.name),
            },
        ];

        let mut binary_assets = BinaryAssets::new();
        for asset in &raw.assets {
            if !asset.is_uploaded() {
                debug!(asset = %asset.name, state = %asset.state, "skipping asset");
                continue;
            }

            let platform = self.classifier.classify(&asset.name)?;
            let replaced = binary_assets.insert(platform.os.clone(), Asset {
                cpu:  platform.cpu,
                name: asset.name.clone(),
                size: format_size(asset.size),
                url:  asset.browser_download_url.clone(),
            });
            if let Some(old) = replaced {
                debug!(os = %platform.os, dropped = %old.name, kept = %asset.name, "asset replaced");
            }
        }

        Ok(Release::new(
            raw.name.clone(),
            raw.html_url.clone(),
            raw.body.clone().unwrap_or_default(),
            date,
            source_artifacts,
            binary_assets,
        ))
    }
}
