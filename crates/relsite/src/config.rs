//! Layered configuration: built-in defaults, then `relsite.toml`, then
//! `RELSITE_*` variables (`__` separates sections, e.g.
//! `RELSITE_UPSTREAM__TIMEOUT_SECS=5`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use relsite_fetch::{CURRENT_SCHEMA_VERSION, DEFAULT_API_BASE, DEFAULT_MAX_BYTES, FetchOptions, FileStore};
use relsite_release::{ClassifyPolicy, DEFAULT_TIME_ZONE, NormalizeOptions};
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "relsite.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub upstream: Upstream,
    pub render:   Render,
    pub cache:    Cache,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Upstream {
    pub api_base:     String,
    pub owner:        String,
    pub repo:         String,
    pub user_agent:   String,
    pub timeout_secs: u64,
}

impl Default for Upstream {
    fn default() -> Self {
        Self {
            api_base:     DEFAULT_API_BASE.to_string(),
            owner:        "dshearer".to_string(),
            repo:         "jobber".to_string(),
            user_agent:   "relsite".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Render {
    /// IANA zone the release date is shown in.
    pub time_zone: String,
    /// Snapshot written by `stage` and read by `render`.
    pub snapshot:  PathBuf,
}

impl Default for Render {
    fn default() -> Self {
        Self {
            time_zone: DEFAULT_TIME_ZONE.name().to_string(),
            snapshot:  PathBuf::from("latest-release.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cache {
    pub path:           PathBuf,
    pub schema_version: u32,
    pub max_bytes:      usize,
}

impl Default for Cache {
    fn default() -> Self {
        Self {
            path:           PathBuf::from(".relsite/latest-release.json"),
            schema_version: CURRENT_SCHEMA_VERSION,
            max_bytes:      DEFAULT_MAX_BYTES,
        }
    }
}

impl Config {
    /// A missing file is not an error; the defaults apply.
    pub fn load(path: &Path) -> Result<Self, figment::Error> {
        Self::figment(path).extract()
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("RELSITE_").ignore(&["log"]).split("__"))
    }

    pub fn latest_release_url(&self) -> String {
        relsite_fetch::latest_release_url(
            &self.upstream.api_base,
            &self.upstream.owner,
            &self.upstream.repo,
        )
    }

    pub fn timeout(&self) -> Duration { Duration::from_secs(self.upstream.timeout_secs) }

    pub fn normalize_options(&self, policy: ClassifyPolicy) -> relsite_release::Result<NormalizeOptions> {
        NormalizeOptions::default()
            .policy(policy)
            .time_zone_named(&self.render.time_zone)
    }

    /// Runtime fetch settings; classification is lenient.
    pub fn fetch_options(&self) -> relsite_release::Result<FetchOptions> {
        Ok(FetchOptions::new(self.latest_release_url())
            .schema_version(self.cache.schema_version)
            .timeout(self.timeout())
            .normalize(self.normalize_options(ClassifyPolicy::Lenient)?))
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.cache.path).max_bytes(self.cache.max_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::figment(&dir.path().join("absent.toml"))
            .extract::<Config>()
            .unwrap();
        assert_eq!(config.upstream.owner, "dshearer");
        assert_eq!(config.render.time_zone, "America/Los_Angeles");
        assert_eq!(config.cache.max_bytes, 65536);
        assert_eq!(
            config.latest_release_url(),
            "https://api.github.com/repos/dshearer/jobber/releases/latest"
        );
    }

    #[test]
    fn test_file_overrides_defaults_per_key() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relsite.toml");
        std::fs::write(
            &path,
            r#"
[upstream]
owner = "someone"
timeout_secs = 3

[render]
time_zone = "UTC"
"#,
        )
        .unwrap();

        let config = Config::figment(&path).extract::<Config>().unwrap();
        assert_eq!(config.upstream.owner, "someone");
        assert_eq!(config.upstream.repo, "jobber");
        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.render.time_zone, "UTC");
        assert_eq!(config.cache, Cache::default());
    }

    #[test]
    fn test_fetch_options_are_lenient() {
        let options = Config::default().fetch_options().unwrap();
        assert_eq!(options.normalize.policy, ClassifyPolicy::Lenient);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.schema_version, CURRENT_SCHEMA_VERSION);
    }

    #[test]
    fn test_unknown_time_zone_rejected() {
        let mut config = Config::default();
        config.render.time_zone = "Mars/Olympus_Mons".to_string();
        assert!(config.normalize_options(ClassifyPolicy::Strict).is_err());
    }
}
