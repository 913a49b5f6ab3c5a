use std::time::Duration;

use relsite_release::{ClassifyPolicy, NormalizeOptions};

use crate::store::CURRENT_SCHEMA_VERSION;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// `GET` target for the newest published release of `owner/repo`.
pub fn latest_release_url(api_base: &str, owner: &str, repo: &str) -> String {
    format!(
        "{}/repos/{}/{}/releases/latest",
        api_base.trim_end_matches('/'),
        owner,
        repo
    )
}

/// Configuration of a [`ConditionalFetcher`](crate::ConditionalFetcher).
#[derive(Debug, Clone)]
pub struct FetchOptions {
    /// Release endpoint.
    pub url: String,

    /// Schema version this build reads and writes. Stored records with any
    /// other version are discarded.
    ///
    /// Default: [`CURRENT_SCHEMA_VERSION`]
    pub schema_version: u32,

    /// Upper bound on the single request of a refresh.
    ///
    /// Default: 10s
    pub timeout: Duration,

    /// Normalization settings for fresh responses.
    ///
    /// Default: lenient classification, so one odd asset does not hide the
    /// whole release.
    pub normalize: NormalizeOptions,
}

impl FetchOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url:            url.into(),
            schema_version: CURRENT_SCHEMA_VERSION,
            timeout:        Duration::from_secs(10),
            normalize:      NormalizeOptions::default().policy(ClassifyPolicy::Lenient),
        }
    }

    pub fn schema_version(mut self, schema_version: u32) -> Self {
        self.schema_version = schema_version;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn normalize(mut self, normalize: NormalizeOptions) -> Self {
        self.normalize = normalize;
        self
    }
}
