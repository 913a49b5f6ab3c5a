//! Upstream release records as the hosting API delivers them.

use serde::{Deserialize, Serialize};

use crate::Result;

/// Asset state eligible for the download table.
pub const UPLOADED: &str = "uploaded";

/// One release record. Unknown fields are ignored; missing or mistyped
/// required fields fail the parse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRelease {
    pub name:         String,
    pub html_url:     String,
    #[serde(default)]
    pub body:         Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub created_at:   Option<String>,
    pub tarball_url:  String,
    pub zipball_url:  String,
    pub draft:        bool,
    pub prerelease:   bool,
    pub assets:       Vec<RawAsset>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAsset {
    pub name:                 String,
    pub browser_download_url: String,
    pub size:                 u64,
    pub state:                String,
}

impl RawRelease {
    pub fn from_json(bytes: &[u8]) -> Result<Self> { Ok(serde_json::from_slice(bytes)?) }

    pub fn is_publishable(&self) -> bool { !self.draft && !self.prerelease }

    /// Publication timestamp, falling back to creation time.
    pub fn timestamp(&self) -> Option<&str> {
        self.published_at
            .as_deref()
            .or(self.created_at.as_deref())
    }
}

impl RawAsset {
    pub fn is_uploaded(&self) -> bool { self.state == UPLOADED }
}
