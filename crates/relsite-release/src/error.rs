//! Error types for relsite-release.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed release record: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("release is not publishable (draft: {draft}, prerelease: {prerelease})")]
    NotPublishable { draft: bool, prerelease: bool },

    #[error("release has no publication date")]
    MissingDate,

    #[error("failed to parse date {value:?}: {source}")]
    BadDate {
        value:  String,
        #[source]
        source: chrono::ParseError,
    },

    #[error(transparent)]
    Platform(#[from] relsite_platform::Error),

    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),
}

impl Error {
    /// True for the date failures, whichever form they took.
    pub fn is_bad_date(&self) -> bool { matches!(self, Error::MissingDate | Error::BadDate { .. }) }
}
