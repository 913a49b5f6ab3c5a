//! Error types for relsite-fetch.

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FetchError>;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("unexpected HTTP status {status} from {url}")]
    Status { status: u16, url: String },

    #[error(transparent)]
    Release(#[from] relsite_release::Error),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fs(#[from] relsite_fs::Error),

    #[error("malformed response from {url}: {source}")]
    Decode {
        url:    String,
        #[source]
        source: serde_json::Error,
    },

    #[error("pagination did not end after {0} pages")]
    TooManyPages(usize),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Fs(#[from] relsite_fs::Error),

    #[error("failed to encode cache record: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode cache record: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("cache record is {size} bytes, limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("stored cache record exceeds {limit} bytes")]
    Oversized { limit: usize },
}
