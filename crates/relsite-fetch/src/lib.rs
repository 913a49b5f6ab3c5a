//! Conditional fetching and persisted caching of upstream release metadata.
//!
//! # Architecture
//!
//! - [`HttpClient`] - the single I/O seam towards the upstream API
//! - [`CacheStore`] - where the last good release and its ETag live
//! - [`ConditionalFetcher`] - one revalidating request per refresh, never fails
//! - [`stage_snapshot`] - unconditional fetch of the snapshot for the static build
//! - [`ReleaseNotes`] - closed issues of a milestone, grouped by label

mod conditional;
mod error;
mod http;
pub mod notes;
mod options;
mod stage;
mod store;

pub use conditional::{ConditionalFetcher, Outcome, Refresh, load_cached};
pub use error::{FetchError, Result, StoreError};
pub use http::{GITHUB_ACCEPT, HttpClient, HttpResponse};
pub use notes::ReleaseNotes;
pub use options::{DEFAULT_API_BASE, FetchOptions, latest_release_url};
pub use stage::stage_snapshot;
pub use store::{
    CURRENT_SCHEMA_VERSION, CacheStore, CachedState, DEFAULT_MAX_BYTES, FileStore, MemoryStore,
};

#[cfg(feature = "reqwest")]
pub use http::ReqwestClient;
