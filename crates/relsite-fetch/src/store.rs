//! Persisted cache records.
//!
//! A [`CacheStore`] holds a single [`CachedState`]. Stores do no locking:
//! independent processes sharing one store race, and the last successful
//! write wins. The cache is advisory, so that is acceptable.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use relsite_fs::{AtomicWriteOptions, atomic_write, read_capped};
use relsite_release::Release;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Schema version written by this build.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Default write limit for [`FileStore`].
pub const DEFAULT_MAX_BYTES: usize = 64 * 1024;

/// The persisted record. Short field names keep the serialized form small.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedState {
    #[serde(rename = "v")]
    pub schema_version:     u32,
    #[serde(default)]
    pub release:            Option<Release>,
    #[serde(rename = "etag", default)]
    pub revalidation_token: Option<String>,
}

impl CachedState {
    pub fn empty(schema_version: u32) -> Self {
        Self {
            schema_version,
            release: None,
            revalidation_token: None,
        }
    }
}

pub trait CacheStore: Send + Sync {
    /// The stored record, or `None` if nothing was ever written.
    fn read(&self) -> Result<Option<CachedState>, StoreError>;

    /// Replace the stored record.
    fn write(&self, state: &CachedState) -> Result<(), StoreError>;
}

impl<S: CacheStore + ?Sized> CacheStore for &S {
    fn read(&self) -> Result<Option<CachedState>, StoreError> { (**self).read() }

    fn write(&self, state: &CachedState) -> Result<(), StoreError> { (**self).write(state) }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<Option<CachedState>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub fn with_state(state: CachedState) -> Self {
        Self {
            state: Mutex::new(Some(state)),
        }
    }

    pub fn snapshot(&self) -> Option<CachedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl CacheStore for MemoryStore {
    fn read(&self) -> Result<Option<CachedState>, StoreError> { Ok(self.snapshot()) }

    fn write(&self, state: &CachedState) -> Result<(), StoreError> {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = Some(state.clone());
        Ok(())
    }
}

/// Compact JSON in a single file, replaced atomically on every write.
#[derive(Debug, Clone)]
pub struct FileStore {
    path:      PathBuf,
    max_bytes: usize,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:      path.into(),
            max_bytes: DEFAULT_MAX_BYTES,
        }
    }

    pub fn max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    pub fn path(&self) -> &Path { &self.path }
}

impl CacheStore for FileStore {
    fn read(&self) -> Result<Option<CachedState>, StoreError> {
        let Some(bytes) = read_capped(&self.path, self.max_bytes)? else {
            return Ok(None);
        };
        if bytes.len() > self.max_bytes {
            return Err(StoreError::Oversized {
                limit: self.max_bytes,
            });
        }
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(StoreError::Decode)
    }

    fn write(&self, state: &CachedState) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(state).map_err(StoreError::Encode)?;
        if bytes.len() > self.max_bytes {
            return Err(StoreError::TooLarge {
                size:  bytes.len(),
                limit: self.max_bytes,
            });
        }
        atomic_write(&self.path, &bytes, AtomicWriteOptions::new().create_parent(true))?;
        Ok(())
    }
}
