//! Conditional refresh of the cached release.
//!
//! One refresh reads the cache, issues exactly one request (revalidating with
//! the stored ETag when there is one) and settles:
//!
//! - `304`: the cached release and token stay as they are.
//! - `200`: the body is normalized and, on success, replaces the cache.
//! - anything else: the cached release stays, the failure is logged.
//!
//! A refresh never fails from the caller's point of view; the worst case is
//! a stale or empty release.

use relsite_release::{Normalizer, RawRelease, Release};
use tracing::{debug, info, warn};

use crate::error::{FetchError, Result};
use crate::http::{GITHUB_ACCEPT, HttpClient};
use crate::options::FetchOptions;
use crate::store::{CacheStore, CachedState};

/// How the request of a refresh resolved.
#[derive(Debug)]
pub enum Outcome {
    /// Upstream confirmed the cached copy.
    Unchanged,
    /// A new release was normalized and is now displayed.
    Changed,
    /// The request or the normalization failed; the cached copy is displayed.
    Failed(FetchError),
}

impl Outcome {
    pub fn is_failed(&self) -> bool { matches!(self, Outcome::Failed(_)) }
}

/// Result of one refresh: the state to display and how it was reached.
#[derive(Debug)]
pub struct Refresh {
    pub state:   CachedState,
    pub outcome: Outcome,
}

impl Refresh {
    pub fn release(&self) -> Option<&Release> { self.state.release.as_ref() }
}

/// The cached state a load starts from.
///
/// Unreadable records and records of another schema version yield an empty
/// state; nothing from them is carried over.
pub fn load_cached<S: CacheStore + ?Sized>(store: &S, schema_version: u32) -> CachedState {
    match store.read() {
        Ok(Some(state)) if state.schema_version == schema_version => {
            debug!(has_release = state.release.is_some(), "loaded cached release");
            state
        }
        Ok(Some(state)) => {
            info!(
                found = state.schema_version,
                current = schema_version,
                "discarding cache with another schema version"
            );
            CachedState::empty(schema_version)
        }
        Ok(None) => CachedState::empty(schema_version),
        Err(e) => {
            warn!(error = %e, "unreadable cache, starting empty");
            CachedState::empty(schema_version)
        }
    }
}

pub struct ConditionalFetcher<C: HttpClient, S: CacheStore> {
    client:     C,
    store:      S,
    options:    FetchOptions,
    normalizer: Normalizer,
}

impl<C: HttpClient, S: CacheStore> ConditionalFetcher<C, S> {
    pub fn new(client: C, store: S, options: FetchOptions) -> Self {
        let normalizer = Normalizer::new(options.normalize.clone());
        Self {
            client,
            store,
            options,
            normalizer,
        }
    }

    pub fn store(&self) -> &S { &self.store }

    /// Read and refresh in one go.
    pub async fn refresh(&self) -> Refresh {
        let state = self.init();
        self.revalidate(state).await
    }

    /// Load the cached state to display before the network answers.
    pub fn init(&self) -> CachedState { load_cached(&self.store, self.options.schema_version) }

    /// Issue the single request of this refresh against `state`.
    pub async fn revalidate(&self, state: CachedState) -> Refresh {
        match self.exchange(&state).await {
            Ok(None) => {
                debug!(url = %self.options.url, "release not modified");
                Refresh {
                    state,
                    outcome: Outcome::Unchanged,
                }
            }
            Ok(Some(fresh)) => {
                match self.store.write(&fresh) {
                    Ok(()) => info!(
                        release = fresh.release.as_ref().map(Release::name),
                        "cached new release"
                    ),
                    Err(e) => warn!(error = %e, "failed to persist release cache"),
                }
                Refresh {
                    state:   fresh,
                    outcome: Outcome::Changed,
                }
            }
            Err(e) => {
                warn!(url = %self.options.url, error = %e, "release refresh failed, keeping cached copy");
                Refresh {
                    state,
                    outcome: Outcome::Failed(e),
                }
            }
        }
    }

    /// `Ok(None)` means not modified.
    async fn exchange(&self, state: &CachedState) -> Result<Option<CachedState>> {
        let mut headers = vec![("Accept".to_string(), GITHUB_ACCEPT.to_string())];
        if let Some(token) = &state.revalidation_token {
            headers.push(("If-None-Match".to_string(), token.clone()));
        }

        let response = tokio::time::timeout(
            self.options.timeout,
            self.client.get(&self.options.url, &headers),
        )
        .await
        .map_err(|_| FetchError::Timeout(self.options.timeout))?
        .map_err(|e| FetchError::Transport(e.to_string()))?;

        match response.status {
            304 => Ok(None),
            200 => {
                let raw = RawRelease::from_json(&response.body)?;
                let release = self.normalizer.normalize(&raw)?;
                Ok(Some(CachedState {
                    schema_version:     self.options.schema_version,
                    release:            Some(release),
                    revalidation_token: response.header("etag").map(str::to_string),
                }))
            }
            status => Err(FetchError::Status {
                status,
                url: self.options.url.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpResponse;
    use crate::store::MemoryStore;

    /// Client that must never be called.
    struct Unreachable;

    #[derive(Debug)]
    struct MockError(String);

    impl std::fmt::Display for MockError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
    }

    impl std::error::Error for MockError {}

    impl HttpClient for Unreachable {
        type Error = MockError;

        async fn get(
            &self,
            _url: &str,
            _headers: &[(String, String)],
        ) -> std::result::Result<HttpResponse, Self::Error> {
            Err(MockError("unexpected request".to_string()))
        }
    }

    fn fetcher(store: MemoryStore, version: u32) -> ConditionalFetcher<Unreachable, MemoryStore> {
        let options = FetchOptions::new("http://localhost/releases/latest").schema_version(version);
        ConditionalFetcher::new(Unreachable, store, options)
    }

    #[test]
    fn test_init_empty_store() {
        let f = fetcher(MemoryStore::new(), 3);
        assert_eq!(f.init(), CachedState::empty(3));
    }

    #[test]
    fn test_init_current_version_kept() {
        let mut state = CachedState::empty(2);
        state.revalidation_token = Some("\"t\"".to_string());
        let f = fetcher(MemoryStore::with_state(state.clone()), 2);
        assert_eq!(f.init(), state);
    }

    #[test]
    fn test_init_stale_version_discarded() {
        let mut state = CachedState::empty(1);
        state.revalidation_token = Some("\"t\"".to_string());
        let f = fetcher(MemoryStore::with_state(state), 2);

        // the token must not survive, or the next request could get a 304
        // for a release that is no longer cached
        assert_eq!(f.init(), CachedState::empty(2));
    }

    #[test]
    fn test_init_newer_version_discarded() {
        let f = fetcher(MemoryStore::with_state(CachedState::empty(5)), 2);
        assert_eq!(f.init(), CachedState::empty(2));
    }

    #[tokio::test]
    async fn test_transport_failure_keeps_state() {
        let mut state = CachedState::empty(1);
        state.revalidation_token = Some("\"t\"".to_string());
        let store = MemoryStore::with_state(state.clone());
        let f = fetcher(store, 1);

        let refresh = f.refresh().await;
        assert!(matches!(refresh.outcome, Outcome::Failed(FetchError::Transport(_))));
        assert_eq!(refresh.state, state);
        assert_eq!(f.store().snapshot(), Some(state));
    }
}
