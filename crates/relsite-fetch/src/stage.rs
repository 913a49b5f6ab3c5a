//! Staging of the release snapshot consumed by the static build.

use std::path::Path;

use relsite_fs::{AtomicWriteOptions, atomic_write};
use relsite_release::RawRelease;
use tracing::info;

use crate::error::{FetchError, Result};
use crate::http::{GITHUB_ACCEPT, HttpClient};

/// Fetch the release at `url` unconditionally and store the body verbatim
/// at `dest`. Returns the number of bytes written.
///
/// The body must parse as a release record; publishability is left to the
/// build, which reports it with full context.
pub async fn stage_snapshot<C: HttpClient>(client: &C, url: &str, dest: &Path) -> Result<usize> {
    let headers = [("Accept".to_string(), GITHUB_ACCEPT.to_string())];
    let response = client
        .get(url, &headers)
        .await
        .map_err(|e| FetchError::Transport(e.to_string()))?;

    if response.status != 200 {
        return Err(FetchError::Status {
            status: response.status,
            url:    url.to_string(),
        });
    }

    RawRelease::from_json(&response.body)?;

    atomic_write(dest, &response.body, AtomicWriteOptions::new().create_parent(true))?;
    info!(path = %dest.display(), bytes = response.body.len(), "staged release snapshot");

    Ok(response.body.len())
}
