//! Atomic placement of small files.
//!
//! Snapshots and cache records are replaced as a whole: content is written to
//! a sibling temporary file and renamed over the destination, so a reader
//! never observes a half-written record.

mod error;

pub use error::{Error, Result};

use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Mode of placed files unless [`AtomicWriteOptions::permissions`] says otherwise.
#[cfg(unix)]
pub const DEFAULT_MODE: u32 = 0o644;

#[derive(Clone, Copy, Debug, Default)]
pub struct AtomicWriteOptions {
    permissions:   Option<u32>,
    sync:          bool,
    create_parent: bool,
}

impl AtomicWriteOptions {
    pub fn new() -> Self { Self::default() }

    /// Unix mode of the placed file. Ignored elsewhere.
    pub fn permissions(mut self, mode: u32) -> Self {
        self.permissions = Some(mode);
        self
    }

    /// Flush content to disk before the rename.
    pub fn sync(mut self, sync: bool) -> Self {
        self.sync = sync;
        self
    }

    /// Create missing parent directories before writing.
    pub fn create_parent(mut self, create_parent: bool) -> Self {
        self.create_parent = create_parent;
        self
    }
}

/// Stage `content` in a uniquely named sibling of `dest`. The staging file
/// is deleted when dropped unpersisted.
fn stage(
    dest: &Path,
    dir: &Path,
    content: &[u8],
    options: &AtomicWriteOptions,
) -> io::Result<NamedTempFile> {
    let name = dest.file_name().unwrap_or_default().to_string_lossy();
    let mut staged = tempfile::Builder::new()
        .prefix(&format!(".{}.", name))
        .suffix(".tmp")
        .tempfile_in(dir)?;
    staged.write_all(content)?;

    // staging files are created 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = options.permissions.unwrap_or(DEFAULT_MODE);
        staged
            .as_file()
            .set_permissions(fs::Permissions::from_mode(mode))?;
    }

    if options.sync {
        staged.as_file().sync_all()?;
    }
    Ok(staged)
}

/// Replace `path` with `content` in one step. Concurrent writers to the same
/// path never share a staging file; the last rename wins.
pub fn atomic_write(
    path: impl AsRef<Path>,
    content: &[u8],
    options: AtomicWriteOptions,
) -> Result<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    if options.create_parent {
        fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let staged = stage(path, dir, content, &options).map_err(|source| Error::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    staged.persist(path).map_err(|e| Error::Write {
        path:   path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}

pub fn atomic_read(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    let path = path.as_ref();
    fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Like [`atomic_read`], but a missing file is `Ok(None)`.
pub fn read_if_exists(path: impl AsRef<Path>) -> Result<Option<Vec<u8>>> {
    match atomic_read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(Error::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Like [`read_if_exists`], but stops after `limit + 1` bytes. A result
/// longer than `limit` means the file exceeds it.
pub fn read_capped(path: impl AsRef<Path>, limit: usize) -> Result<Option<Vec<u8>>> {
    let path = path.as_ref();
    let read_err = |source| Error::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(read_err(e)),
    };
    let mut bytes = Vec::new();
    file.take(limit as u64 + 1)
        .read_to_end(&mut bytes)
        .map_err(read_err)?;
    Ok(Some(bytes))
}
