//! Directory-backed entry storage.
//!
//! Lookups read `<root>/<digest>.<ext>` and never fail: a missing, unreadable
//! or unparsable file is a miss. Stores write to a temp file in the same
//! directory and rename it into place, so a reader sees either the previous
//! entry or the new one, never a partial write.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use super::key::CacheKey;
use super::payload::Payload;
use crate::Error;

/// Handle to one cache domain directory.
///
/// Cheap to clone; holds no open file handles and no in-memory state.
#[derive(Clone, Debug)]
pub struct ResultCache {
    root: PathBuf,
}

impl ResultCache {
    /// Create a handle rooted at `root`. The directory is created lazily on first store.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Storage path for `key` holding a payload of type `P`.
    pub fn path_for<P: Payload>(&self, key: &CacheKey) -> PathBuf {
        self.root.join(format!("{}.{}", key.digest(), P::EXTENSION))
    }

    /// Read the entry for `key`, if present and well-formed.
    pub fn lookup<P: Payload>(&self, key: &CacheKey) -> Option<P> {
        let path = self.path_for::<P>(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(%key, "cache miss");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), "unreadable cache entry treated as miss: {e}");
                return None;
            }
        };

        match P::decode(&bytes) {
            Some(payload) => {
                tracing::debug!(%key, "cache hit");
                Some(payload)
            }
            None => {
                tracing::warn!(path = %path.display(), "corrupt cache entry treated as miss");
                None
            }
        }
    }

    /// Write the entry for `key`, replacing any existing one.
    ///
    /// Returns the path of the stored entry.
    ///
    /// # Errors
    ///
    /// Returns `Error::CacheWrite` if the directory cannot be created or the
    /// entry cannot be written and renamed into place, and `Error::Serialize`
    /// if the payload cannot be encoded.
    pub fn store<P: Payload>(&self, key: &CacheKey, payload: &P) -> Result<PathBuf, Error> {
        let path = self.path_for::<P>(key);
        let bytes = payload.encode()?;

        fs::create_dir_all(&self.root).map_err(|source| Error::CacheWrite { path: self.root.clone(), source })?;

        let write_err = |source: io::Error| Error::CacheWrite { path: path.clone(), source };

        let mut tmp = tempfile::Builder::new()
            .prefix(".entry-")
            .suffix(".tmp")
            .tempfile_in(&self.root)
            .map_err(write_err)?;
        tmp.write_all(&bytes).map_err(write_err)?;
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&path).map_err(|e| write_err(e.error))?;

        tracing::debug!(%key, path = %path.display(), bytes = bytes.len(), "cache entry stored");
        Ok(path)
    }

    /// [`lookup`](Self::lookup) on the blocking thread pool.
    pub async fn lookup_async<P>(&self, key: &CacheKey) -> Option<P>
    where
        P: Payload + Send + 'static,
    {
        let cache = self.clone();
        let key = key.clone();
        match tokio::task::spawn_blocking(move || cache.lookup::<P>(&key)).await {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("cache lookup task failed: {e}");
                None
            }
        }
    }

    /// [`store`](Self::store) on the blocking thread pool.
    pub async fn store_async<P>(&self, key: &CacheKey, payload: P) -> Result<PathBuf, Error>
    where
        P: Payload + Send + 'static,
    {
        let cache = self.clone();
        let key = key.clone();
        let path = self.path_for::<P>(&key);
        tokio::task::spawn_blocking(move || cache.store(&key, &payload))
            .await
            .map_err(|e| Error::CacheWrite { path, source: io::Error::other(e) })?
    }
}
