// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use ohno::EnrichableExt;
use strata_tier::{Error, Result, Store, StoreActivity, StoreEvents, Transform};

use crate::{FileMode, FileStoreBuilder};

/// A store that keeps one file per key inside a directory.
///
/// Clones share the same configuration and write to the same directory.
///
/// # Examples
///
/// ```
/// use strata_fs::{FileMode, FileStore};
/// use strata_tier::Store;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> strata_tier::Result<()> {
/// let dir = tempfile::tempdir().unwrap();
/// let store = FileStore::<String>::builder(dir.path()).mode(FileMode::Text).build()?;
///
/// store.put(&"greeting", "hello".to_string()).await?;
/// assert_eq!(store.get(&"greeting").await?, Some("hello".to_string()));
/// assert_eq!(std::fs::read_to_string(store.filename("greeting")).unwrap(), "hello");
/// # Ok(())
/// # }
/// ```
pub struct FileStore<V> {
    path: Arc<Path>,
    mode: FileMode,
    transform: Transform<V>,
    events: StoreEvents,
}

impl<V> Clone for FileStore<V> {
    fn clone(&self) -> Self {
        Self {
            path: Arc::clone(&self.path),
            mode: self.mode,
            transform: self.transform.clone(),
            events: self.events,
        }
    }
}

impl<V> fmt::Debug for FileStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileStore")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .field("transform", &self.transform)
            .field("verbose", &self.events.is_enabled())
            .finish()
    }
}

impl<V> fmt::Display for FileStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileStore(path='{}', mode='{}')", self.path.display(), self.mode)
    }
}

impl<V: Send + Sync + 'static> FileStore<V> {
    /// Creates a builder for a store rooted at `path`.
    #[must_use]
    pub fn builder(path: impl Into<PathBuf>) -> FileStoreBuilder<V> {
        FileStoreBuilder::new(path)
    }

    pub(crate) fn new(path: PathBuf, mode: FileMode, transform: Transform<V>, verbose: bool) -> Self {
        let store = Self {
            path: Arc::from(path),
            mode,
            transform,
            events: StoreEvents::new(verbose),
        };
        store.events.record(&store, &store.path, StoreActivity::Initialized);
        store
    }
}

impl<V> FileStore<V> {
    /// Returns the directory this store writes to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the configured file mode.
    #[must_use]
    pub fn mode(&self) -> FileMode {
        self.mode
    }

    /// Returns the file that holds the value of `key`.
    #[must_use]
    pub fn filename(&self, key: &str) -> PathBuf {
        self.path.join(key)
    }

    fn check_text(&self, raw: &Bytes, filename: &Path) -> Result<()> {
        if self.mode == FileMode::Text
            && let Err(e) = std::str::from_utf8(raw)
        {
            return Err(Error::transform(format!(
                "text mode payload for {} is not valid UTF-8: {e}",
                filename.display()
            )));
        }
        Ok(())
    }
}

fn io_error(action: &str, filename: &Path, e: io::Error) -> Error {
    Error::backend(e).enrich(format!("failed to {action} {}", filename.display()))
}

// A path under a regular file fails with NotADirectory; both mean no file.
fn is_absent(e: &io::Error) -> bool {
    matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory)
}

async fn is_file(filename: &Path) -> Result<bool> {
    match tokio::fs::metadata(filename).await {
        Ok(metadata) => Ok(metadata.is_file()),
        Err(e) if is_absent(&e) => Ok(false),
        Err(e) => Err(io_error("inspect", filename, e)),
    }
}

impl<K, V> Store<K, V> for FileStore<V>
where
    K: AsRef<str> + fmt::Debug + Sync,
    V: Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>> {
        let filename = self.filename(key.as_ref());

        let found = is_file(&filename).await?;
        self.events.record_lookup(self, key, found);
        if !found {
            return Ok(None);
        }

        let raw = match tokio::fs::read(&filename).await {
            Ok(raw) => Bytes::from(raw),
            // Removed between the existence check and the read.
            Err(e) if is_absent(&e) => return Ok(None),
            Err(e) => return Err(io_error("read", &filename, e)),
        };
        self.check_text(&raw, &filename)?;
        self.transform.decode(raw).map(Some)
    }

    async fn put(&self, key: &K, value: V) -> Result<()> {
        let filename = self.filename(key.as_ref());
        let raw = self.transform.encode(value)?;
        self.check_text(&raw, &filename)?;

        self.events.record(self, key, StoreActivity::Put);
        tokio::fs::write(&filename, &raw)
            .await
            .map_err(|e| io_error("write", &filename, e))
    }

    async fn remove(&self, key: &K) -> Result<()> {
        let filename = self.filename(key.as_ref());

        self.events.record(self, key, StoreActivity::Remove);
        if !is_file(&filename).await? {
            return Ok(());
        }

        match tokio::fs::remove_file(&filename).await {
            Err(e) if !is_absent(&e) => Err(io_error("remove", &filename, e)),
            _ => Ok(()),
        }
    }
}
