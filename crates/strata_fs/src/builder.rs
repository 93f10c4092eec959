// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::path::PathBuf;

use bytes::Bytes;
use strata_tier::{Error, Result, Transform};

use crate::{FileMode, FileStore};

/// Builder for configuring a [`FileStore`].
///
/// The directory path and the [`FileMode`] are required. Encode and decode
/// functions are optional for raw value types and required otherwise. The
/// verbose hook is on unless turned off.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use strata_fs::{FileMode, FileStore};
/// use strata_tier::Error;
///
/// let dir = tempfile::tempdir().unwrap();
/// let store = FileStore::<u32>::builder(dir.path())
///     .mode(FileMode::Text)
///     .encode(|n| Ok(Bytes::from(n.to_string())))
///     .decode(|raw| std::str::from_utf8(&raw).map_err(Error::transform)?.parse().map_err(Error::transform))
///     .build()?;
///
/// assert_eq!(store.mode(), FileMode::Text);
/// # Ok::<(), Error>(())
/// ```
#[derive(Debug)]
pub struct FileStoreBuilder<V> {
    pub(crate) path: PathBuf,
    pub(crate) mode: Option<FileMode>,
    pub(crate) transform: Transform<V>,
    pub(crate) verbose: bool,
}

impl<V: Send + Sync + 'static> FileStoreBuilder<V> {
    /// Creates a builder for a store rooted at `path`.
    ///
    /// The directory is not created; it must exist before the first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            mode: None,
            transform: Transform::new(),
            verbose: true,
        }
    }

    /// Sets the file mode. Required.
    #[must_use]
    pub fn mode(mut self, mode: FileMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the function applied to values before they are written.
    #[must_use]
    pub fn encode<F>(mut self, encode: F) -> Self
    where
        F: Fn(V) -> Result<Bytes> + Send + Sync + 'static,
    {
        self.transform = self.transform.with_encode(encode);
        self
    }

    /// Sets the function applied to file contents after they are read.
    #[must_use]
    pub fn decode<F>(mut self, decode: F) -> Self
    where
        F: Fn(Bytes) -> Result<V> + Send + Sync + 'static,
    {
        self.transform = self.transform.with_decode(decode);
        self
    }

    /// Replaces both transform stages at once.
    #[must_use]
    pub fn transform(mut self, transform: Transform<V>) -> Self {
        self.transform = transform;
        self
    }

    /// Enables or disables the per-operation `tracing` events.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Builds the store.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if no mode was set, or if an encode or
    /// decode function is missing for a value type that is not raw bytes or
    /// text.
    pub fn build(self) -> Result<FileStore<V>> {
        let Some(mode) = self.mode else {
            return Err(Error::configuration("a file mode ('text' or 'bytes') is required"));
        };
        self.transform.validate()?;
        Ok(FileStore::new(self.path, mode, self.transform, self.verbose))
    }
}
