// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt;
use std::sync::Arc;

use object_store::{ObjectStore, PutPayload, path::Path};
use strata_tier::{Error, Result, Store, StoreActivity, StoreEvents, Transform};

use crate::RemoteStoreBuilder;

/// A store that keeps one object per key in a remote bucket.
///
/// Clones share the same client.
pub struct RemoteStore<V> {
    bucket: Arc<str>,
    prefix: Arc<str>,
    region: Arc<str>,
    client: Arc<dyn ObjectStore>,
    transform: Transform<V>,
    events: StoreEvents,
}

impl<V> Clone for RemoteStore<V> {
    fn clone(&self) -> Self {
        Self {
            bucket: Arc::clone(&self.bucket),
            prefix: Arc::clone(&self.prefix),
            region: Arc::clone(&self.region),
            client: Arc::clone(&self.client),
            transform: self.transform.clone(),
            events: self.events,
        }
    }
}

impl<V> fmt::Debug for RemoteStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteStore")
            .field("bucket", &self.bucket)
            .field("prefix", &self.prefix)
            .field("region", &self.region)
            .field("client", &self.client)
            .field("transform", &self.transform)
            .field("verbose", &self.events.is_enabled())
            .finish()
    }
}

impl<V> fmt::Display for RemoteStore<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RemoteStore(bucket='{}', prefix='{}', region='{}')",
            self.bucket, self.prefix, self.region
        )
    }
}

impl<V: Send + Sync + 'static> RemoteStore<V> {
    /// Creates a builder for an Amazon S3 backed store.
    #[must_use]
    pub fn s3(bucket: impl Into<String>, prefix: impl Into<String>) -> RemoteStoreBuilder<V> {
        RemoteStoreBuilder::s3(bucket, prefix)
    }

    pub(crate) fn new(
        bucket: String,
        prefix: String,
        region: String,
        client: Arc<dyn ObjectStore>,
        transform: Transform<V>,
        verbose: bool,
    ) -> Self {
        let store = Self {
            bucket: Arc::from(bucket),
            prefix: Arc::from(prefix),
            region: Arc::from(region),
            client,
            transform,
            events: StoreEvents::new(verbose),
        };
        let location = format!("s3://{}/{}", store.bucket, store.prefix);
        store.events.record(&store, &location, StoreActivity::Initialized);
        store
    }
}

impl<V> RemoteStore<V> {
    /// Returns the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Returns the key prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns the configured region.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Returns the object key that holds the value of `key`.
    #[must_use]
    pub fn bucket_key(&self, key: &str) -> String {
        match &*self.prefix {
            "" => key.to_string(),
            prefix if prefix.ends_with('/') => format!("{prefix}{key}"),
            prefix => format!("{prefix}/{key}"),
        }
    }

    fn location(&self, key: &str) -> Path {
        Path::from(self.bucket_key(key))
    }
}

/// Classifies the result of a fetch: "not found" becomes absent.
fn classify_get<T>(result: object_store::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(object_store::Error::NotFound { .. }) => Ok(None),
        Err(e) => Err(Error::backend(e)),
    }
}

/// Classifies the result of a delete: deleting a missing object succeeds.
fn classify_delete(result: object_store::Result<()>) -> Result<()> {
    match result {
        Ok(()) | Err(object_store::Error::NotFound { .. }) => Ok(()),
        Err(e) => Err(Error::backend(e)),
    }
}

impl<K, V> Store<K, V> for RemoteStore<V>
where
    K: AsRef<str> + fmt::Debug + Sync,
    V: Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>> {
        let location = self.location(key.as_ref());

        let Some(object) = classify_get(self.client.get(&location).await)? else {
            self.events.record_lookup(self, key, false);
            return Ok(None);
        };
        self.events.record_lookup(self, key, true);

        // The object can disappear between the request and reading the body.
        let Some(body) = classify_get(object.bytes().await)? else {
            return Ok(None);
        };
        self.transform.decode(body).map(Some)
    }

    async fn put(&self, key: &K, value: V) -> Result<()> {
        let location = self.location(key.as_ref());
        let raw = self.transform.encode(value)?;

        self.events.record(self, key, StoreActivity::Put);
        self.client
            .put(&location, PutPayload::from(raw))
            .await
            .map(|_| ())
            .map_err(Error::backend)
    }

    async fn remove(&self, key: &K) -> Result<()> {
        let location = self.location(key.as_ref());

        self.events.record(self, key, StoreActivity::Remove);
        classify_delete(self.client.delete(&location).await)
    }
}
