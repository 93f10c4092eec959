// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! In-memory map store implementation using moka.

use std::fmt;
use std::hash::Hash;

use moka::future::Cache;
use strata_tier::{Error, Store, StoreActivity, StoreEvents};
use thread_aware::{Arc, PerProcess, ThreadAware};

use crate::builder::MapStoreBuilder;

/// An unbounded in-process map store backed by moka.
///
/// Keys and values are held in memory without any transform. Clones share the
/// same map: a write through one clone is visible through every other.
///
/// # Examples
///
/// ```
/// use strata_memory::MapStore;
/// use strata_tier::Store;
/// # futures::executor::block_on(async {
///
/// let store = MapStore::<String, i32>::new();
///
/// store.put(&"key".to_string(), 42).await.unwrap();
/// assert_eq!(store.get(&"key".to_string()).await.unwrap(), Some(42));
/// assert_eq!(store.to_string(), "MapStore()");
/// # });
/// ```
#[derive(Debug, Clone, ThreadAware)]
pub struct MapStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    // Moka is shared PerProcess since it handles its own concurrency.
    inner: Arc<Cache<K, V>, PerProcess>,
    #[thread_aware(skip)]
    events: StoreEvents,
}

impl<K, V> Default for MapStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MapStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Creates a new empty map store with the verbose hook enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Creates a new builder for configuring a map store.
    #[must_use]
    pub fn builder() -> MapStoreBuilder<K, V> {
        MapStoreBuilder::new()
    }

    /// Constructs a `MapStore` from a builder.
    pub(crate) fn from_builder(builder: &MapStoreBuilder<K, V>) -> Self {
        let mut moka_builder = Cache::builder();

        if let Some(capacity) = builder.initial_capacity {
            moka_builder = moka_builder.initial_capacity(capacity);
        }

        Self {
            inner: Arc::from_unaware(moka_builder.build()),
            events: StoreEvents::new(builder.verbose),
        }
    }

    /// Returns the approximate number of entries.
    ///
    /// Moka updates this count lazily, so it may briefly lag behind recent
    /// writes.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }
}

impl<K, V> fmt::Display for MapStore<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MapStore()")
    }
}

impl<K, V> Store<K, V> for MapStore<K, V>
where
    K: Clone + Hash + Eq + fmt::Debug + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    async fn get(&self, key: &K) -> Result<Option<V>, Error> {
        let value = self.inner.get(key).await;
        self.events.record_lookup(self, key, value.is_some());
        Ok(value)
    }

    async fn put(&self, key: &K, value: V) -> Result<(), Error> {
        self.events.record(self, key, StoreActivity::Put);
        self.inner.insert(key.clone(), value).await;
        Ok(())
    }

    async fn remove(&self, key: &K) -> Result<(), Error> {
        self.events.record(self, key, StoreActivity::Remove);
        self.inner.invalidate(key).await;
        Ok(())
    }
}
