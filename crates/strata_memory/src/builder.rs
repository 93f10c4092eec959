// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for configuring map stores.

use std::hash::Hash;
use std::marker::PhantomData;

use crate::tier::MapStore;

/// Builder for configuring a [`MapStore`].
///
/// The map is always unbounded; the builder only exposes options that do not
/// change what the store holds.
///
/// # Examples
///
/// ```
/// use strata_memory::MapStore;
///
/// let store = MapStore::<String, i32>::builder()
///     .initial_capacity(100)
///     .verbose(false)
///     .build();
/// ```
#[derive(Debug)]
pub struct MapStoreBuilder<K, V> {
    pub(crate) initial_capacity: Option<usize>,
    pub(crate) verbose: bool,
    _phantom: PhantomData<(K, V)>,
}

impl<K, V> Default for MapStoreBuilder<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MapStoreBuilder<K, V> {
    /// Creates a new builder with default settings.
    ///
    /// The default configuration creates an empty map with the verbose hook
    /// enabled.
    #[must_use]
    pub fn new() -> Self {
        Self {
            initial_capacity: None,
            verbose: true,
            _phantom: PhantomData,
        }
    }

    /// Sets the number of entries to pre-allocate room for.
    ///
    /// This is only a hint; the map still grows without bound.
    #[must_use]
    pub fn initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = Some(capacity);
        self
    }

    /// Enables or disables the per-operation `tracing` events.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

impl<K, V> MapStoreBuilder<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Builds the configured [`MapStore`].
    #[must_use]
    pub fn build(self) -> MapStore<K, V> {
        MapStore::from_builder(&self)
    }
}
