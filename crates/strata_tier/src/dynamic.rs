// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Dynamic store wrapper for type erasure.

use std::{any::Any, fmt::Debug, fmt::Display, sync::Arc};

use crate::{Error, Store, tier::DynStore};

/// Extension trait for converting any `Store` into a `DynamicStore`.
///
/// This trait is automatically implemented for all types that implement `Store`
/// and `Display`.
///
/// # Examples
///
/// ```
/// use strata_tier::{DynamicStore, DynamicStoreExt, Store};
///
/// fn erase<T>(store: T) -> DynamicStore<String, String>
/// where
///     T: Store<String, String> + std::fmt::Display + 'static,
/// {
///     store.into_dynamic()
/// }
/// ```
pub trait DynamicStoreExt<K, V>: Sized {
    /// Converts this store into a `DynamicStore`.
    fn into_dynamic(self) -> DynamicStore<K, V>;
}

impl<K, V, T> DynamicStoreExt<K, V> for T
where
    K: 'static,
    V: 'static,
    T: Store<K, V> + Display + 'static,
{
    fn into_dynamic(self) -> DynamicStore<K, V> {
        DynamicStore::new(self)
    }
}

/// A clonable, type-erased store handle.
///
/// `DynamicStore` wraps a trait object in an `Arc`, so clones share the same
/// underlying store. This is how a single store is shared between several
/// chains and direct callers: every clone reads and writes the same backing
/// resource.
///
/// The store's identity (its `Display` output) is captured on construction and
/// reported by this handle's own `Display` implementation.
pub struct DynamicStore<K, V> {
    inner: Arc<DynStore<'static, K, V>>,
    name: Arc<str>,
}

impl<K: 'static, V: 'static> DynamicStore<K, V> {
    /// Creates a new dynamic store from any `Store` implementation.
    ///
    /// Wrapping a `DynamicStore` again returns a clone of the same handle.
    pub(crate) fn new<T>(store: T) -> Self
    where
        T: Store<K, V> + Display + 'static,
    {
        if let Some(dynamic) = (&store as &dyn Any).downcast_ref::<Self>() {
            return dynamic.clone();
        }

        let name = Arc::from(store.to_string());
        Self {
            inner: DynStore::new_arc(store),
            name,
        }
    }
}

impl<K, V> DynamicStore<K, V> {
    /// Returns the identity of the wrapped store.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if both handles share the same underlying store.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<K, V> Debug for DynamicStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DynamicStore").field("name", &self.name).finish()
    }
}

impl<K, V> Display for DynamicStore<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl<K, V> Clone for DynamicStore<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            name: Arc::clone(&self.name),
        }
    }
}

impl<K, V> Store<K, V> for DynamicStore<K, V>
where
    K: Sync,
    V: Send,
{
    async fn get(&self, key: &K) -> Result<Option<V>, Error> {
        self.inner.get(key).await
    }

    async fn put(&self, key: &K, value: V) -> Result<(), Error> {
        self.inner.put(key, value).await
    }

    async fn remove(&self, key: &K) -> Result<(), Error> {
        self.inner.remove(key).await
    }
}
