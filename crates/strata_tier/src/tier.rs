// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The core trait for backing stores.
//!
//! [`Store`] defines the interface that all stores must implement. A chain of
//! stores implements it as well, so chains nest.

use std::sync::Arc;

use crate::Error;

/// Trait for key/value store implementations.
///
/// All three methods are required:
/// - `get` returns `Ok(None)` when the key is absent. Absence is never an error.
/// - `put` overwrites unconditionally.
/// - `remove` succeeds when the key is absent.
///
/// Failures of the backing resource (I/O, network, service errors) are
/// returned as [`Error`] and are never retried or recovered by the store.
#[cfg_attr(
    any(test, feature = "dynamic-store"),
    dynosaur::dynosaur(pub(crate) DynStore = dyn(box) Store, bridge(none))
)]
pub trait Store<K, V>: Send + Sync {
    /// Gets the value stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &K) -> impl Future<Output = Result<Option<V>, Error>> + Send;

    /// Stores `value` under `key`, replacing any previous value.
    fn put(&self, key: &K, value: V) -> impl Future<Output = Result<(), Error>> + Send;

    /// Removes `key` if present.
    fn remove(&self, key: &K) -> impl Future<Output = Result<(), Error>> + Send;
}

impl<K, V, S> Store<K, V> for Arc<S>
where
    S: Store<K, V> + ?Sized,
{
    fn get(&self, key: &K) -> impl Future<Output = Result<Option<V>, Error>> + Send {
        (**self).get(key)
    }

    fn put(&self, key: &K, value: V) -> impl Future<Output = Result<(), Error>> + Send {
        (**self).put(key, value)
    }

    fn remove(&self, key: &K) -> impl Future<Output = Result<(), Error>> + Send {
        (**self).remove(key)
    }
}
