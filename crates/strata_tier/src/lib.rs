// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Core store abstractions for building layered key/value caches.
//!
//! This crate defines the [`Store`] trait that every backing store implements,
//! the [`StoreExt`] extension with get-or-create helpers, the [`Transform`]
//! pipeline used by stores that persist raw bytes, and the [`Error`] type
//! shared by all of them.
//!
//! # Overview
//!
//! A store is a key-to-value mapping with three operations: `get`, `put` and
//! `remove`. Absence is never an error: `get` returns `Ok(None)` for a key that
//! was never written, and `remove` of a missing key succeeds. Stores are then
//! composed into an ordered multi-tier chain by the `strata` crate.
//!
//! # Implementing a Store
//!
//! ```
//! use std::collections::HashMap;
//! use std::sync::RwLock;
//!
//! use strata_tier::{Error, Store};
//!
//! struct SimpleStore<K, V>(RwLock<HashMap<K, V>>);
//!
//! impl<K, V> Store<K, V> for SimpleStore<K, V>
//! where
//!     K: Clone + Eq + std::hash::Hash + Send + Sync,
//!     V: Clone + Send + Sync,
//! {
//!     async fn get(&self, key: &K) -> Result<Option<V>, Error> {
//!         Ok(self.0.read().unwrap().get(key).cloned())
//!     }
//!
//!     async fn put(&self, key: &K, value: V) -> Result<(), Error> {
//!         self.0.write().unwrap().insert(key.clone(), value);
//!         Ok(())
//!     }
//!
//!     async fn remove(&self, key: &K) -> Result<(), Error> {
//!         self.0.write().unwrap().remove(key);
//!         Ok(())
//!     }
//! }
//! ```
//!
//! # Concurrency
//!
//! Stores provide no coordination between callers. Two tasks writing the same
//! key may race, and two tasks missing the same key in
//! [`StoreExt::get_or_create`] will both run their generator. Callers that need
//! stronger guarantees must lock externally.
//!
//! # Dynamic Dispatch
//!
//! Enable the `dynamic-store` feature for [`DynamicStore`], which wraps any
//! `Store` in a cloneable, type-erased handle. Chains use it to hold
//! heterogeneous tiers.

mod events;
pub mod error;
mod ext;
#[cfg(any(feature = "test-util", test))]
pub mod testing;
pub(crate) mod tier;
pub mod transform;

#[cfg(any(test, feature = "dynamic-store"))]
mod dynamic;

#[cfg(any(test, feature = "dynamic-store"))]
#[doc(inline)]
pub use dynamic::{DynamicStore, DynamicStoreExt};
#[doc(inline)]
pub use error::{Error, ErrorKind, Result};
#[doc(inline)]
pub use events::{StoreActivity, StoreEvents};
#[doc(inline)]
pub use ext::StoreExt;
#[doc(inline)]
pub use tier::Store;
#[doc(inline)]
pub use transform::{DecodeFn, EncodeFn, Transform};
