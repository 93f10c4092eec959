// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! In-process map store backed by moka.
//!
//! This crate provides [`MapStore`], an unbounded concurrent map that
//! implements the [`strata_tier::Store`] contract. Use [`MapStoreBuilder`] to
//! turn the verbose hook off or to pre-size the map.
//!
//! # Quick Start
//!
//! ```
//! use strata_memory::MapStoreBuilder;
//! use strata_tier::Store;
//!
//! # futures::executor::block_on(async {
//! let store = MapStoreBuilder::<String, i32>::new()
//!     .initial_capacity(64)
//!     .verbose(false)
//!     .build();
//!
//! store.put(&"key".to_string(), 42).await?;
//! assert_eq!(store.get(&"key".to_string()).await?, Some(42));
//! # Ok::<(), strata_tier::Error>(())
//! # }).unwrap();
//! ```
//!
//! # Behavior
//!
//! - **Unbounded**: entries are never evicted or expired
//! - **Shared**: clones of a `MapStore` read and write the same map
//! - **Infallible**: operations never return an error

pub mod builder;
pub mod tier;

#[doc(inline)]
pub use builder::MapStoreBuilder;
#[doc(inline)]
pub use tier::MapStore;
