// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Layered key/value caching over interchangeable stores.
//!
//! This crate composes stores into an ordered [`Chain`]:
//! - Nearest-first lookups that backfill every faster tier that missed
//! - Farthest-first writes and removals that stop at the first failure
//! - Chains that nest, since a chain is itself a [`Store`]
//! - Optional OpenTelemetry metrics and structured logging
//!
//! The stores themselves live in sibling crates and are re-exported here
//! behind features: [`MapStore`] (`memory`, on by default), `FileStore`
//! (`fs`) and `RemoteStore` (`object`, with an Amazon S3 client under `aws`).
//!
//! # Examples
//!
//! ## Two-tier chain
//!
//! ```
//! use strata::{Chain, MapStore, Store, StoreExt};
//! # futures::executor::block_on(async {
//!
//! let chain = Chain::builder::<String, String>()
//!     .tier(MapStore::new())
//!     .tier(MapStore::new())
//!     .build();
//!
//! let value = chain.get_or_create(&"user:1".to_string(), |k| format!("profile of {k}")).await?;
//! assert_eq!(value, "profile of user:1");
//!
//! // Every tier was populated.
//! for tier in chain.tiers() {
//!     assert_eq!(tier.get(&"user:1".to_string()).await?, Some(value.clone()));
//! }
//! # Ok::<(), strata::Error>(())
//! # });
//! ```
//!
//! ## Nested chains
//!
//! ```
//! use strata::{Chain, MapStore, Store};
//! # futures::executor::block_on(async {
//!
//! let inner = Chain::builder::<String, i32>().tier(MapStore::new()).tier(MapStore::new()).build();
//! let outer = Chain::builder().tier(MapStore::new()).tier(inner).build();
//!
//! outer.put(&"k".to_string(), 1).await?;
//! assert_eq!(outer.to_string(), "Chain([MapStore(), Chain([MapStore(), MapStore()])])");
//! # Ok::<(), strata::Error>(())
//! # });
//! ```
//!
//! # Concurrency
//!
//! Chains add no coordination on top of their stores. Concurrent writers of
//! one key may race, and a backfill may overwrite a newer value written by
//! another caller. Callers that need stronger guarantees must lock externally.

pub mod builder;
pub mod chain;
mod telemetry;

#[doc(inline)]
pub use builder::ChainBuilder;
#[doc(inline)]
pub use chain::{Chain, ChainName};
#[cfg(feature = "fs")]
#[doc(inline)]
pub use strata_fs::{FileMode, FileStore, FileStoreBuilder};
#[cfg(feature = "memory")]
#[doc(inline)]
pub use strata_memory::{MapStore, MapStoreBuilder};
#[cfg(feature = "object")]
#[doc(inline)]
pub use strata_object::{RemoteStore, RemoteStoreBuilder};
#[doc(inline)]
pub use strata_tier::{
    DecodeFn, DynamicStore, DynamicStoreExt, EncodeFn, Error, ErrorKind, Result, Store, StoreActivity, StoreEvents, StoreExt,
    Transform,
};
#[doc(inline)]
pub use telemetry::{ChainTelemetry, TelemetryConfig};

#[cfg(any(feature = "test-util", test))]
#[doc(inline)]
pub use strata_tier::testing::{LogCapture, MockStore, StoreOp};
