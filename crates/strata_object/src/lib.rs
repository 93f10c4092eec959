// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Remote object store for layered key/value caches.
//!
//! [`RemoteStore`] keeps one object per key at `<prefix>/<key>` in a bucket and
//! talks to the service through an [`object_store::ObjectStore`] client. The
//! client's "not found" signal is translated to an absent value at this
//! boundary, so callers never see service-specific error types.
//!
//! # Clients
//!
//! - [`RemoteStoreBuilder::s3`] creates an Amazon S3 client from the
//!   environment. This requires the `aws` feature; without it `build` fails
//!   with a configuration error.
//! - [`RemoteStoreBuilder::with_client`] accepts any pre-built client, such as
//!   `object_store::memory::InMemory`.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use object_store::memory::InMemory;
//! use strata_object::RemoteStoreBuilder;
//! use strata_tier::Store;
//!
//! # futures::executor::block_on(async {
//! let store = RemoteStoreBuilder::<String>::with_client("reports", "daily", Arc::new(InMemory::new()))
//!     .verbose(false)
//!     .build()?;
//!
//! store.put(&"2024-01-01", "all good".to_string()).await?;
//! assert_eq!(store.get(&"2024-01-01").await?, Some("all good".to_string()));
//! assert_eq!(store.bucket_key("2024-01-01"), "daily/2024-01-01");
//! # Ok::<(), strata_tier::Error>(())
//! # }).unwrap();
//! ```

mod builder;
mod store;

#[doc(inline)]
pub use builder::{DEFAULT_REGION, RemoteStoreBuilder};
#[doc(inline)]
pub use store::RemoteStore;
