// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Filesystem store for layered key/value caches.
//!
//! [`FileStore`] keeps one file per key at `<directory>/<key>`, whose contents
//! are the full raw payload. Writes truncate any previous contents. There is no
//! index or metadata file: lookups go straight to the file named by the key.
//!
//! # Quick Start
//!
//! ```no_run
//! use strata_fs::{FileMode, FileStore};
//! use strata_tier::Store;
//!
//! # async fn example() -> strata_tier::Result<()> {
//! let store = FileStore::<Vec<u8>>::builder("/var/cache/thumbnails")
//!     .mode(FileMode::Bytes)
//!     .verbose(false)
//!     .build()?;
//!
//! store.put(&"cat.png", vec![0x89, 0x50, 0x4e, 0x47]).await?;
//! assert!(store.get(&"cat.png").await?.is_some());
//! # Ok(())
//! # }
//! ```
//!
//! # Structured Values
//!
//! Values other than `String`, `Vec<u8>` and `bytes::Bytes` need an encode and a
//! decode function, which the builder checks when the store is built.
//!
//! # Runtime
//!
//! File I/O goes through `tokio::fs`, so store operations must be awaited
//! inside a Tokio runtime.
//!
//! # Keys
//!
//! Keys are joined to the directory as-is. Keys containing path separators or
//! `..` are not validated and may address files outside the directory.

mod builder;
mod mode;
mod store;

#[doc(inline)]
pub use builder::FileStoreBuilder;
#[doc(inline)]
pub use mode::FileMode;
#[doc(inline)]
pub use store::FileStore;
