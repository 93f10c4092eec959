// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The ordered multi-tier chain of stores.

use std::fmt;

use strata_tier::{DynamicStore, DynamicStoreExt, Error, Store};

use crate::{
    builder::ChainBuilder,
    telemetry::{
        ChainActivity, ChainOperation, ChainTelemetry,
        ext::{ChainTelemetryExt, ClockExt},
    },
};

/// Type alias for chain names used in telemetry.
pub type ChainName = &'static str;

pub(crate) const DEFAULT_NAME: ChainName = "chain";

/// An ordered sequence of stores that behaves as a single store.
///
/// Position 0 is the nearest (fastest) tier and the last position is the
/// farthest (authoritative) tier. The chain holds shared handles: a store
/// placed in a chain can still be used directly or placed in other chains.
///
/// - `get` scans nearest-first and returns the first hit. Every tier nearer
///   than the hit is then populated with the value, so the next lookup
///   resolves at tier 0.
/// - `put` and `remove` run farthest-first. The first failure aborts the
///   operation: farther tiers keep the change, nearer tiers are not touched.
///
/// `Chain` implements [`Store`], so a chain can be a tier of another chain,
/// and [`StoreExt::get_or_create`](strata_tier::StoreExt::get_or_create)
/// populates every tier on a miss.
///
/// # Examples
///
/// ```
/// use strata::{Chain, DynamicStoreExt, MapStore, Store};
/// # futures::executor::block_on(async {
///
/// let near = MapStore::<String, String>::new();
/// let far = MapStore::<String, String>::new();
/// let chain = Chain::new([near.clone().into_dynamic(), far.clone().into_dynamic()]);
///
/// far.put(&"k".to_string(), "v".to_string()).await?;
/// assert_eq!(chain.get(&"k".to_string()).await?, Some("v".to_string()));
///
/// // The miss in the nearer tier was backfilled.
/// assert_eq!(near.get(&"k".to_string()).await?, Some("v".to_string()));
/// # Ok::<(), strata::Error>(())
/// # });
/// ```
pub struct Chain<K, V> {
    pub(crate) name: ChainName,
    pub(crate) tiers: Vec<DynamicStore<K, V>>,
    pub(crate) telemetry: Option<ChainTelemetry>,
}

impl Chain<(), ()> {
    /// Creates a new chain builder.
    #[must_use]
    pub fn builder<K, V>() -> ChainBuilder<K, V> {
        ChainBuilder::new()
    }
}

impl<K, V> Chain<K, V> {
    /// Creates a chain from stores ordered nearest-first.
    ///
    /// An empty chain is valid: every lookup misses and every write is a no-op.
    pub fn new<I, S>(tiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: DynamicStoreExt<K, V>,
    {
        Self {
            name: DEFAULT_NAME,
            tiers: tiers.into_iter().map(DynamicStoreExt::into_dynamic).collect(),
            telemetry: None,
        }
    }

    /// Returns the name of this chain for telemetry identification.
    #[must_use]
    pub fn name(&self) -> ChainName {
        self.name
    }

    /// Returns the tiers, nearest first.
    #[must_use]
    pub fn tiers(&self) -> &[DynamicStore<K, V>] {
        &self.tiers
    }

    /// Returns the number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Returns `true` if the chain has no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    fn record(&self, operation: ChainOperation, activity: ChainActivity, tier: usize) {
        self.telemetry.record(self.name, operation, activity, Some(tier), None);
    }

    async fn timed<R>(&self, operation: ChainOperation, f: impl Future<Output = Result<R, Error>>) -> Result<R, Error> {
        let Some(telemetry) = &self.telemetry else {
            return f.await;
        };

        let timed = telemetry.clock().timed_async(f).await;
        if timed.result.is_ok() {
            self.telemetry
                .record(self.name, operation, ChainActivity::Ok, None, Some(timed.duration));
        }
        timed.result
    }
}

impl<K, V> Chain<K, V>
where
    K: Sync,
    V: Clone + Send,
{
    async fn lookup(&self, key: &K) -> Result<Option<V>, Error> {
        for (hit, tier) in self.tiers.iter().enumerate() {
            let found = tier
                .get(key)
                .await
                .inspect_err(|_| self.record(ChainOperation::Get, ChainActivity::Error, hit))?;

            let Some(value) = found else {
                self.record(ChainOperation::Get, ChainActivity::Miss, hit);
                continue;
            };
            self.record(ChainOperation::Get, ChainActivity::Hit, hit);

            for (index, nearer) in self.tiers[..hit].iter().enumerate() {
                nearer
                    .put(key, value.clone())
                    .await
                    .inspect_err(|_| self.record(ChainOperation::Get, ChainActivity::Error, index))?;
                self.record(ChainOperation::Get, ChainActivity::Backfill, index);
            }

            return Ok(Some(value));
        }

        Ok(None)
    }

    async fn store(&self, key: &K, value: V) -> Result<(), Error> {
        let Some((nearest, farther)) = self.tiers.split_first() else {
            return Ok(());
        };

        for (offset, tier) in farther.iter().enumerate().rev() {
            tier.put(key, value.clone())
                .await
                .inspect_err(|_| self.record(ChainOperation::Put, ChainActivity::Error, offset + 1))?;
        }

        nearest
            .put(key, value)
            .await
            .inspect_err(|_| self.record(ChainOperation::Put, ChainActivity::Error, 0))
    }

    async fn evict(&self, key: &K) -> Result<(), Error> {
        for (index, tier) in self.tiers.iter().enumerate().rev() {
            tier.remove(key)
                .await
                .inspect_err(|_| self.record(ChainOperation::Remove, ChainActivity::Error, index))?;
        }
        Ok(())
    }
}

impl<K, V> Store<K, V> for Chain<K, V>
where
    K: Sync,
    V: Clone + Send,
{
    async fn get(&self, key: &K) -> Result<Option<V>, Error> {
        self.timed(ChainOperation::Get, self.lookup(key)).await
    }

    async fn put(&self, key: &K, value: V) -> Result<(), Error> {
        self.timed(ChainOperation::Put, self.store(key, value)).await
    }

    async fn remove(&self, key: &K) -> Result<(), Error> {
        self.timed(ChainOperation::Remove, self.evict(key)).await
    }
}

impl<K, V> Clone for Chain<K, V> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            tiers: self.tiers.clone(),
            telemetry: self.telemetry.clone(),
        }
    }
}

impl<K, V> fmt::Debug for Chain<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("tiers", &self.tiers)
            .field("telemetry", &self.telemetry.is_some())
            .finish()
    }
}

impl<K, V> fmt::Display for Chain<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Chain([")?;
        for (index, tier) in self.tiers.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(tier, f)?;
        }
        f.write_str("])")
    }
}
