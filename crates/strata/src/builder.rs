// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Builder for constructing chains with a name and telemetry.

use strata_tier::{DynamicStore, DynamicStoreExt};

use crate::{
    Chain,
    chain::{ChainName, DEFAULT_NAME},
    telemetry::ChainTelemetry,
};

/// Builder for a [`Chain`].
///
/// Created by calling [`Chain::builder`]. Tiers are appended nearest-first.
///
/// # Examples
///
/// ```
/// use strata::{Chain, MapStore};
///
/// let chain = Chain::builder::<String, String>()
///     .name("sessions")
///     .tier(MapStore::new())
///     .tier(MapStore::new())
///     .build();
///
/// assert_eq!(chain.len(), 2);
/// assert_eq!(chain.name(), "sessions");
/// ```
#[derive(Debug)]
pub struct ChainBuilder<K, V> {
    name: Option<ChainName>,
    tiers: Vec<DynamicStore<K, V>>,
    telemetry: Option<ChainTelemetry>,
}

impl<K, V> ChainBuilder<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            name: None,
            tiers: Vec::new(),
            telemetry: None,
        }
    }

    /// Sets the name reported by chain telemetry.
    ///
    /// Defaults to `"chain"`.
    #[must_use]
    pub fn name(mut self, name: ChainName) -> Self {
        self.name = Some(name);
        self
    }

    /// Appends a tier farther than every tier added so far.
    #[must_use]
    pub fn tier(mut self, store: impl DynamicStoreExt<K, V>) -> Self {
        self.tiers.push(store.into_dynamic());
        self
    }

    /// Appends several tiers, nearest first.
    #[must_use]
    pub fn tiers<I, S>(mut self, stores: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: DynamicStoreExt<K, V>,
    {
        self.tiers.extend(stores.into_iter().map(DynamicStoreExt::into_dynamic));
        self
    }

    /// Attaches telemetry built with [`TelemetryConfig`](crate::TelemetryConfig).
    #[must_use]
    pub fn telemetry(mut self, telemetry: ChainTelemetry) -> Self {
        self.telemetry = Some(telemetry);
        self
    }

    /// Builds the chain.
    #[must_use]
    pub fn build(self) -> Chain<K, V> {
        Chain {
            name: self.name.unwrap_or(DEFAULT_NAME),
            tiers: self.tiers,
            telemetry: self.telemetry,
        }
    }
}
