// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Verbose hook shared by the store implementations.

use std::fmt::{Debug, Display};

/// What a store did in response to a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum StoreActivity {
    /// A `get` found the key.
    Hit,
    /// A `get` did not find the key.
    Miss,
    /// A `put` wrote the key.
    Put,
    /// A `remove` was issued for the key.
    Remove,
    /// The store finished construction.
    Initialized,
}

impl StoreActivity {
    /// Returns the value recorded in the `store.activity` field.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "store.hit",
            Self::Miss => "store.miss",
            Self::Put => "store.put",
            Self::Remove => "store.remove",
            Self::Initialized => "store.initialized",
        }
    }
}

/// Emits one structured `tracing` event per store operation when enabled.
///
/// Each event carries `store.name` (the store's `Display` identity),
/// `store.key` and `store.activity`. Hits and misses are logged at debug
/// level; writes, removals and initialization at info level. A disabled hook
/// emits nothing.
///
/// # Examples
///
/// ```
/// use strata_tier::{StoreActivity, StoreEvents};
///
/// let events = StoreEvents::new(true);
/// events.record(&"MapStore()", &"user:1", StoreActivity::Put);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvents {
    enabled: bool,
}

impl Default for StoreEvents {
    fn default() -> Self {
        Self::new(true)
    }
}

impl StoreEvents {
    /// Creates a hook that records events when `verbose` is true.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { enabled: verbose }
    }

    /// Returns `true` if this hook emits events.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        self.enabled
    }

    /// Records `activity` performed by `store` for `key`.
    ///
    /// For [`StoreActivity::Initialized`] pass the store's location as `key`.
    pub fn record(self, store: &dyn Display, key: &dyn Debug, activity: StoreActivity) {
        if !self.enabled {
            return;
        }

        let act = activity.as_str();
        match activity {
            StoreActivity::Hit => {
                tracing::debug!(store.name = %store, store.key = ?key, store.activity = act, "{key:?} was found in {store}");
            }
            StoreActivity::Miss => {
                tracing::debug!(store.name = %store, store.key = ?key, store.activity = act, "{key:?} was not found in {store}");
            }
            StoreActivity::Put => {
                tracing::info!(store.name = %store, store.key = ?key, store.activity = act, "putting {key:?} to {store}");
            }
            StoreActivity::Remove => {
                tracing::info!(store.name = %store, store.key = ?key, store.activity = act, "removing {key:?} from {store}");
            }
            StoreActivity::Initialized => {
                tracing::info!(store.name = %store, store.key = ?key, store.activity = act, "{store} initialized at {key:?}");
            }
        }
    }

    /// Records a hit or a miss depending on whether `get` found a value.
    pub fn record_lookup(self, store: &dyn Display, key: &dyn Debug, found: bool) {
        let activity = if found { StoreActivity::Hit } else { StoreActivity::Miss };
        self.record(store, key, activity);
    }
}
