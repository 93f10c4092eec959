// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Attribute keys shared by chain metrics and log events.

// Metric dimensions.
#[cfg(any(feature = "metrics", test))]
pub(crate) const CHAIN_NAME: &str = "chain.name";
#[cfg(any(feature = "metrics", test))]
pub(crate) const CHAIN_OPERATION_NAME: &str = "chain.operation";
#[cfg(any(feature = "metrics", test))]
pub(crate) const CHAIN_ACTIVITY_NAME: &str = "chain.activity";

// Log-only fields; the event macro spells these out literally.
#[cfg(test)]
pub(crate) const CHAIN_EVENT_NAME: &str = "chain.event";
#[cfg(test)]
pub(crate) const CHAIN_TIER_NAME: &str = "chain.tier";
#[cfg(test)]
pub(crate) const CHAIN_DURATION_NAME: &str = "chain.duration_ns";
