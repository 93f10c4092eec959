// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Chain telemetry integration with OpenTelemetry.
//!
//! This module records chain operations as structured `tracing` logs (feature
//! `logs`) and OpenTelemetry metrics (feature `metrics`). Without either
//! feature, recording compiles down to nothing.

#[cfg(any(feature = "logs", test))]
use opentelemetry::logs::Severity;

pub(crate) mod attributes;
#[cfg(any(feature = "logs", feature = "metrics", test))]
pub(crate) mod chain;
pub(crate) mod config;
pub(crate) mod ext;
#[cfg(any(feature = "metrics", test))]
pub(crate) mod metrics;
#[cfg(test)]
pub(crate) mod testing;

pub use config::TelemetryConfig;

#[cfg(any(feature = "logs", feature = "metrics", test))]
use thread_aware::{Arc, PerCore};
use tick::Clock;

#[cfg(any(feature = "logs", feature = "metrics", test))]
use chain::ChainTelemetryInner;

/// Chain telemetry provider for OpenTelemetry integration.
///
/// Build it with [`TelemetryConfig::build`] and hand it to
/// [`ChainBuilder::telemetry`](crate::ChainBuilder::telemetry).
#[derive(Clone, Debug)]
pub struct ChainTelemetry {
    clock: Clock,
    #[cfg(any(feature = "logs", feature = "metrics", test))]
    inner: Arc<ChainTelemetryInner, PerCore>,
}

impl ChainTelemetry {
    /// Returns the clock used to time chain operations.
    #[must_use]
    pub fn clock(&self) -> &Clock {
        &self.clock
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainOperation {
    Get,
    Put,
    Remove,
}

impl ChainOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "chain.get",
            Self::Put => "chain.put",
            Self::Remove => "chain.remove",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ChainActivity {
    Hit,
    Miss,
    Backfill,
    Ok,
    Error,
}

impl ChainActivity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "chain.hit",
            Self::Miss => "chain.miss",
            Self::Backfill => "chain.backfill",
            Self::Ok => "chain.ok",
            Self::Error => "chain.error",
        }
    }

    #[cfg(any(feature = "logs", test))]
    pub fn severity(self) -> Severity {
        match self {
            Self::Hit | Self::Miss | Self::Ok => Severity::Debug,
            Self::Backfill => Severity::Info,
            Self::Error => Severity::Error,
        }
    }
}
