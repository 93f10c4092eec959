// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Extension traits for telemetry recording.

use std::time::Duration;

use tick::Clock;

use crate::{
    chain::ChainName,
    telemetry::{ChainActivity, ChainOperation, ChainTelemetry},
};

/// Result of a timed async operation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TimedResult<R> {
    pub result: R,
    pub duration: Duration,
}

pub(crate) trait ClockExt {
    /// Times an async operation and returns both the result and elapsed duration.
    fn timed_async<F, R>(&self, f: F) -> impl Future<Output = TimedResult<R>>
    where
        F: Future<Output = R>;
}

impl ClockExt for Clock {
    async fn timed_async<F, R>(&self, f: F) -> TimedResult<R>
    where
        F: Future<Output = R>,
    {
        let start = self.instant();
        let result = f.await;
        TimedResult {
            result,
            duration: self.instant().saturating_duration_since(start),
        }
    }
}

pub(crate) trait ChainTelemetryExt {
    /// Records a chain event if telemetry is enabled.
    fn record(
        &self,
        name: ChainName,
        operation: ChainOperation,
        activity: ChainActivity,
        tier: Option<usize>,
        duration: Option<Duration>,
    );
}

impl ChainTelemetryExt for Option<ChainTelemetry> {
    #[allow(unused_variables, reason = "No-op when telemetry is disabled")]
    fn record(
        &self,
        name: ChainName,
        operation: ChainOperation,
        activity: ChainActivity,
        tier: Option<usize>,
        duration: Option<Duration>,
    ) {
        #[cfg(any(feature = "logs", feature = "metrics", test))]
        if let Some(t) = self {
            t.record(name, operation, activity, tier, duration);
        }
    }
}
