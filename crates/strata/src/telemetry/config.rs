// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Telemetry configuration for chain operations.

#[cfg(any(feature = "metrics", test))]
use opentelemetry::metrics::{Meter, MeterProvider};
use tick::Clock;

use crate::telemetry::ChainTelemetry;
#[cfg(any(feature = "logs", feature = "metrics", test))]
use crate::telemetry::chain::ChainTelemetryInner;
#[cfg(any(feature = "logs", feature = "metrics", test))]
use thread_aware::Arc;

/// Configuration for chain telemetry.
///
/// Use the builder methods to enable logs and/or metrics, then pass the
/// result of [`build`](Self::build) to
/// [`ChainBuilder::telemetry`](crate::ChainBuilder::telemetry).
///
/// # Examples
///
/// ```ignore
/// use strata::TelemetryConfig;
/// use tick::Clock;
///
/// let telemetry = TelemetryConfig::new()
///     .with_logs()
///     .with_metrics(&meter_provider)
///     .build(Clock::new_tokio());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TelemetryConfig {
    #[cfg(any(feature = "logs", test))]
    logs_enabled: bool,
    #[cfg(any(feature = "metrics", test))]
    meter: Option<Meter>,
}

impl TelemetryConfig {
    /// Creates a new telemetry configuration with everything disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables structured logging for chain operations.
    ///
    /// Every hit, miss, backfill and fan-out outcome is emitted as a
    /// `chain.event` through the `tracing` crate.
    #[cfg(any(feature = "logs", test))]
    #[must_use]
    pub fn with_logs(self) -> Self {
        Self {
            logs_enabled: true,
            ..self
        }
    }

    /// Enables metrics collection using the provided meter provider.
    #[cfg(any(feature = "metrics", test))]
    #[must_use]
    pub fn with_metrics(mut self, provider: &dyn MeterProvider) -> Self {
        use crate::telemetry::metrics;
        self.meter = Some(metrics::create_meter(provider));
        self
    }

    /// Builds the telemetry collector from this configuration.
    ///
    /// `clock` times chain operations; pass a controlled clock in tests.
    #[must_use]
    pub fn build(self, clock: Clock) -> ChainTelemetry {
        #[cfg(not(any(feature = "logs", feature = "metrics", test)))]
        {
            return ChainTelemetry { clock };
        }

        #[cfg(any(feature = "logs", feature = "metrics", test))]
        {
            #[cfg(any(feature = "metrics", test))]
            let (event_counter, operation_duration) = {
                use crate::telemetry::metrics::{create_event_counter, create_operation_duration_histogram};
                (
                    self.meter.as_ref().map(create_event_counter),
                    self.meter.as_ref().map(create_operation_duration_histogram),
                )
            };

            ChainTelemetry {
                clock,
                inner: Arc::from_unaware(ChainTelemetryInner {
                    #[cfg(any(feature = "logs", test))]
                    logging_enabled: self.logs_enabled,
                    #[cfg(any(feature = "metrics", test))]
                    event_counter,
                    #[cfg(any(feature = "metrics", test))]
                    operation_duration,
                }),
            }
        }
    }
}
