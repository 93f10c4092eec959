// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Chain telemetry implementation and recording.

use std::time::Duration;

#[cfg(any(feature = "logs", test))]
use opentelemetry::logs::Severity;
#[cfg(any(feature = "metrics", test))]
use opentelemetry::{
    KeyValue,
    metrics::{Counter, Histogram},
};

#[cfg(any(feature = "metrics", test))]
use crate::telemetry::attributes;
use crate::{
    chain::ChainName,
    telemetry::{ChainActivity, ChainOperation, ChainTelemetry},
};

#[derive(Clone, Debug)]
pub(crate) struct ChainTelemetryInner {
    #[cfg(any(feature = "logs", test))]
    pub(crate) logging_enabled: bool,
    #[cfg(any(feature = "metrics", test))]
    pub(crate) event_counter: Option<Counter<u64>>,
    #[cfg(any(feature = "metrics", test))]
    pub(crate) operation_duration: Option<Histogram<f64>>,
}

impl ChainTelemetry {
    /// Records a chain event.
    ///
    /// `tier` is the position of the tier the event concerns, if any.
    /// `duration` is only present for events that complete an operation.
    #[inline]
    pub(crate) fn record(
        &self,
        chain_name: ChainName,
        operation: ChainOperation,
        activity: ChainActivity,
        tier: Option<usize>,
        duration: Option<Duration>,
    ) {
        #[cfg(any(feature = "metrics", test))]
        {
            let attrs = [
                KeyValue::new(attributes::CHAIN_NAME, chain_name),
                KeyValue::new(attributes::CHAIN_OPERATION_NAME, operation.as_str()),
                KeyValue::new(attributes::CHAIN_ACTIVITY_NAME, activity.as_str()),
            ];

            if let Some(c) = &self.inner.event_counter {
                c.add(1, &attrs);
            }

            if let (Some(d), Some(h)) = (duration, &self.inner.operation_duration) {
                h.record(d.as_secs_f64(), &attrs);
            }
        }

        #[cfg(any(feature = "logs", test))]
        if self.inner.logging_enabled {
            Self::emit(chain_name, operation, activity, tier, duration);
        }

        #[cfg(not(any(feature = "logs", test)))]
        let _ = tier;
    }

    #[cfg(any(feature = "logs", test))]
    fn emit(
        chain_name: ChainName,
        operation: ChainOperation,
        activity: ChainActivity,
        tier: Option<usize>,
        duration: Option<Duration>,
    ) {
        let op = operation.as_str();
        let act = activity.as_str();
        let duration_ns = duration.map(|d| d.as_nanos());

        // Tracing levels must be constant, so the macro selects one per severity.
        // Field names must match the constants in attributes.rs.
        macro_rules! emit_event {
            ($level:ident) => {
                tracing::$level!(
                    chain.name = chain_name,
                    chain.operation = op,
                    chain.activity = act,
                    chain.tier = ?tier,
                    chain.duration_ns = ?duration_ns,
                    "chain.event"
                )
            };
        }

        match activity.severity() {
            Severity::Error => emit_event!(error),
            Severity::Info => emit_event!(info),
            Severity::Debug => emit_event!(debug),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tick::Clock;

    use crate::telemetry::TelemetryConfig;
    use crate::telemetry::testing::MetricTester;
    use strata_tier::testing::LogCapture;

    #[test]
    fn metrics_record_emits_correct_attributes() {
        let tester = MetricTester::new();
        let telemetry = TelemetryConfig::new()
            .with_metrics(tester.meter_provider())
            .build(Clock::new_frozen());

        telemetry.record(
            "profiles",
            ChainOperation::Get,
            ChainActivity::Hit,
            Some(1),
            Some(Duration::from_millis(5)),
        );

        tester.assert_attributes_contain(&[
            KeyValue::new(attributes::CHAIN_NAME, "profiles"),
            KeyValue::new(attributes::CHAIN_OPERATION_NAME, ChainOperation::Get.as_str()),
            KeyValue::new(attributes::CHAIN_ACTIVITY_NAME, ChainActivity::Hit.as_str()),
        ]);
    }

    #[test]
    fn meter_scope_is_strata() {
        let tester = MetricTester::new();
        let telemetry = TelemetryConfig::new()
            .with_metrics(tester.meter_provider())
            .build(Clock::new_frozen());

        telemetry.record("profiles", ChainOperation::Put, ChainActivity::Ok, None, Some(Duration::from_millis(1)));

        assert!(tester.scope_names().iter().any(|name| name == "strata"));
    }

    #[test]
    fn logs_emit_contains_all_fields_and_values() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        ChainTelemetry::emit(
            "my_chain",
            ChainOperation::Remove,
            ChainActivity::Error,
            Some(2),
            Some(Duration::from_nanos(12345)),
        );

        capture.assert_contains(attributes::CHAIN_NAME);
        capture.assert_contains(attributes::CHAIN_OPERATION_NAME);
        capture.assert_contains(attributes::CHAIN_ACTIVITY_NAME);
        capture.assert_contains(attributes::CHAIN_TIER_NAME);
        capture.assert_contains(attributes::CHAIN_DURATION_NAME);
        capture.assert_contains(attributes::CHAIN_EVENT_NAME);

        capture.assert_contains("my_chain");
        capture.assert_contains(ChainOperation::Remove.as_str());
        capture.assert_contains(ChainActivity::Error.as_str());
        capture.assert_contains("12345");
    }

    #[test]
    fn logs_emit_at_correct_severity_levels() {
        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());
        ChainTelemetry::emit("chain", ChainOperation::Put, ChainActivity::Error, Some(0), None);
        capture.assert_contains("ERROR");

        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());
        ChainTelemetry::emit("chain", ChainOperation::Get, ChainActivity::Backfill, Some(0), None);
        capture.assert_contains("INFO");

        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());
        ChainTelemetry::emit("chain", ChainOperation::Get, ChainActivity::Hit, Some(0), None);
        capture.assert_contains("DEBUG");
    }

    #[test]
    fn telemetry_disabled_emits_nothing() {
        let telemetry = TelemetryConfig::new().build(Clock::new_frozen());

        let capture = LogCapture::new();
        let _guard = tracing::subscriber::set_default(capture.subscriber());

        telemetry.record("chain", ChainOperation::Get, ChainActivity::Hit, Some(0), Some(Duration::from_secs(1)));

        assert!(capture.output().is_empty());
    }
}
