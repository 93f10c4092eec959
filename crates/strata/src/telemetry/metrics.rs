// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Instruments recorded by a telemetry-enabled chain.

use opentelemetry::{
    InstrumentationScope,
    metrics::{Counter, Histogram, Meter, MeterProvider},
};

const SCOPE: &str = "strata";
const SCHEMA_URL: &str = "https://opentelemetry.io/schemas/1.47.0";

/// Counts hits, misses, backfills and per-operation outcomes.
const EVENTS: &str = "chain.event.count";

/// Wall time of a whole `get`, `put` or `remove`, tiers included.
const OPERATION_TIME: &str = "chain.operation.duration";

pub(crate) fn create_meter(meter_provider: &dyn MeterProvider) -> Meter {
    let scope = InstrumentationScope::builder(SCOPE)
        .with_version(env!("CARGO_PKG_VERSION"))
        .with_schema_url(SCHEMA_URL)
        .build();
    meter_provider.meter_with_scope(scope)
}

pub(crate) fn create_event_counter(meter: &Meter) -> Counter<u64> {
    meter
        .u64_counter(EVENTS)
        .with_description("Lookups and writes observed by a chain, split by activity")
        .with_unit("{activity}")
        .build()
}

pub(crate) fn create_operation_duration_histogram(meter: &Meter) -> Histogram<f64> {
    meter
        .f64_histogram(OPERATION_TIME)
        .with_description("Time a chain spent serving one operation across its tiers")
        .with_unit("s")
        .build()
}
