//! Metric instrument factories for helpdesk-rs.
//!
//! Uses the OTel Meter API with the globally-registered `MeterProvider`.
//! Without an OTLP endpoint the global provider is a no-op.

use opentelemetry::metrics::{Counter, Histogram, Meter};

fn meter() -> Meter {
    opentelemetry::global::meter("helpdesk-rs")
}

/// Counter: records pulled from the store.
/// Labels: `table`.
pub fn records_fetched() -> Counter<u64> {
    meter()
        .u64_counter("helpdesk.records.fetched")
        .with_description("Number of records fetched from the record store")
        .build()
}

/// Counter: records classified by SLA status.
/// Labels: `sla_status` ("on_track" | "at_risk" | "breached").
pub fn records_classified() -> Counter<u64> {
    meter()
        .u64_counter("helpdesk.sla.classified")
        .with_description("Number of records classified by SLA status")
        .build()
}

/// Counter: filter evaluations.
/// Labels: `result` ("matched" | "rejected").
pub fn records_filtered() -> Counter<u64> {
    meter()
        .u64_counter("helpdesk.filter.evaluated")
        .with_description("Number of records evaluated against a filter")
        .build()
}

/// Histogram: operation duration in milliseconds.
/// Labels: `operation`.
pub fn operation_duration_ms() -> Histogram<f64> {
    meter()
        .f64_histogram("helpdesk.operation.duration_ms")
        .with_description("Operation duration in milliseconds")
        .with_unit("ms")
        .build()
}
