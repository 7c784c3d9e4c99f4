//! Report span helpers.
//!
//! A report is one pass of filter / classify / aggregate over a fetched
//! collection. The span carries the input size and, once known, how many
//! records matched.

use opentelemetry::KeyValue;
use std::collections::BTreeMap;
use tracing::Span;

use super::metrics;
use crate::sla::SlaStatus;

/// Start a span for a report over `record_count` records.
///
/// `report.matched` is declared empty and filled by [`record_report_result`].
pub fn start_report_span(kind: &str, record_count: usize) -> Span {
    tracing::info_span!(
        "report.build",
        "report.kind" = kind,
        "report.records" = record_count,
        "report.matched" = tracing::field::Empty,
    )
}

/// Record the filter outcome on a report span and in the filter counter.
pub fn record_report_result(span: &Span, total: usize, matched: usize) {
    span.record("report.matched", matched);
    let counter = metrics::records_filtered();
    counter.add(matched as u64, &[KeyValue::new("result", "matched")]);
    counter.add(
        total.saturating_sub(matched) as u64,
        &[KeyValue::new("result", "rejected")],
    );
}

/// Add SLA bucket counts to the classification counter.
pub fn record_sla_counts(counts: &BTreeMap<SlaStatus, usize>) {
    let counter = metrics::records_classified();
    for (status, n) in counts {
        counter.add(*n as u64, &[KeyValue::new("sla_status", status.as_str())]);
    }
}
