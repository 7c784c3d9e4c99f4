//! Dashboard counts and report metrics.
//!
//! Everything here is a reduction over an in-memory collection. Empty input
//! is always defined: no buckets, 0% resolution rate, 100% SLA compliance.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::model::{Device, Priority, RequestType, Status, TrackedRecord};
use crate::sla::{SlaStatus, classify_at, is_overdue_at};

// ---------------------------------------------------------------------------
// Bucketing
// ---------------------------------------------------------------------------

/// Count records per bucket key. Keys come back sorted.
pub fn aggregate<'a, T, K, F>(
    records: impl IntoIterator<Item = &'a T>,
    bucket: F,
) -> BTreeMap<K, usize>
where
    T: 'a + ?Sized,
    K: Ord,
    F: Fn(&T) -> K,
{
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(bucket(record)).or_insert(0) += 1;
    }
    counts
}

pub fn by_status<R: TrackedRecord + ?Sized>(record: &R) -> Status {
    record.status().clone()
}

pub fn by_priority<R: TrackedRecord + ?Sized>(record: &R) -> Priority {
    record.priority().clone()
}

/// Records without a type discriminator (problems) land in `None`.
pub fn by_request_type<R: TrackedRecord + ?Sized>(record: &R) -> Option<RequestType> {
    record.request_type()
}

/// UTC calendar day of creation.
pub fn by_created_day<R: TrackedRecord + ?Sized>(record: &R) -> NaiveDate {
    record.created_at().date_naive()
}

/// Normalized device type; blank types count as "unknown".
pub fn by_device_type(device: &Device) -> String {
    let t = device.device_type.trim().to_lowercase();
    if t.is_empty() {
        "unknown".to_string()
    } else {
        t
    }
}

/// Bucket by SLA classification at `now`.
pub fn by_sla_status<R: TrackedRecord + ?Sized>(now: DateTime<Utc>) -> impl Fn(&R) -> SlaStatus {
    move |record| classify_at(record, now).status
}

// ---------------------------------------------------------------------------
// Report metrics
// ---------------------------------------------------------------------------

/// The composite numbers shown on the reporting screens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportMetrics {
    pub total: usize,
    /// (resolved + closed) / total, whole percent.
    pub resolution_rate: u32,
    /// Mean hours from creation to resolution, one decimal.
    pub mean_resolution_hours: f64,
    /// Mean hours from creation to first response, one decimal.
    pub mean_first_response_hours: f64,
    pub sla_breached: usize,
    /// (total - breached) / total, whole percent.
    pub sla_compliance: u32,
}

impl ReportMetrics {
    pub fn compute<R: TrackedRecord>(records: &[R], now: DateTime<Utc>) -> Self {
        let total = records.len();
        let resolved = records
            .iter()
            .filter(|r| matches!(r.status(), Status::Resolved | Status::Closed))
            .count();
        let sla_breached = records.iter().filter(|r| is_overdue_at(*r, now)).count();

        Self {
            total,
            resolution_rate: resolution_rate(resolved, total),
            mean_resolution_hours: mean_hours(
                records.iter().map(|r| (r.created_at(), r.resolved_at())),
            ),
            mean_first_response_hours: mean_hours(
                records.iter().map(|r| (r.created_at(), r.first_response_at())),
            ),
            sla_breached,
            sla_compliance: sla_compliance(sla_breached, total),
        }
    }
}

/// Whole-percent resolution rate; 0 for an empty collection.
pub fn resolution_rate(resolved: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    percent(resolved, total)
}

/// Whole-percent SLA compliance; 100 for an empty collection.
pub fn sla_compliance(breached: usize, total: usize) -> u32 {
    if total == 0 {
        return 100;
    }
    percent(total.saturating_sub(breached), total)
}

fn percent(part: usize, total: usize) -> u32 {
    (part as f64 * 100.0 / total as f64).round() as u32
}

/// Mean of `end - start` in hours over pairs with an end; 0 when none.
fn mean_hours(pairs: impl Iterator<Item = (DateTime<Utc>, Option<DateTime<Utc>>)>) -> f64 {
    let (sum_ms, n) = pairs
        .filter_map(|(start, end)| end.map(|end| (end - start).num_milliseconds()))
        .fold((0i64, 0usize), |(sum, n), ms| (sum + ms, n + 1));
    if n == 0 {
        return 0.0;
    }
    let hours = sum_ms as f64 / n as f64 / 3_600_000.0;
    (hours * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Tile counts plus the two breakdown charts on the helpdesk dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total: usize,
    /// Non-terminal records.
    pub open: usize,
    /// Non-terminal records with nobody assigned.
    pub unassigned: usize,
    pub at_risk: usize,
    pub breached: usize,
    pub by_status: BTreeMap<Status, usize>,
    pub by_priority: BTreeMap<Priority, usize>,
}

impl DashboardSummary {
    pub fn compute<R: TrackedRecord>(records: &[R], now: DateTime<Utc>) -> Self {
        let sla = aggregate(records, by_sla_status::<R>(now));
        let open: Vec<&R> = records
            .iter()
            .filter(|r| !r.status().is_terminal())
            .collect();

        Self {
            total: records.len(),
            open: open.len(),
            unassigned: open.iter().filter(|r| r.assigned_to().is_none()).count(),
            at_risk: sla.get(&SlaStatus::AtRisk).copied().unwrap_or(0),
            breached: sla.get(&SlaStatus::Breached).copied().unwrap_or(0),
            by_status: aggregate(records, by_status),
            by_priority: aggregate(records, by_priority),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_half_away_from_zero() {
        assert_eq!(resolution_rate(1, 8), 13); // 12.5
        assert_eq!(resolution_rate(1, 3), 33);
        assert_eq!(resolution_rate(2, 3), 67);
    }

    #[test]
    fn empty_collections_do_not_divide_by_zero() {
        assert_eq!(resolution_rate(0, 0), 0);
        assert_eq!(sla_compliance(0, 0), 100);
        assert_eq!(mean_hours(std::iter::empty()), 0.0);
    }
}
