//! SLA status classification.
//!
//! Maps a record's breach flag, due date and lifecycle status to
//! on-track / at-risk / breached, plus the label and badge style the
//! tables render. Pure over its inputs and an explicit `now`.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Error;
use crate::model::Status;

/// A due date closer than this is at risk.
pub const AT_RISK_WINDOW: TimeDelta = TimeDelta::hours(2);

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// The fields the classifier reads.
pub trait SlaSubject {
    /// Persisted breach flag; missing reads as false.
    fn sla_breached(&self) -> bool;

    /// None means no SLA applies.
    fn sla_due_date(&self) -> Option<DateTime<Utc>>;

    fn status(&self) -> &Status;
}

/// Source of "now". Lets callers pin the time in tests and reports.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Three-valued SLA risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaStatus {
    OnTrack,
    AtRisk,
    Breached,
}

impl SlaStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SlaStatus::OnTrack => "on_track",
            SlaStatus::AtRisk => "at_risk",
            SlaStatus::Breached => "breached",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlaStatus::OnTrack => "On Track",
            SlaStatus::AtRisk => "At Risk",
            SlaStatus::Breached => "Breached",
        }
    }

    pub fn color_class(self) -> &'static str {
        match self {
            SlaStatus::OnTrack => "text-green-600 bg-green-50",
            SlaStatus::AtRisk => "text-amber-600 bg-amber-50",
            SlaStatus::Breached => "text-red-600 bg-red-50",
        }
    }
}

impl FromStr for SlaStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on_track" => Ok(SlaStatus::OnTrack),
            "at_risk" => Ok(SlaStatus::AtRisk),
            "breached" => Ok(SlaStatus::Breached),
            other => Err(Error::InvalidFilter(format!("unknown SLA status: {other}"))),
        }
    }
}

impl std::fmt::Display for SlaStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification plus display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlaClassification {
    pub status: SlaStatus,
    pub label: &'static str,
    pub color_class: &'static str,
}

impl From<SlaStatus> for SlaClassification {
    fn from(status: SlaStatus) -> Self {
        Self {
            status,
            label: status.label(),
            color_class: status.color_class(),
        }
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify against an explicit `now`.
///
/// The persisted flag wins over the live comparison. A terminal status
/// stops the clock even when the due date has passed.
pub fn classify_at<R: SlaSubject + ?Sized>(record: &R, now: DateTime<Utc>) -> SlaClassification {
    sla_status_at(record, now).into()
}

/// Classify against the wall clock.
pub fn classify<R: SlaSubject + ?Sized>(record: &R) -> SlaClassification {
    classify_at(record, SystemClock.now())
}

/// Classify against any clock.
pub fn classify_with<R: SlaSubject + ?Sized, C: Clock + ?Sized>(
    record: &R,
    clock: &C,
) -> SlaClassification {
    classify_at(record, clock.now())
}

fn sla_status_at<R: SlaSubject + ?Sized>(record: &R, now: DateTime<Utc>) -> SlaStatus {
    if record.sla_breached() {
        return SlaStatus::Breached;
    }
    let Some(due) = record.sla_due_date() else {
        return SlaStatus::OnTrack;
    };
    if record.status().is_terminal() {
        return SlaStatus::OnTrack;
    }

    if due < now {
        SlaStatus::Breached
    } else if due - now < AT_RISK_WINDOW {
        SlaStatus::AtRisk
    } else {
        SlaStatus::OnTrack
    }
}

/// The boolean breach predicate: flagged, or open past its due date.
pub fn is_overdue_at<R: SlaSubject + ?Sized>(record: &R, now: DateTime<Utc>) -> bool {
    if record.sla_breached() {
        return true;
    }
    match record.sla_due_date() {
        Some(due) => !record.status().is_terminal() && due < now,
        None => false,
    }
}

/// Hours until the due date (negative once past). None without an SLA.
pub fn hours_until_due<R: SlaSubject + ?Sized>(record: &R, now: DateTime<Utc>) -> Option<f64> {
    record
        .sla_due_date()
        .map(|due| (due - now).num_milliseconds() as f64 / 3_600_000.0)
}
