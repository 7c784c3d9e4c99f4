//! Client-side record filtering.
//!
//! The store is queried broadly; list screens then narrow the fetched
//! collection in memory. Every criterion is optional and all present
//! criteria must hold.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::model::timestamp::parse_timestamp;
use crate::model::{Priority, RequestType, Status, TrackedRecord};
use crate::sla::{SlaStatus, classify_at, is_overdue_at};

/// Sentinel accepted by the assignee filter for "no assignee".
pub const UNASSIGNED: &str = "unassigned";

// ---------------------------------------------------------------------------
// Criteria
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssigneeFilter {
    Unassigned,
    User(Uuid),
}

impl FromStr for AssigneeFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(UNASSIGNED) {
            return Ok(AssigneeFilter::Unassigned);
        }
        Uuid::parse_str(s)
            .map(AssigneeFilter::User)
            .map_err(|e| Error::InvalidFilter(format!("assignee {s:?}: {e}")))
    }
}

/// SLA criterion. `Breached` uses the breach predicate (flag or overdue);
/// the other two compare the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlaFilter {
    Breached,
    AtRisk,
    OnTrack,
}

impl FromStr for SlaFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.parse::<SlaStatus>()? {
            SlaStatus::Breached => Ok(SlaFilter::Breached),
            SlaStatus::AtRisk => Ok(SlaFilter::AtRisk),
            SlaStatus::OnTrack => Ok(SlaFilter::OnTrack),
        }
    }
}

/// An active filter set. The default value matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub request_type: Option<RequestType>,
    pub assignee: Option<AssigneeFilter>,
    pub sla: Option<SlaFilter>,
    pub search: Option<String>,
    /// Inclusive lower bound on `created_at`.
    pub date_from: Option<DateTime<Utc>>,
    /// Exclusive upper bound on `created_at`.
    pub date_to: Option<DateTime<Utc>>,
}

/// String-form filter parameters, as they arrive from a query string,
/// CLI flags or a saved view. Empty values and "all" mean no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterParams {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub priority: Option<String>,
    #[serde(default, alias = "type")]
    pub request_type: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub sla: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub date_from: Option<String>,
    #[serde(default)]
    pub date_to: Option<String>,
}

impl FilterParams {
    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merged_with(self, other: FilterParams) -> FilterParams {
        FilterParams {
            status: other.status.or(self.status),
            priority: other.priority.or(self.priority),
            request_type: other.request_type.or(self.request_type),
            assignee: other.assignee.or(self.assignee),
            sla: other.sla.or(self.sla),
            search: other.search.or(self.search),
            date_from: other.date_from.or(self.date_from),
            date_to: other.date_to.or(self.date_to),
        }
    }
}

impl RecordFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a filter from string parameters. Fails on values that cannot
    /// be interpreted (bad UUID, unknown SLA state, unparsable date).
    pub fn from_params(params: &FilterParams) -> Result<Self> {
        Ok(Self {
            status: active(&params.status).map(Status::parse),
            priority: active(&params.priority).map(Priority::parse),
            request_type: active(&params.request_type)
                .map(str::parse)
                .transpose()?,
            assignee: active(&params.assignee).map(str::parse).transpose()?,
            sla: active(&params.sla).map(str::parse).transpose()?,
            search: active(&params.search).map(str::to_string),
            date_from: active(&params.date_from)
                .map(|s| parse_bound("date_from", s))
                .transpose()?,
            date_to: active(&params.date_to)
                .map(|s| parse_bound("date_to", s))
                .transpose()?,
        })
    }

    pub fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn request_type(mut self, request_type: RequestType) -> Self {
        self.request_type = Some(request_type);
        self
    }

    pub fn assignee(mut self, assignee: AssigneeFilter) -> Self {
        self.assignee = Some(assignee);
        self
    }

    pub fn sla(mut self, sla: SlaFilter) -> Self {
        self.sla = Some(sla);
        self
    }

    pub fn search(mut self, needle: impl Into<String>) -> Self {
        self.search = Some(needle.into());
        self
    }

    pub fn created_between(
        mut self,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// True when no criterion is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn active(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

fn parse_bound(name: &str, raw: &str) -> Result<DateTime<Utc>> {
    parse_timestamp(raw).ok_or_else(|| Error::InvalidFilter(format!("{name}: {raw:?}")))
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Does `record` satisfy every criterion in `filter`, evaluated at `now`?
pub fn matches_at<R: TrackedRecord + ?Sized>(
    record: &R,
    filter: &RecordFilter,
    now: DateTime<Utc>,
) -> bool {
    if let Some(ref status) = filter.status {
        if record.status() != status {
            return false;
        }
    }

    if let Some(ref priority) = filter.priority {
        if record.priority() != priority {
            return false;
        }
    }

    if let Some(request_type) = filter.request_type {
        if record.request_type() != Some(request_type) {
            return false;
        }
    }

    match filter.assignee {
        Some(AssigneeFilter::Unassigned) if record.assigned_to().is_some() => return false,
        Some(AssigneeFilter::User(id)) if record.assigned_to() != Some(id) => return false,
        _ => {}
    }

    if let Some(sla) = filter.sla {
        let ok = match sla {
            SlaFilter::Breached => is_overdue_at(record, now),
            SlaFilter::AtRisk => classify_at(record, now).status == SlaStatus::AtRisk,
            SlaFilter::OnTrack => classify_at(record, now).status == SlaStatus::OnTrack,
        };
        if !ok {
            return false;
        }
    }

    if let Some(ref needle) = filter.search {
        if !matches_search(record, needle) {
            return false;
        }
    }

    let created = record.created_at();
    if filter.date_from.is_some_and(|from| created < from) {
        return false;
    }
    if filter.date_to.is_some_and(|to| created >= to) {
        return false;
    }

    true
}

/// `matches_at` against the wall clock.
pub fn matches<R: TrackedRecord + ?Sized>(record: &R, filter: &RecordFilter) -> bool {
    matches_at(record, filter, Utc::now())
}

/// Keep the records that match, in their original order.
pub fn apply<'a, R: TrackedRecord>(
    records: &'a [R],
    filter: &RecordFilter,
    now: DateTime<Utc>,
) -> Vec<&'a R> {
    records
        .iter()
        .filter(|r| matches_at(*r, filter, now))
        .collect()
}

fn matches_search<R: TrackedRecord + ?Sized>(record: &R, needle: &str) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    [
        Some(record.title()),
        record.description(),
        Some(record.number()),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&needle))
}
