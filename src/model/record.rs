//! Typed record shapes for each entity the store returns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::request::RequestType;
use super::status::{Priority, Status};
use super::timestamp::{lenient, strict};
use crate::sla::SlaSubject;

// ---------------------------------------------------------------------------
// Tracked record
// ---------------------------------------------------------------------------

/// Read access shared by every SLA-tracked record (tickets, service
/// requests, problems, and the unified request view).
///
/// The filter and the aggregates are written against this trait so they
/// work over any of the concrete record types.
pub trait TrackedRecord: SlaSubject {
    fn id(&self) -> i64;

    /// Display number, e.g. "INC-0042".
    fn number(&self) -> &str;

    fn title(&self) -> &str;

    fn description(&self) -> Option<&str>;

    fn priority(&self) -> &Priority;

    /// Type discriminator. Only unified requests and their sources carry one.
    fn request_type(&self) -> Option<RequestType>;

    fn assigned_to(&self) -> Option<Uuid>;

    fn created_at(&self) -> DateTime<Utc>;

    fn resolved_at(&self) -> Option<DateTime<Utc>>;

    fn first_response_at(&self) -> Option<DateTime<Utc>>;
}

// ---------------------------------------------------------------------------
// Ticket
// ---------------------------------------------------------------------------

/// A helpdesk ticket (incident).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: i64,

    #[serde(default)]
    pub ticket_number: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub status: Status,

    pub priority: Priority,

    /// Deadline for reaching a terminal status. None means no SLA applies.
    #[serde(default, with = "lenient")]
    pub sla_due_date: Option<DateTime<Utc>>,

    /// Set by a store trigger when a breach was detected at write time.
    #[serde(default)]
    pub sla_breached: Option<bool>,

    #[serde(default, alias = "assignee_id")]
    pub assigned_to: Option<Uuid>,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(with = "strict")]
    pub created_at: DateTime<Utc>,

    #[serde(default, with = "lenient")]
    pub resolved_at: Option<DateTime<Utc>>,

    #[serde(default, with = "lenient")]
    pub first_response_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Service request
// ---------------------------------------------------------------------------

/// A catalog service request. Completes by being fulfilled rather than
/// resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRequest {
    pub id: i64,

    #[serde(default)]
    pub request_number: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub status: Status,

    pub priority: Priority,

    #[serde(default, with = "lenient")]
    pub sla_due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub sla_breached: Option<bool>,

    #[serde(default, alias = "assignee_id")]
    pub assigned_to: Option<Uuid>,

    /// Catalog entry the request was raised against.
    #[serde(default)]
    pub catalog_item: Option<String>,

    #[serde(with = "strict")]
    pub created_at: DateTime<Utc>,

    #[serde(default, with = "lenient")]
    pub fulfilled_at: Option<DateTime<Utc>>,

    #[serde(default, with = "lenient")]
    pub first_response_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Problem
// ---------------------------------------------------------------------------

/// A problem record: the underlying cause behind one or more incidents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    pub id: i64,

    #[serde(default)]
    pub problem_number: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub status: Status,

    pub priority: Priority,

    #[serde(default, with = "lenient")]
    pub sla_due_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub sla_breached: Option<bool>,

    #[serde(default, alias = "assignee_id")]
    pub assigned_to: Option<Uuid>,

    #[serde(with = "strict")]
    pub created_at: DateTime<Utc>,

    #[serde(default, with = "lenient")]
    pub resolved_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Device
// ---------------------------------------------------------------------------

/// An IT asset. Not SLA-tracked; counted by type and status on the asset
/// dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: i64,

    #[serde(default)]
    pub asset_tag: String,

    #[serde(default)]
    pub name: String,

    /// Free-form type, e.g. "laptop", "printer".
    #[serde(default)]
    pub device_type: String,

    /// Asset status, e.g. "active", "in_repair", "retired".
    #[serde(default)]
    pub status: String,

    #[serde(default, alias = "assignee_id")]
    pub assigned_to: Option<Uuid>,

    #[serde(with = "strict")]
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl SlaSubject for Ticket {
    fn sla_breached(&self) -> bool {
        self.sla_breached.unwrap_or(false)
    }

    fn sla_due_date(&self) -> Option<DateTime<Utc>> {
        self.sla_due_date
    }

    fn status(&self) -> &Status {
        &self.status
    }
}

impl TrackedRecord for Ticket {
    fn id(&self) -> i64 {
        self.id
    }

    fn number(&self) -> &str {
        &self.ticket_number
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn priority(&self) -> &Priority {
        &self.priority
    }

    fn request_type(&self) -> Option<RequestType> {
        Some(RequestType::Ticket)
    }

    fn assigned_to(&self) -> Option<Uuid> {
        self.assigned_to
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    fn first_response_at(&self) -> Option<DateTime<Utc>> {
        self.first_response_at
    }
}

impl SlaSubject for ServiceRequest {
    fn sla_breached(&self) -> bool {
        self.sla_breached.unwrap_or(false)
    }

    fn sla_due_date(&self) -> Option<DateTime<Utc>> {
        self.sla_due_date
    }

    fn status(&self) -> &Status {
        &self.status
    }
}

impl TrackedRecord for ServiceRequest {
    fn id(&self) -> i64 {
        self.id
    }

    fn number(&self) -> &str {
        &self.request_number
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn priority(&self) -> &Priority {
        &self.priority
    }

    fn request_type(&self) -> Option<RequestType> {
        Some(RequestType::ServiceRequest)
    }

    fn assigned_to(&self) -> Option<Uuid> {
        self.assigned_to
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.fulfilled_at
    }

    fn first_response_at(&self) -> Option<DateTime<Utc>> {
        self.first_response_at
    }
}

impl SlaSubject for Problem {
    fn sla_breached(&self) -> bool {
        self.sla_breached.unwrap_or(false)
    }

    fn sla_due_date(&self) -> Option<DateTime<Utc>> {
        self.sla_due_date
    }

    fn status(&self) -> &Status {
        &self.status
    }
}

impl TrackedRecord for Problem {
    fn id(&self) -> i64 {
        self.id
    }

    fn number(&self) -> &str {
        &self.problem_number
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn priority(&self) -> &Priority {
        &self.priority
    }

    fn request_type(&self) -> Option<RequestType> {
        None
    }

    fn assigned_to(&self) -> Option<Uuid> {
        self.assigned_to
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn resolved_at(&self) -> Option<DateTime<Utc>> {
        self.resolved_at
    }

    fn first_response_at(&self) -> Option<DateTime<Utc>> {
        None
    }
}
