//! Unified request view: tickets and service requests in one list.
//!
//! The request queue screens show both kinds side by side, sorted newest
//! first, and filter them with a single type discriminator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::record::{ServiceRequest, Ticket, TrackedRecord};
use super::status::{Priority, Status};
use crate::error::Error;
use crate::sla::SlaSubject;

/// Which source table a unified request came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Ticket,
    ServiceRequest,
}

impl RequestType {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestType::Ticket => "ticket",
            RequestType::ServiceRequest => "service_request",
        }
    }
}

impl FromStr for RequestType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ticket" | "incident" => Ok(RequestType::Ticket),
            "service_request" | "request" => Ok(RequestType::ServiceRequest),
            other => Err(Error::InvalidFilter(format!("unknown request type: {other}"))),
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A ticket or service request flattened into one shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedRequest {
    pub id: i64,
    pub request_type: RequestType,
    pub number: String,
    pub title: String,
    pub description: Option<String>,
    pub status: Status,
    pub priority: Priority,
    pub sla_due_date: Option<DateTime<Utc>>,
    pub sla_breached: bool,
    pub assigned_to: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
    pub first_response_at: Option<DateTime<Utc>>,
}

impl From<Ticket> for UnifiedRequest {
    fn from(t: Ticket) -> Self {
        Self {
            id: t.id,
            request_type: RequestType::Ticket,
            number: t.ticket_number,
            title: t.title,
            description: t.description,
            status: t.status,
            priority: t.priority,
            sla_due_date: t.sla_due_date,
            sla_breached: t.sla_breached.unwrap_or(false),
            assigned_to: t.assigned_to,
            created_at: t.created_at,
            resolved_at: t.resolved_at,
            first_response_at: t.first_response_at,
        }
    }
}

impl From<ServiceRequest> for UnifiedRequest {
    fn from(r: ServiceRequest) -> Self {
        Self {
            id: r.id,
            request_type: RequestType::ServiceRequest,
            number: r.request_number,
            title: r.title,
            description: r.description,
            status: r.status,
            priority: r.priority,
            sla_due_date: r.sla_due_date,
            sla_breached: r.sla_breached.unwrap_or(false),
            assigned_to: r.assigned_to,
            created_at: r.created_at,
            resolved_at: r.fulfilled_at,
            first_response_at: r.first_response_at,
        }
    }
}

/// Merge tickets and service requests, newest first.
///
/// Ties on `created_at` order tickets before service requests, then by id,
/// so the output is stable for identical inputs.
pub fn unify(
    tickets: impl IntoIterator<Item = Ticket>,
    service_requests: impl IntoIterator<Item = ServiceRequest>,
) -> Vec<UnifiedRequest> {
    let mut all: Vec<UnifiedRequest> = tickets
        .into_iter()
        .map(UnifiedRequest::from)
        .chain(service_requests.into_iter().map(UnifiedRequest::from))
        .collect();

    all.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then(a.request_type.cmp(&b.request_type))
            .then(a.id.cmp(&b.id))
    });
    all
}

impl SlaSubject for UnifiedRequest {
    fn sla_breached(&self) -> bool {
        self.sla_breached
    }

    fn sla_due_date(&self) -> Option<DateTime<Utc>> {
        self.sla_due_date
    }

    fn status(&self) -> &Status {
        &self.status
    }
}

impl TrackedRecord for UnifiedRequest {
    fn id(&self) -> i64 {
        self.id
    }

    fn number(&self) -> &str {
        &self.number
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
        Some(self.request_type)
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
