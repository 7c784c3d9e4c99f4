//! Lifecycle status and priority codes.
//!
//! Both enums accept any string. Known codes map to variants; anything else
//! is kept verbatim in `Other` so it round-trips and still renders.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle status of a ticket, service request or problem.
///
/// Tickets use open/in_progress/on_hold/resolved/closed/fulfilled/rejected;
/// problems use open/investigating/known_error/resolved/closed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Open,
    InProgress,
    OnHold,
    Investigating,
    KnownError,
    Resolved,
    Closed,
    Fulfilled,
    Rejected,
    /// Code not known to this crate, kept as received.
    Other(String),
}

impl Status {
    /// Parse a status code. Never fails; unknown codes become `Other`.
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "open" => Status::Open,
            "in_progress" => Status::InProgress,
            "on_hold" => Status::OnHold,
            "investigating" => Status::Investigating,
            "known_error" => Status::KnownError,
            "resolved" => Status::Resolved,
            "closed" => Status::Closed,
            "fulfilled" => Status::Fulfilled,
            "rejected" => Status::Rejected,
            _ => Status::Other(code.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in_progress",
            Status::OnHold => "on_hold",
            Status::Investigating => "investigating",
            Status::KnownError => "known_error",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
            Status::Fulfilled => "fulfilled",
            Status::Rejected => "rejected",
            Status::Other(code) => code,
        }
    }

    /// Terminal statuses stop the SLA clock.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Resolved | Status::Closed | Status::Fulfilled)
    }
}

impl FromStr for Status {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Status::parse(s))
    }
}

impl From<String> for Status {
    fn from(code: String) -> Self {
        Status::parse(&code)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

/// Priority of a ticket, service request or problem. Variant order is
/// severity order, most urgent first.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Urgent,
    High,
    Medium,
    Low,
    Other(String),
}

impl Priority {
    pub fn parse(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "urgent" => Priority::Urgent,
            "high" => Priority::High,
            "medium" => Priority::Medium,
            "low" => Priority::Low,
            _ => Priority::Other(code.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Priority::Urgent => "urgent",
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
            Priority::Other(code) => code,
        }
    }
}

impl FromStr for Priority {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Priority::parse(s))
    }
}

impl From<String> for Priority {
    fn from(code: String) -> Self {
        Priority::parse(&code)
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> Self {
        priority.as_str().to_string()
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
