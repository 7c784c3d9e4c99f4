//! Offline record source: a JSON export of the store's tables.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use super::record::{Device, Problem, ServiceRequest, Ticket};
use super::request::{UnifiedRequest, unify};
use crate::error::{Error, Result};

/// One bulk fetch of every table the reports work from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub service_requests: Vec<ServiceRequest>,
    #[serde(default)]
    pub problems: Vec<Problem>,
    #[serde(default)]
    pub devices: Vec<Device>,
}

impl Snapshot {
    /// Parse a snapshot document. Records with the wrong shape (missing id,
    /// unparsable `created_at`, ...) are rejected as invalid records.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            if e.is_data() {
                Error::InvalidRecord(e.to_string())
            } else {
                Error::Json(e)
            }
        })
    }

    /// Load a snapshot from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json(&content)?;
        debug!(
            path = %path.display(),
            tickets = snapshot.tickets.len(),
            service_requests = snapshot.service_requests.len(),
            problems = snapshot.problems.len(),
            devices = snapshot.devices.len(),
            "snapshot loaded"
        );
        Ok(snapshot)
    }

    /// Tickets and service requests as one newest-first list.
    pub fn requests(&self) -> Vec<UnifiedRequest> {
        unify(self.tickets.clone(), self.service_requests.clone())
    }
}
