//! Core data model.
//!
//! Records are owned by the hosted store and arrive here as read-only
//! snapshots. Everything is typed and coerced at the point it enters the
//! crate, so the classifier, filter and aggregates never see raw strings
//! for dates or untrusted shapes.

pub mod record;
pub mod request;
pub mod snapshot;
pub mod status;
pub mod timestamp;

pub use record::{Device, Problem, ServiceRequest, Ticket, TrackedRecord};
pub use request::{RequestType, UnifiedRequest, unify};
pub use snapshot::Snapshot;
pub use status::{Priority, Status};
