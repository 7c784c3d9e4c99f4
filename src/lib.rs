//! # helpdesk-rs
//!
//! Derived views over helpdesk records: SLA classification, status and
//! priority display tables, in-memory filtering, and dashboard aggregates.
//!
//! Records (tickets, service requests, problems, devices) come from a hosted
//! Postgres store or a JSON snapshot of it. Everything downstream of the
//! fetch is a pure function of the records and an explicit `now`.

pub mod config;
pub mod db;
pub mod error;
pub mod filter;
pub mod labels;
pub mod model;
pub mod sla;
pub mod stats;
pub mod telemetry;
pub mod views;
