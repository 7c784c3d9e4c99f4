//! Bulk record fetches: tickets, service requests, problems, devices.

use chrono::{DateTime, Utc};
use opentelemetry::KeyValue;
use std::time::Instant;
use tracing::debug;
use uuid::Uuid;

use crate::error::Result;
use crate::model::*;
use crate::telemetry::metrics;

impl super::Db {
    /// All non-deleted tickets, newest first.
    pub async fn fetch_tickets(&self) -> Result<Vec<Ticket>> {
        let start = Instant::now();
        let rows: Vec<TicketRow> = sqlx::query_as(
            "SELECT id, ticket_number, title, description, status, priority, sla_due_date, sla_breached, assigned_to, category, created_at, resolved_at, first_response_at
             FROM tickets
             WHERE deleted_at IS NULL
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        record_fetch("tickets", rows.len(), start);
        Ok(rows.into_iter().map(Ticket::from).collect())
    }

    /// All service requests, newest first.
    pub async fn fetch_service_requests(&self) -> Result<Vec<ServiceRequest>> {
        let start = Instant::now();
        let rows: Vec<ServiceRequestRow> = sqlx::query_as(
            "SELECT id, request_number, title, description, status, priority, sla_due_date, sla_breached, assigned_to, catalog_item, created_at, fulfilled_at, first_response_at
             FROM service_requests
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        record_fetch("service_requests", rows.len(), start);
        Ok(rows.into_iter().map(ServiceRequest::from).collect())
    }

    /// All problems, newest first.
    pub async fn fetch_problems(&self) -> Result<Vec<Problem>> {
        let start = Instant::now();
        let rows: Vec<ProblemRow> = sqlx::query_as(
            "SELECT id, problem_number, title, description, status, priority, sla_due_date, sla_breached, assigned_to, created_at, resolved_at
             FROM problems
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        record_fetch("problems", rows.len(), start);
        Ok(rows.into_iter().map(Problem::from).collect())
    }

    /// All active (non-deleted) devices.
    pub async fn fetch_devices(&self) -> Result<Vec<Device>> {
        let start = Instant::now();
        let rows: Vec<DeviceRow> = sqlx::query_as(
            "SELECT id, asset_tag, name, device_type, status, assigned_to, created_at
             FROM devices
             WHERE deleted_at IS NULL
             ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        record_fetch("devices", rows.len(), start);
        Ok(rows.into_iter().map(Device::from).collect())
    }

    /// Fetch every table. The four queries are independent and run
    /// concurrently on the pool.
    pub async fn fetch_snapshot(&self) -> Result<Snapshot> {
        let (tickets, service_requests, problems, devices) = tokio::try_join!(
            self.fetch_tickets(),
            self.fetch_service_requests(),
            self.fetch_problems(),
            self.fetch_devices(),
        )?;
        Ok(Snapshot {
            tickets,
            service_requests,
            problems,
            devices,
        })
    }
}

fn record_fetch(table: &'static str, rows: usize, start: Instant) {
    let ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!(table, rows, duration_ms = ms, "records fetched");
    metrics::records_fetched().add(rows as u64, &[KeyValue::new("table", table)]);
    metrics::operation_duration_ms().record(ms, &[KeyValue::new("operation", "db.fetch")]);
}

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// Internal row type for sqlx::FromRow.
#[derive(sqlx::FromRow)]
struct TicketRow {
    id: i64,
    ticket_number: Option<String>,
    title: Option<String>,
    description: Option<String>,
    status: String,
    priority: String,
    sla_due_date: Option<DateTime<Utc>>,
    sla_breached: Option<bool>,
    assigned_to: Option<Uuid>,
    category: Option<String>,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
    first_response_at: Option<DateTime<Utc>>,
}

impl From<TicketRow> for Ticket {
    fn from(row: TicketRow) -> Self {
        Ticket {
            id: row.id,
            ticket_number: row.ticket_number.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            description: row.description,
            status: Status::parse(&row.status),
            priority: Priority::parse(&row.priority),
            sla_due_date: row.sla_due_date,
            sla_breached: row.sla_breached,
            assigned_to: row.assigned_to,
            category: row.category,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
            first_response_at: row.first_response_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ServiceRequestRow {
    id: i64,
    request_number: Option<String>,
    title: Option<String>,
    description: Option<String>,
    status: String,
    priority: String,
    sla_due_date: Option<DateTime<Utc>>,
    sla_breached: Option<bool>,
    assigned_to: Option<Uuid>,
    catalog_item: Option<String>,
    created_at: DateTime<Utc>,
    fulfilled_at: Option<DateTime<Utc>>,
    first_response_at: Option<DateTime<Utc>>,
}

impl From<ServiceRequestRow> for ServiceRequest {
    fn from(row: ServiceRequestRow) -> Self {
        ServiceRequest {
            id: row.id,
            request_number: row.request_number.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            description: row.description,
            status: Status::parse(&row.status),
            priority: Priority::parse(&row.priority),
            sla_due_date: row.sla_due_date,
            sla_breached: row.sla_breached,
            assigned_to: row.assigned_to,
            catalog_item: row.catalog_item,
            created_at: row.created_at,
            fulfilled_at: row.fulfilled_at,
            first_response_at: row.first_response_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProblemRow {
    id: i64,
    problem_number: Option<String>,
    title: Option<String>,
    description: Option<String>,
    status: String,
    priority: String,
    sla_due_date: Option<DateTime<Utc>>,
    sla_breached: Option<bool>,
    assigned_to: Option<Uuid>,
    created_at: DateTime<Utc>,
    resolved_at: Option<DateTime<Utc>>,
}

impl From<ProblemRow> for Problem {
    fn from(row: ProblemRow) -> Self {
        Problem {
            id: row.id,
            problem_number: row.problem_number.unwrap_or_default(),
            title: row.title.unwrap_or_default(),
            description: row.description,
            status: Status::parse(&row.status),
            priority: Priority::parse(&row.priority),
            sla_due_date: row.sla_due_date,
            sla_breached: row.sla_breached,
            assigned_to: row.assigned_to,
            created_at: row.created_at,
            resolved_at: row.resolved_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct DeviceRow {
    id: i64,
    asset_tag: Option<String>,
    name: Option<String>,
    device_type: Option<String>,
    status: Option<String>,
    assigned_to: Option<Uuid>,
    created_at: DateTime<Utc>,
}

impl From<DeviceRow> for Device {
    fn from(row: DeviceRow) -> Self {
        Device {
            id: row.id,
            asset_tag: row.asset_tag.unwrap_or_default(),
            name: row.name.unwrap_or_default(),
            device_type: row.device_type.unwrap_or_default(),
            status: row.status.unwrap_or_default(),
            assigned_to: row.assigned_to,
            created_at: row.created_at,
        }
    }
}
