//! Integration tests for aggregates and report metrics.

use chrono::{DateTime, NaiveDate, TimeDelta, TimeZone, Utc};
use helpdesk_rs::model::*;
use helpdesk_rs::sla::SlaStatus;
use helpdesk_rs::stats::*;
use uuid::Uuid;

fn at(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, d, h, 0, 0).unwrap()
}

fn now() -> DateTime<Utc> {
    at(20, 0)
}

fn ticket(id: i64, status: Status, priority: Priority, created: DateTime<Utc>) -> Ticket {
    Ticket {
        id,
        ticket_number: format!("INC-{id:04}"),
        title: format!("Ticket {id}"),
        description: None,
        status,
        priority,
        sla_due_date: None,
        sla_breached: None,
        assigned_to: None,
        category: None,
        created_at: created,
        resolved_at: None,
        first_response_at: None,
    }
}

fn device(id: i64, device_type: &str) -> Device {
    Device {
        id,
        asset_tag: format!("AST-{id}"),
        name: format!("device-{id}"),
        device_type: device_type.to_string(),
        status: "active".to_string(),
        assigned_to: None,
        created_at: at(1, 0),
    }
}

/// Four tickets: two done (one resolved, one closed), one open and overdue,
/// one on hold and at risk.
fn sample() -> Vec<Ticket> {
    let mut resolved = ticket(1, Status::Resolved, Priority::High, at(1, 0));
    resolved.resolved_at = Some(at(1, 10));
    resolved.first_response_at = Some(at(1, 1));

    let mut closed = ticket(2, Status::Closed, Priority::Low, at(1, 12));
    closed.resolved_at = Some(at(2, 8)); // 20h
    closed.first_response_at = Some(at(1, 15)); // 3h
    closed.assigned_to = Some(Uuid::new_v4());

    let mut overdue = ticket(3, Status::Open, Priority::Urgent, at(3, 0));
    overdue.sla_due_date = Some(now() - TimeDelta::hours(1));

    let mut at_risk = ticket(4, Status::OnHold, Priority::High, at(3, 5));
    at_risk.sla_due_date = Some(now() + TimeDelta::minutes(30));
    at_risk.assigned_to = Some(Uuid::new_v4());

    vec![resolved, closed, overdue, at_risk]
}

// ---------------------------------------------------------------------------
// Buckets
// ---------------------------------------------------------------------------

#[test]
fn aggregate_of_nothing_is_empty() {
    let records: Vec<Ticket> = Vec::new();
    assert!(aggregate(&records, by_status).is_empty());
    assert!(aggregate(&records, by_priority).is_empty());
}

#[test]
fn counts_per_status_and_priority() {
    let records = sample();

    let by_status = aggregate(&records, by_status);
    assert_eq!(by_status.get(&Status::Resolved), Some(&1));
    assert_eq!(by_status.get(&Status::Closed), Some(&1));
    assert_eq!(by_status.get(&Status::Open), Some(&1));
    assert_eq!(by_status.get(&Status::OnHold), Some(&1));
    assert_eq!(by_status.values().sum::<usize>(), records.len());

    let by_priority = aggregate(&records, by_priority);
    assert_eq!(by_priority.get(&Priority::High), Some(&2));
    assert_eq!(by_priority.get(&Priority::Medium), None);
    // Sorted by severity
    let keys: Vec<_> = by_priority.keys().cloned().collect();
    assert_eq!(keys, vec![Priority::Urgent, Priority::High, Priority::Low]);
}

#[test]
fn counts_per_day_and_sla_bucket() {
    let records = sample();

    let per_day = aggregate(&records, by_created_day);
    assert_eq!(per_day.get(&NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()), Some(&2));
    assert_eq!(per_day.get(&NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()), Some(&2));

    let per_sla = aggregate(&records, by_sla_status::<Ticket>(now()));
    assert_eq!(per_sla.get(&SlaStatus::OnTrack), Some(&2));
    assert_eq!(per_sla.get(&SlaStatus::AtRisk), Some(&1));
    assert_eq!(per_sla.get(&SlaStatus::Breached), Some(&1));
}

#[test]
fn counts_per_request_type() {
    let requests = unify(
        sample(),
        vec![ServiceRequest {
            id: 10,
            request_number: "REQ-0010".to_string(),
            title: "Access to shared drive".to_string(),
            description: None,
            status: Status::Open,
            priority: Priority::Low,
            sla_due_date: None,
            sla_breached: None,
            assigned_to: None,
            catalog_item: None,
            created_at: at(4, 0),
            fulfilled_at: None,
            first_response_at: None,
        }],
    );
    let per_type = aggregate(&requests, by_request_type);
    assert_eq!(per_type.get(&Some(RequestType::Ticket)), Some(&4));
    assert_eq!(per_type.get(&Some(RequestType::ServiceRequest)), Some(&1));
}

#[test]
fn devices_bucket_by_normalized_type() {
    let devices = vec![
        device(1, "Laptop"),
        device(2, "laptop "),
        device(3, "printer"),
        device(4, ""),
    ];
    let per_type = aggregate(&devices, by_device_type);
    assert_eq!(per_type.get("laptop"), Some(&2));
    assert_eq!(per_type.get("printer"), Some(&1));
    assert_eq!(per_type.get("unknown"), Some(&1));
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

#[test]
fn report_metrics_over_sample() {
    let m = ReportMetrics::compute(&sample(), now());
    assert_eq!(m.total, 4);
    assert_eq!(m.resolution_rate, 50);
    // (10h + 20h) / 2
    assert_eq!(m.mean_resolution_hours, 15.0);
    // (1h + 3h) / 2
    assert_eq!(m.mean_first_response_hours, 2.0);
    assert_eq!(m.sla_breached, 1);
    assert_eq!(m.sla_compliance, 75);
}

#[test]
fn report_metrics_on_empty_collection() {
    let records: Vec<Ticket> = Vec::new();
    let m = ReportMetrics::compute(&records, now());
    assert_eq!(m.total, 0);
    assert_eq!(m.resolution_rate, 0);
    assert_eq!(m.mean_resolution_hours, 0.0);
    assert_eq!(m.mean_first_response_hours, 0.0);
    assert_eq!(m.sla_compliance, 100);
}

#[test]
fn fulfilled_service_requests_count_toward_resolution_time_only() {
    let request = ServiceRequest {
        id: 1,
        request_number: "REQ-0001".to_string(),
        title: "Monitor".to_string(),
        description: None,
        status: Status::Fulfilled,
        priority: Priority::Low,
        sla_due_date: None,
        sla_breached: None,
        assigned_to: None,
        catalog_item: None,
        created_at: at(1, 0),
        fulfilled_at: Some(at(1, 6)),
        first_response_at: None,
    };
    let m = ReportMetrics::compute(&[request], now());
    // Resolution rate counts resolved + closed only
    assert_eq!(m.resolution_rate, 0);
    assert_eq!(m.mean_resolution_hours, 6.0);
}

#[test]
fn means_round_to_one_decimal() {
    let mut a = ticket(1, Status::Resolved, Priority::Low, at(1, 0));
    a.resolved_at = Some(at(1, 0) + TimeDelta::minutes(20));
    let mut b = ticket(2, Status::Resolved, Priority::Low, at(1, 0));
    b.resolved_at = Some(at(1, 0) + TimeDelta::minutes(40));
    // mean 30 min = 0.5h
    assert_eq!(ReportMetrics::compute(&[a, b], now()).mean_resolution_hours, 0.5);
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

#[test]
fn dashboard_tiles() {
    let summary = DashboardSummary::compute(&sample(), now());
    assert_eq!(summary.total, 4);
    assert_eq!(summary.open, 2);
    // overdue ticket is unassigned, at-risk ticket is assigned
    assert_eq!(summary.unassigned, 1);
    assert_eq!(summary.at_risk, 1);
    assert_eq!(summary.breached, 1);
    assert_eq!(summary.by_status.values().sum::<usize>(), 4);
}

#[test]
fn dashboard_is_deterministic() {
    let records = sample();
    assert_eq!(
        DashboardSummary::compute(&records, now()),
        DashboardSummary::compute(&records, now())
    );
}
