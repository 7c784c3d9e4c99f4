//! Tests for record parsing at the boundary and the unified request view.

use chrono::{TimeZone, Utc};
use helpdesk_rs::error::Error;
use helpdesk_rs::model::*;
use serde_json::json;

fn snapshot_json() -> serde_json::Value {
    json!({
        "tickets": [
            {
                "id": 1,
                "ticket_number": "INC-0001",
                "title": "Laptop will not boot",
                "description": "Black screen after update",
                "status": "in_progress",
                "priority": "high",
                "sla_due_date": "2024-02-01 09:00:00+00",
                "sla_breached": null,
                "assignee_id": "6f1c2a4e-0b1d-4c4f-9a57-1d2e3f405061",
                "created_at": "2024-02-01T08:00:00Z"
            },
            {
                "id": 2,
                "ticket_number": "INC-0002",
                "title": "Password reset",
                "status": "awaiting_customer",
                "priority": "low",
                "sla_due_date": "",
                "created_at": "2024-02-01 07:00:00"
            }
        ],
        "service_requests": [
            {
                "id": 1,
                "request_number": "REQ-0001",
                "title": "Second monitor",
                "status": "fulfilled",
                "priority": "medium",
                "created_at": "2024-02-01T08:00:00Z",
                "fulfilled_at": "2024-02-02T08:00:00Z"
            }
        ],
        "devices": [
            {
                "id": 100,
                "asset_tag": "AST-100",
                "name": "build-server",
                "device_type": "server",
                "status": "active",
                "created_at": "2023-11-01"
            }
        ]
    })
}

#[test]
fn snapshot_parses_mixed_timestamp_shapes() {
    let snapshot = Snapshot::from_json(&snapshot_json().to_string()).unwrap();

    assert_eq!(snapshot.tickets.len(), 2);
    assert_eq!(snapshot.service_requests.len(), 1);
    assert!(snapshot.problems.is_empty());
    assert_eq!(snapshot.devices.len(), 1);

    let first = &snapshot.tickets[0];
    assert_eq!(
        first.sla_due_date,
        Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap())
    );
    assert_eq!(first.sla_breached, None);
    assert!(first.assigned_to.is_some(), "assignee_id alias is accepted");
    assert_eq!(first.status, Status::InProgress);

    let second = &snapshot.tickets[1];
    assert_eq!(second.sla_due_date, None);
    assert_eq!(second.status, Status::Other("awaiting_customer".to_string()));
    assert_eq!(
        second.created_at,
        Utc.with_ymd_and_hms(2024, 2, 1, 7, 0, 0).unwrap()
    );

    assert_eq!(
        snapshot.devices[0].created_at,
        Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap()
    );
}

#[test]
fn missing_created_at_is_an_invalid_record() {
    let json = json!({
        "tickets": [{ "id": 1, "status": "open", "priority": "low" }]
    });
    let err = Snapshot::from_json(&json.to_string()).unwrap_err();
    assert!(matches!(err, Error::InvalidRecord(_)), "got {err:?}");
}

#[test]
fn unparsable_created_at_is_an_invalid_record() {
    let json = json!({
        "tickets": [{
            "id": 1,
            "status": "open",
            "priority": "low",
            "created_at": "yesterday"
        }]
    });
    let err = Snapshot::from_json(&json.to_string()).unwrap_err();
    assert!(matches!(err, Error::InvalidRecord(_)), "got {err:?}");
}

#[test]
fn malformed_json_is_a_json_error() {
    let err = Snapshot::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)), "got {err:?}");
}

#[test]
fn empty_document_is_an_empty_snapshot() {
    assert_eq!(Snapshot::from_json("{}").unwrap(), Snapshot::default());
}

#[test]
fn unknown_codes_round_trip_through_serde() {
    let snapshot = Snapshot::from_json(&snapshot_json().to_string()).unwrap();
    let out = serde_json::to_value(&snapshot.tickets[1]).unwrap();
    assert_eq!(out["status"], "awaiting_customer");
    assert_eq!(out["priority"], "low");
    assert!(out["sla_due_date"].is_null());
}

#[test]
fn unify_sorts_newest_first_with_stable_ties() {
    let snapshot = Snapshot::from_json(&snapshot_json().to_string()).unwrap();
    let requests = snapshot.requests();

    let order: Vec<(RequestType, i64)> = requests.iter().map(|r| (r.request_type, r.id)).collect();
    // INC-0001 and REQ-0001 share created_at; tickets sort first.
    assert_eq!(
        order,
        vec![
            (RequestType::Ticket, 1),
            (RequestType::ServiceRequest, 1),
            (RequestType::Ticket, 2),
        ]
    );
}

#[test]
fn service_request_fulfilment_maps_to_resolution() {
    let snapshot = Snapshot::from_json(&snapshot_json().to_string()).unwrap();
    let requests = snapshot.requests();
    let req = requests
        .iter()
        .find(|r| r.request_type == RequestType::ServiceRequest)
        .unwrap();
    assert_eq!(
        req.resolved_at,
        Some(Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap())
    );
    assert_eq!(req.number, "REQ-0001");
    assert!(!req.sla_breached);
}

#[test]
fn request_type_parsing() {
    assert_eq!("ticket".parse::<RequestType>().unwrap(), RequestType::Ticket);
    assert_eq!(
        "Service_Request".parse::<RequestType>().unwrap(),
        RequestType::ServiceRequest
    );
    assert!("change".parse::<RequestType>().is_err());
}

#[test]
fn snapshot_loads_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");
    std::fs::write(&path, snapshot_json().to_string()).unwrap();

    let snapshot = Snapshot::load(&path).unwrap();
    assert_eq!(snapshot.tickets.len(), 2);

    assert!(matches!(
        Snapshot::load(dir.path().join("missing.json")),
        Err(Error::Io(_))
    ));
}
