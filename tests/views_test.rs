//! Tests for saved filter views.

use helpdesk_rs::error::Error;
use helpdesk_rs::filter::{AssigneeFilter, SlaFilter};
use helpdesk_rs::model::{Priority, RequestType};
use helpdesk_rs::views::{SavedView, ViewRegistry};
use std::path::Path;

fn write(dir: &Path, file: &str, content: &str) {
    std::fs::write(dir.join(file), content).unwrap();
}

#[test]
fn parses_a_view() {
    let view = SavedView::from_toml(
        r#"
        [view]
        name = "urgent-breaches"
        description = "Urgent tickets past their SLA"
        priority = "urgent"
        type = "ticket"
        sla = "breached"
        "#,
    )
    .unwrap();

    assert_eq!(view.name, "urgent-breaches");
    let filter = view.filter().unwrap();
    assert_eq!(filter.priority, Some(Priority::Urgent));
    assert_eq!(filter.request_type, Some(RequestType::Ticket));
    assert_eq!(filter.sla, Some(SlaFilter::Breached));
    assert!(filter.status.is_none());
}

#[test]
fn view_with_bad_value_fails_to_build_a_filter() {
    let view = SavedView::from_toml(
        r#"
        [view]
        name = "broken"
        assignee = "not-a-uuid"
        "#,
    )
    .unwrap();
    assert!(matches!(view.filter(), Err(Error::InvalidFilter(_))));
}

#[test]
fn loads_all_toml_files_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "unassigned.toml",
        "[view]\nname = \"unassigned\"\nassignee = \"unassigned\"\n",
    );
    write(
        dir.path(),
        "at-risk.toml",
        "[view]\nname = \"at-risk\"\nsla = \"at_risk\"\n",
    );
    write(dir.path(), "README.md", "not a view");

    let registry = ViewRegistry::load_from_dir(dir.path()).unwrap();
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.names(), vec!["at-risk", "unassigned"]);

    let filter = registry.get("unassigned").unwrap().filter().unwrap();
    assert_eq!(filter.assignee, Some(AssigneeFilter::Unassigned));
    assert!(registry.get("missing").is_none());
}

#[test]
fn malformed_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "bad.toml", "[view\nname = ");

    let err = ViewRegistry::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

#[test]
fn unusable_preset_is_rejected_at_load() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "late.toml",
        "[view]\nname = \"late\"\nsla = \"late\"\n",
    );

    let err = ViewRegistry::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Config(_)), "got {err:?}");
}

#[test]
fn missing_dir_is_empty_registry() {
    let dir = tempfile::tempdir().unwrap();
    let registry = ViewRegistry::load_from_dir(&dir.path().join("nope")).unwrap();
    assert!(registry.is_empty());
}
