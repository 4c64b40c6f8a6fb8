//! Integration tests for resource snapshots.
//!
//! Snapshots never touch the network, so these tests use a real connection
//! that is never asked to send anything.

use box_sdk::resources::{Collaboration, CollaborationStatus, File, Folder, Info, Role, User};
use box_sdk::{AccessToken, BoxApiConnection, BoxConfig};
use chrono::{TimeZone, Utc};
use serde_json::{json, Value};

fn offline_api() -> BoxApiConnection {
    let config = BoxConfig::builder()
        .access_token(AccessToken::new("test-token").unwrap())
        .build()
        .unwrap();
    BoxApiConnection::new(config).unwrap()
}

fn folder_info(json: &str) -> Info<Folder> {
    Info::from_json_str(Folder::new(offline_api(), "11"), json).unwrap()
}

// ============================================================================
// Pending-change round trip
// ============================================================================

#[test]
fn test_fresh_snapshot_has_no_pending_changes() {
    let info = folder_info(r#"{"type": "folder", "id": "11", "name": "Docs", "size": 3}"#);

    assert!(!info.has_pending_changes());
    assert!(info.pending_changes().is_empty());
}

#[test]
fn test_set_then_update_round_trip() {
    let mut info = folder_info(r#"{"type": "folder", "id": "11", "name": "Docs"}"#);

    info.set("name", "Papers");
    let pending = info.pending_changes();
    assert_eq!(Value::Object(pending), json!({"name": "Papers"}));

    let server = json!({"type": "folder", "id": "11", "name": "Papers"});
    info.update(server.as_object().unwrap());

    assert!(!info.is_pending("name"));
    assert!(!info.has_pending_changes());
    assert_eq!(info.name(), Some("Papers"));
}

#[test]
fn test_update_without_the_field_keeps_it_pending() {
    let mut info = folder_info(r#"{"type": "folder", "id": "11"}"#);
    info.set_description("draft");

    let server = json!({"etag": "2"});
    info.update(server.as_object().unwrap());

    assert!(info.is_pending("description"));
    assert_eq!(info.etag(), Some("2"));
}

#[test]
fn test_setting_the_same_field_twice_keeps_latest_value() {
    let mut info = Info::new(File::new(offline_api(), "99"));
    info.set_name("a.txt");
    info.set_name("b.txt");

    assert_eq!(Value::Object(info.pending_changes()), json!({"name": "b.txt"}));
    assert_eq!(info.name(), Some("b.txt"));
}

// ============================================================================
// Typed field interpretation
// ============================================================================

#[test]
fn test_typed_view_and_raw_fields_agree() {
    let info = folder_info(
        r#"{
            "type": "folder",
            "id": "11",
            "name": "Docs",
            "modified_at": "2024-05-06T07:08:09+02:00",
            "owned_by": {"type": "user", "id": "3", "login": "owner@example.com"},
            "extra": [1, 2, 3]
        }"#,
    );

    assert_eq!(info.get("name"), Some(&json!("Docs")));
    assert_eq!(
        info.modified_at(),
        Some(Utc.with_ymd_and_hms(2024, 5, 6, 5, 8, 9).unwrap())
    );
    assert_eq!(info.owned_by().unwrap().login(), Some("owner@example.com"));
    assert_eq!(info.get("extra"), Some(&json!([1, 2, 3])));
}

#[test]
fn test_bad_timestamp_keeps_raw_value() {
    let info = folder_info(r#"{"type": "folder", "id": "11", "created_at": "not a date"}"#);

    assert!(info.created_at().is_none());
    assert_eq!(info.get("created_at"), Some(&json!("not a date")));
}

#[test]
fn test_null_clears_typed_field() {
    let mut info = folder_info(r#"{"type": "folder", "id": "11", "description": "x"}"#);
    info.set("description", Value::Null);

    assert!(info.description().is_none());
    assert_eq!(info.get("description"), Some(&Value::Null));
    assert!(info.is_pending("description"));
}

#[test]
fn test_collaboration_setters_use_api_values() {
    let mut info = Info::new(Collaboration::new(offline_api(), "5"));
    info.set_role(Role::CoOwner);
    info.set_status(CollaborationStatus::Rejected);

    assert_eq!(
        Value::Object(info.pending_changes()),
        json!({"role": "co-owner", "status": "rejected"})
    );
    assert_eq!(info.role(), Some(Role::CoOwner));
    assert_eq!(info.status(), Some(CollaborationStatus::Rejected));
}

#[test]
fn test_user_snapshot_from_json_text() {
    let info = Info::from_json_str(
        User::new(offline_api(), "7"),
        r#"{"type": "user", "id": "7", "name": "Ann", "max_upload_size": 2147483648}"#,
    )
    .unwrap();

    assert_eq!(info.id(), "7");
    assert_eq!(info.name(), Some("Ann"));
    assert_eq!(info.max_upload_size(), Some(2_147_483_648));
    assert_eq!(info.into_json()["type"], "user");
}
