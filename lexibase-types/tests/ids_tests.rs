use lexibase_types::{ClientId, CommitId};
use std::str::FromStr;
use uuid::Uuid;

// ── CommitId ─────────────────────────────────────────────────────

#[test]
fn commit_ids_are_unique() {
    let a = CommitId::new();
    let b = CommitId::new();
    assert_ne!(a, b);
}

#[test]
fn commit_id_display_parse_roundtrip() {
    let id = CommitId::new();
    let parsed = CommitId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn commit_id_from_uuid_is_lossless() {
    let uuid = Uuid::new_v4();
    let id = CommitId::from_uuid(uuid);
    assert_eq!(id.as_uuid(), uuid);
}

#[test]
fn commit_id_new_sorts_after_earlier_ids() {
    // UUID v7 embeds the creation time.
    let earlier = CommitId::new();
    std::thread::sleep(std::time::Duration::from_millis(2));
    let later = CommitId::new();
    assert!(earlier < later);
}

#[test]
fn commit_id_rejects_garbage() {
    assert!(CommitId::parse("not-a-uuid").is_err());
    assert!(CommitId::from_str("").is_err());
}

// ── ClientId ─────────────────────────────────────────────────────

#[test]
fn client_ids_are_unique() {
    assert_ne!(ClientId::new(), ClientId::new());
}

#[test]
fn client_id_display_parse_roundtrip() {
    let id = ClientId::new();
    let parsed: ClientId = id.to_string().parse().unwrap();
    assert_eq!(id, parsed);
}

#[test]
fn client_id_serializes_as_bare_uuid() {
    let uuid = Uuid::new_v4();
    let id = ClientId::from_uuid(uuid);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
