use super::*;
use std::str::FromStr;
use uuid::Uuid;

#[test]
fn test_typed_id_from_uuid() {
    let uuid = Uuid::new_v4();
    let id = CustomerId::from_uuid(uuid);
    assert_eq!(id.into_inner(), uuid);
    assert_eq!(CustomerId::from(uuid), id);
}

#[test]
fn test_typed_id_display_matches_uuid() {
    let uuid = Uuid::new_v4();
    assert_eq!(PaymentId::from_uuid(uuid).to_string(), uuid.to_string());
}

#[test]
fn test_typed_id_from_str() {
    let uuid = Uuid::new_v4();
    let id = CustomerId::from_str(&uuid.to_string()).unwrap();
    assert_eq!(id.into_inner(), uuid);
    assert!(CustomerId::from_str("not-a-uuid").is_err());
}

#[test]
fn test_typed_id_serializes_transparently() {
    let uuid = Uuid::new_v4();
    let json = serde_json::to_string(&CustomerId::from_uuid(uuid)).unwrap();
    assert_eq!(json, format!("\"{uuid}\""));
}
