//! Construction, validation and write-protection of resource objects
//!
//! Uses a single-field kind (`flag`: bool, not null) so each rule can be
//! exercised in isolation.

use linode::api::LinodeClient;
use linode::object::{ImmutableObject, MutableObject, ResourceKind};
use linode::validation::{Constraint, Schema, ValueKind};
use serde_json::{json, Map, Value};
use std::sync::OnceLock;

struct FlagKind;

impl ResourceKind for FlagKind {
    const COLLECTION: &'static str = "/flags";

    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new().field(
                "flag",
                [Constraint::Type(ValueKind::Bool), Constraint::NotNull],
            )
        })
    }
}

fn client() -> LinodeClient {
    LinodeClient::new(None, "https://api.alpha.linode.com/v4").expect("valid base URL")
}

fn data(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object literal")
}

#[test]
fn test_constructor_valid_data() {
    let object = ImmutableObject::<FlagKind>::new(client(), &data(json!({"flag": true})))
        .expect("valid data should construct");

    assert!(object.has_field("flag"));
    assert!(!object.has_field("unknown"));
    assert_eq!(object.get("flag"), &json!(true));
}

#[test]
fn test_constructor_invalid_data() {
    let err = ImmutableObject::<FlagKind>::new(client(), &data(json!({"flag": "true"})))
        .unwrap_err();
    assert_eq!(err.message(), "[flag] This value should be of type bool.");
}

#[test]
fn test_constructor_empty_data() {
    let err = ImmutableObject::<FlagKind>::new(client(), &data(json!({"flag": null})))
        .unwrap_err();
    assert_eq!(err.message(), "[flag] This value should not be null.");

    let err = ImmutableObject::<FlagKind>::new(client(), &Map::new()).unwrap_err();
    assert_eq!(err.message(), "[flag] This value should not be null.");
}

#[test]
fn test_immutable_object() {
    let object = ImmutableObject::<FlagKind>::new(client(), &data(json!({"flag": true})))
        .expect("valid data should construct");

    let err = object.set("flag", false).unwrap_err();
    assert_eq!(err.message(), "This object is immutable.");
    assert_eq!(object.get("flag"), &json!(true));
}

#[test]
fn test_undeclared_write_is_dropped() {
    let object = ImmutableObject::<FlagKind>::new(client(), &data(json!({"flag": true})))
        .expect("valid data should construct");

    assert!(object.set("unknown", "value").is_ok());
    assert!(!object.has_field("unknown"));
    assert!(object.get("unknown").is_null());
}

#[test]
fn test_unknown_keys_in_data_are_ignored() {
    let object = ImmutableObject::<FlagKind>::new(
        client(),
        &data(json!({"flag": false, "colour": "blue"})),
    )
    .expect("extra keys should not fail construction");

    assert_eq!(object.get("flag"), &json!(false));
    assert!(!object.has_field("colour"));
}

#[test]
fn test_mutable_object_shares_construction_rules() {
    let err = MutableObject::<FlagKind>::new(client(), &data(json!({"flag": 1}))).unwrap_err();
    assert_eq!(err.message(), "[flag] This value should be of type bool.");

    let object = MutableObject::<FlagKind>::new(client(), &data(json!({"flag": true})))
        .expect("valid data should construct");
    assert_eq!(
        object.set("flag", false).unwrap_err().message(),
        "This object is immutable."
    );
    assert!(object.set("unknown", false).is_ok());
}

#[test]
fn test_endpoint_without_id_is_collection() {
    let object = ImmutableObject::<FlagKind>::new(client(), &data(json!({"flag": true})))
        .expect("valid data should construct");
    assert_eq!(object.endpoint(), "/flags");
    assert_eq!(FlagKind::endpoint_for(&json!(42)), "/flags/42");
    assert_eq!(FlagKind::endpoint_for(&json!("abc")), "/flags/abc");
}
