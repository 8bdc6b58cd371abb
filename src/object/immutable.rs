//! Read-only resource objects

use super::{Fields, ObjectBuilder, ResourceKind, ResourceObject};
use crate::api::LinodeClient;
use crate::error::ValidationError;
use serde_json::{Map, Value};

/// A validated, read-only resource.
///
/// There is no `&mut self` method on this type: once built, its fields can
/// only be read. [`set`](Self::set) exists for parity with the mutable
/// variant and always refuses declared names.
pub struct ImmutableObject<K: ResourceKind> {
    client: LinodeClient,
    fields: Fields<K>,
}

impl<K: ResourceKind> Clone for ImmutableObject<K> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            fields: self.fields.clone(),
        }
    }
}

impl<K: ResourceKind> std::fmt::Debug for ImmutableObject<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImmutableObject")
            .field("endpoint", &self.endpoint())
            .field("fields", &self.fields)
            .finish()
    }
}

impl<K: ResourceKind> ImmutableObject<K> {
    /// Hydrate from `data` and validate
    pub fn new(client: LinodeClient, data: &Map<String, Value>) -> Result<Self, ValidationError> {
        ObjectBuilder::new(client).hydrate(data).build()
    }

    pub(crate) fn from_parts(client: LinodeClient, fields: Fields<K>) -> Self {
        Self { client, fields }
    }

    pub fn client(&self) -> &LinodeClient {
        &self.client
    }

    pub fn has_field(&self, name: &str) -> bool {
        self.fields.has(name)
    }

    pub fn get(&self, name: &str) -> &Value {
        self.fields.get(name)
    }

    /// Declared names are frozen; writes to anything else are dropped
    pub fn set(&self, name: &str, _value: impl Into<Value>) -> Result<(), ValidationError> {
        if self.fields.has(name) {
            return Err(ValidationError::immutable());
        }
        Ok(())
    }

    pub fn endpoint(&self) -> String {
        self.fields.endpoint()
    }

    pub fn fields(&self) -> &Fields<K> {
        &self.fields
    }
}

impl<K: ResourceKind> ResourceObject for ImmutableObject<K> {
    type Kind = K;

    fn construct(client: LinodeClient, data: &Map<String, Value>) -> Result<Self, ValidationError> {
        Self::new(client, data)
    }

    fn fields(&self) -> &Fields<K> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::DEFAULT_API_URL;
    use crate::validation::{Constraint, Schema, ValueKind};
    use serde_json::json;
    use std::sync::OnceLock;

    struct ProbeKind;

    impl ResourceKind for ProbeKind {
        const COLLECTION: &'static str = "/probes";

        fn schema() -> &'static Schema {
            static SCHEMA: OnceLock<Schema> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                Schema::new()
                    .field("id", [Constraint::Type(ValueKind::Int)])
                    .field("flag", [Constraint::Type(ValueKind::Bool), Constraint::NotNull])
                    .field("note", [Constraint::Type(ValueKind::String)])
            })
        }
    }

    fn client() -> LinodeClient {
        LinodeClient::new(None, DEFAULT_API_URL).unwrap()
    }

    fn data(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_absent_fields_stay_null() {
        let object = ImmutableObject::<ProbeKind>::new(client(), &data(json!({"flag": true})))
            .unwrap();
        assert_eq!(object.get("flag"), &json!(true));
        assert!(object.get("note").is_null());
        assert!(object.has_field("note"));
    }

    #[test]
    fn test_unknown_keys_are_not_stored() {
        let object = ImmutableObject::<ProbeKind>::new(
            client(),
            &data(json!({"flag": false, "extra": "ignored"})),
        )
        .unwrap();
        assert!(!object.has_field("extra"));
        assert!(object.get("extra").is_null());
        assert_eq!(object.fields().as_map().len(), 3);
    }

    #[test]
    fn test_set_asymmetry() {
        let object = ImmutableObject::<ProbeKind>::new(client(), &data(json!({"flag": true})))
            .unwrap();
        assert_eq!(
            object.set("note", "hello").unwrap_err().message(),
            "This object is immutable."
        );
        assert!(object.set("unknown", 1).is_ok());
        assert!(!object.has_field("unknown"));
        assert!(object.get("note").is_null());
    }

    #[test]
    fn test_endpoint_follows_id() {
        let object = ObjectBuilder::<ProbeKind>::new(client()).build_unchecked();
        assert_eq!(object.endpoint(), "/probes");

        let object = ObjectBuilder::<ProbeKind>::new(client())
            .with_field("id", 7)
            .build_unchecked();
        assert_eq!(object.endpoint(), "/probes/7");
    }
}
