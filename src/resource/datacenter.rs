//! Datacenters

use super::str_or_empty;
use crate::object::{ImmutableObject, ResourceKind};
use crate::validation::{Constraint, Schema, ValueKind};
use std::sync::OnceLock;

/// A Linode datacenter (read-only)
pub struct DatacenterKind;

pub type Datacenter = ImmutableObject<DatacenterKind>;

impl ResourceKind for DatacenterKind {
    const COLLECTION: &'static str = "/datacenters";

    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::new()
                .field(
                    "id",
                    [Constraint::Type(ValueKind::String), Constraint::NotBlank],
                )
                .field(
                    "label",
                    [Constraint::Type(ValueKind::String), Constraint::NotNull],
                )
                .field(
                    "country",
                    [
                        Constraint::Type(ValueKind::String),
                        Constraint::Length {
                            min: Some(2),
                            max: Some(2),
                        },
                    ],
                )
        })
    }
}

impl Datacenter {
    pub fn id(&self) -> &str {
        str_or_empty(self.get("id"))
    }

    /// Human-readable location, e.g. `Newark, NJ`
    pub fn label(&self) -> &str {
        str_or_empty(self.get("label"))
    }

    /// ISO 3166 alpha-2 country code, if the API reports one
    pub fn country(&self) -> Option<&str> {
        self.get("country").as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LinodeClient, DEFAULT_API_URL};
    use crate::object::ObjectBuilder;
    use serde_json::json;

    fn client() -> LinodeClient {
        LinodeClient::new(None, DEFAULT_API_URL).unwrap()
    }

    #[test]
    fn test_get_endpoint() {
        let datacenter = ObjectBuilder::<DatacenterKind>::new(client()).build_unchecked();
        assert_eq!(datacenter.endpoint(), "/datacenters");

        let datacenter = ObjectBuilder::<DatacenterKind>::new(client())
            .with_field("id", "newark")
            .build_unchecked();
        assert_eq!(datacenter.endpoint(), "/datacenters/newark");
    }

    #[test]
    fn test_accessors() {
        let data = json!({"id": "newark", "label": "Newark, NJ", "country": "us"});
        let datacenter = Datacenter::new(client(), data.as_object().unwrap()).unwrap();
        assert_eq!(datacenter.id(), "newark");
        assert_eq!(datacenter.label(), "Newark, NJ");
        assert_eq!(datacenter.country(), Some("us"));
    }

    #[test]
    fn test_blank_id_is_rejected() {
        let data = json!({"id": "", "label": "Nowhere"});
        let err = Datacenter::new(client(), data.as_object().unwrap()).unwrap_err();
        assert_eq!(err.message(), "[id] This value should not be blank.");
    }

    #[test]
    fn test_country_must_be_two_letters() {
        let data = json!({"id": "london", "label": "London, UK", "country": "gbr"});
        let err = Datacenter::new(client(), data.as_object().unwrap()).unwrap_err();
        assert_eq!(
            err.message(),
            "[country] This value is too long. It should have 2 characters or less."
        );
    }
}
