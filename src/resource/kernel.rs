//! Kernels

use super::{bool_or_false, str_or_empty};
use crate::object::{ImmutableObject, ResourceKind};
use crate::validation::{Constraint, Format, Schema, ValueKind};
use std::sync::OnceLock;

/// A kernel a Linode can boot (read-only)
pub struct KernelKind;

pub type Kernel = ImmutableObject<KernelKind>;

impl ResourceKind for KernelKind {
    const COLLECTION: &'static str = "/kernels";

    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            let flag = || [Constraint::Type(ValueKind::Bool), Constraint::NotNull];
            Schema::new()
                .field(
                    "id",
                    [Constraint::Type(ValueKind::String), Constraint::NotBlank],
                )
                .field(
                    "label",
                    [Constraint::Type(ValueKind::String), Constraint::NotNull],
                )
                .field("version", [Constraint::Type(ValueKind::String)])
                .field("x64", flag())
                .field("kvm", flag())
                .field("xen", flag())
                .field("deprecated", flag())
                .field(
                    "created",
                    [
                        Constraint::Type(ValueKind::String),
                        Constraint::Format(Format::DateTime),
                    ],
                )
        })
    }
}

impl Kernel {
    pub fn id(&self) -> &str {
        str_or_empty(self.get("id"))
    }

    pub fn label(&self) -> &str {
        str_or_empty(self.get("label"))
    }

    pub fn version(&self) -> Option<&str> {
        self.get("version").as_str()
    }

    pub fn is_x64(&self) -> bool {
        bool_or_false(self.get("x64"))
    }

    pub fn is_kvm(&self) -> bool {
        bool_or_false(self.get("kvm"))
    }

    pub fn is_xen(&self) -> bool {
        bool_or_false(self.get("xen"))
    }

    pub fn is_deprecated(&self) -> bool {
        bool_or_false(self.get("deprecated"))
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
        let kernel = ObjectBuilder::<KernelKind>::new(client()).build_unchecked();
        assert_eq!(kernel.endpoint(), "/kernels");

        let kernel = ObjectBuilder::<KernelKind>::new(client())
            .with_field("id", 1_234_567)
            .build_unchecked();
        assert_eq!(kernel.endpoint(), "/kernels/1234567");
    }

    #[test]
    fn test_flags() {
        let data = json!({
            "id": "linode/4.5.5-x86_64-linode69",
            "label": "Latest 64 bit (4.5.5-x86_64-linode69)",
            "version": "4.5.5",
            "x64": true,
            "kvm": true,
            "xen": false,
            "deprecated": false,
            "created": "2016-05-31T21:24:43"
        });
        let kernel = Kernel::new(client(), data.as_object().unwrap()).unwrap();
        assert!(kernel.is_x64());
        assert!(kernel.is_kvm());
        assert!(!kernel.is_xen());
        assert!(!kernel.is_deprecated());
        assert_eq!(kernel.version(), Some("4.5.5"));
        assert_eq!(kernel.endpoint(), "/kernels/linode/4.5.5-x86_64-linode69");
    }

    #[test]
    fn test_missing_flag_is_rejected() {
        let data = json!({"id": "linode/latest", "label": "Latest", "x64": true});
        let err = Kernel::new(client(), data.as_object().unwrap()).unwrap_err();
        assert_eq!(err.message(), "[kvm] This value should not be null.");
    }
}
