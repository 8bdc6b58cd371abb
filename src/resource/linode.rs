//! Linode instances
//!
//! The only mutable resource: `label` and `group` can be changed locally with
//! [`Linode::rename`] / [`MutableObject::update`] and pushed with `save()`.

use super::str_or_empty;
use crate::error::Result;
use crate::object::{MutableObject, ResourceKind};
use crate::validation::{Constraint, Format, Schema, ValueKind};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::OnceLock;

/// A Linode compute instance (read-write)
pub struct LinodeKind;

pub type Linode = MutableObject<LinodeKind>;

const STATUSES: &[&str] = &[
    "offline",
    "booting",
    "running",
    "shutting_down",
    "rebooting",
    "provisioning",
    "deleting",
    "migrating",
];

/// Power state reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinodeStatus {
    Offline,
    Booting,
    Running,
    ShuttingDown,
    Rebooting,
    Provisioning,
    Deleting,
    Migrating,
}

impl LinodeStatus {
    fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "offline" => Self::Offline,
            "booting" => Self::Booting,
            "running" => Self::Running,
            "shutting_down" => Self::ShuttingDown,
            "rebooting" => Self::Rebooting,
            "provisioning" => Self::Provisioning,
            "deleting" => Self::Deleting,
            "migrating" => Self::Migrating,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Offline => "offline",
            Self::Booting => "booting",
            Self::Running => "running",
            Self::ShuttingDown => "shutting_down",
            Self::Rebooting => "rebooting",
            Self::Provisioning => "provisioning",
            Self::Deleting => "deleting",
            Self::Migrating => "migrating",
        }
    }
}

impl fmt::Display for LinodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ResourceKind for LinodeKind {
    const COLLECTION: &'static str = "/linodes";

    fn schema() -> &'static Schema {
        static SCHEMA: OnceLock<Schema> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            let timestamp = || {
                [
                    Constraint::Type(ValueKind::String),
                    Constraint::Format(Format::DateTime),
                ]
            };
            Schema::new()
                .field("id", [Constraint::Type(ValueKind::Int)])
                .writable(
                    "label",
                    [
                        Constraint::Type(ValueKind::String),
                        Constraint::NotNull,
                        Constraint::Length {
                            min: Some(3),
                            max: Some(32),
                        },
                        Constraint::Format(Format::Label),
                    ],
                )
                .writable(
                    "group",
                    [
                        Constraint::Type(ValueKind::String),
                        Constraint::Length {
                            min: None,
                            max: Some(50),
                        },
                    ],
                )
                .field(
                    "status",
                    [
                        Constraint::Type(ValueKind::String),
                        Constraint::Choice(STATUSES),
                    ],
                )
                .field(
                    "hypervisor",
                    [
                        Constraint::Type(ValueKind::String),
                        Constraint::Choice(&["kvm", "xen"]),
                    ],
                )
                .field("datacenter", [Constraint::Type(ValueKind::String)])
                .field("distribution", [Constraint::Type(ValueKind::String)])
                .field("ipv4", [Constraint::Type(ValueKind::Array)])
                .field(
                    "ipv6",
                    [
                        Constraint::Type(ValueKind::String),
                        Constraint::Format(Format::Ipv6),
                    ],
                )
                .field("created", timestamp())
                .field("updated", timestamp())
        })
    }
}

impl Linode {
    /// Numeric id; `None` for an object not yet backed by the API
    pub fn id(&self) -> Option<u64> {
        self.get("id").as_u64()
    }

    pub fn label(&self) -> &str {
        str_or_empty(self.get("label"))
    }

    pub fn group(&self) -> Option<&str> {
        self.get("group").as_str()
    }

    pub fn status(&self) -> Option<LinodeStatus> {
        self.get("status").as_str().and_then(LinodeStatus::parse)
    }

    pub fn datacenter(&self) -> Option<&str> {
        self.get("datacenter").as_str()
    }

    pub fn ipv4(&self) -> Vec<&str> {
        self.get("ipv4")
            .as_array()
            .map(|ips| ips.iter().filter_map(|ip| ip.as_str()).collect())
            .unwrap_or_default()
    }

    /// Stage a new label; call `save()` to push it
    pub fn rename(&mut self, label: &str) -> Result<()> {
        let mut data = Map::new();
        data.insert("label".to_string(), Value::String(label.to_string()));
        self.update(&data)
    }

    /// Stage a new display group (`None` clears it)
    pub fn set_group(&mut self, group: Option<&str>) -> Result<()> {
        let mut data = Map::new();
        data.insert(
            "group".to_string(),
            group.map_or(Value::Null, |g| Value::String(g.to_string())),
        );
        self.update(&data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{LinodeClient, DEFAULT_API_URL};
    use serde_json::json;

    fn linode() -> Linode {
        let client = LinodeClient::new(None, DEFAULT_API_URL).unwrap();
        let data = json!({
            "id": 123,
            "label": "web-01",
            "group": "production",
            "status": "running",
            "hypervisor": "kvm",
            "datacenter": "newark",
            "ipv4": ["192.0.2.10"],
            "ipv6": "2600:3c03::f03c:91ff:fe24:3a2f/64",
            "created": "2016-06-21T16:00:38",
            "updated": "2016-06-22T09:12:00"
        });
        Linode::new(client, data.as_object().unwrap()).unwrap()
    }

    #[test]
    fn test_accessors() {
        let linode = linode();
        assert_eq!(linode.id(), Some(123));
        assert_eq!(linode.status(), Some(LinodeStatus::Running));
        assert_eq!(linode.ipv4(), vec!["192.0.2.10"]);
        assert_eq!(linode.endpoint(), "/linodes/123");
    }

    #[test]
    fn test_rename_validates_label() {
        let mut linode = linode();
        linode.rename("web-02").unwrap();
        assert_eq!(linode.label(), "web-02");

        let err = linode.rename("x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "[label] This value is too short. It should have 3 characters or more."
        );
        let err = linode.rename("web--03").unwrap_err();
        assert_eq!(err.to_string(), "[label] This value is not valid.");
        assert_eq!(linode.label(), "web-02");
    }

    #[test]
    fn test_set_group() {
        let mut linode = linode();
        linode.set_group(None).unwrap();
        assert_eq!(linode.group(), None);
        linode.set_group(Some("staging")).unwrap();
        assert_eq!(linode.group(), Some("staging"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let client = LinodeClient::new(None, DEFAULT_API_URL).unwrap();
        let data = json!({"id": 1, "label": "web-01", "status": "melting"});
        let err = Linode::new(client, data.as_object().unwrap()).unwrap_err();
        assert_eq!(
            err.message(),
            "[status] The value you selected is not a valid choice."
        );
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for s in STATUSES {
            assert_eq!(LinodeStatus::parse(s).map(LinodeStatus::as_str), Some(*s));
        }
    }
}
