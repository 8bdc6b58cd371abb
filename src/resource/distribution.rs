//! Distributions

use super::{bool_or_false, str_or_empty};
use crate::object::{ImmutableObject, ResourceKind};
use crate::validation::{Constraint, Format, Schema, ValueKind};
use std::sync::OnceLock;

/// An installable Linux distribution image (read-only)
pub struct DistributionKind;

pub type Distribution = ImmutableObject<DistributionKind>;

impl ResourceKind for DistributionKind {
    const COLLECTION: &'static str = "/distributions";

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
                .field("vendor", [Constraint::Type(ValueKind::String)])
                .field(
                    "x64",
                    [Constraint::Type(ValueKind::Bool), Constraint::NotNull],
                )
                .field("recommended", [Constraint::Type(ValueKind::Bool)])
                .field("deprecated", [Constraint::Type(ValueKind::Bool)])
                .field("disk_minimum", [Constraint::Type(ValueKind::Int)])
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

impl Distribution {
    pub fn id(&self) -> &str {
        str_or_empty(self.get("id"))
    }

    pub fn label(&self) -> &str {
        str_or_empty(self.get("label"))
    }

    pub fn vendor(&self) -> Option<&str> {
        self.get("vendor").as_str()
    }

    pub fn is_x64(&self) -> bool {
        bool_or_false(self.get("x64"))
    }

    pub fn is_recommended(&self) -> bool {
        bool_or_false(self.get("recommended"))
    }

    /// Smallest disk (MB) the image fits on
    pub fn disk_minimum(&self) -> Option<u64> {
        self.get("disk_minimum").as_u64()
    }
}
