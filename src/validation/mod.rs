//! Field validation
//!
//! Each resource kind declares a [`Schema`]: an ordered list of fields, each
//! with the constraints its value has to satisfy. [`Schema::validate`] walks
//! the fields in declaration order and the constraints in the order they were
//! attached, so the first [`Violation`] it reports is deterministic.
//!
//! Every constraint except [`Constraint::NotNull`] and [`Constraint::NotBlank`]
//! accepts `null`; nullability is a separate rule.

mod constraint;

pub use constraint::{Constraint, Format, ValueKind};

use crate::error::ValidationError;
use serde_json::{Map, Value};

/// A field declared by a resource kind
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub constraints: Vec<Constraint>,
    /// Whether `save()` sends this field back to the API
    pub writable: bool,
}

/// A single failed constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub property_path: String,
    pub message: String,
}

impl Violation {
    /// `[<field>] <message>`
    pub fn to_message(&self) -> String {
        format!("[{}] {}", self.property_path, self.message)
    }
}

impl From<Violation> for ValidationError {
    fn from(violation: Violation) -> Self {
        ValidationError::new(violation.to_message())
    }
}

/// Declared fields of a resource kind and their constraints
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a read-only field
    pub fn field(self, name: &'static str, constraints: impl Into<Vec<Constraint>>) -> Self {
        self.push(name, constraints.into(), false)
    }

    /// Declare a field that is sent back on save
    pub fn writable(self, name: &'static str, constraints: impl Into<Vec<Constraint>>) -> Self {
        self.push(name, constraints.into(), true)
    }

    fn push(mut self, name: &'static str, constraints: Vec<Constraint>, writable: bool) -> Self {
        debug_assert!(
            !self.declares(name),
            "field `{name}` declared twice"
        );
        self.fields.push(FieldSpec {
            name,
            constraints,
            writable,
        });
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn declares(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Names of the fields sent back to the API on save
    pub fn writable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().filter(|f| f.writable).map(|f| f.name)
    }

    /// Check every declared field. Missing keys are treated as `null`.
    pub fn validate(&self, values: &Map<String, Value>) -> Vec<Violation> {
        let mut violations = Vec::new();

        for field in &self.fields {
            let value = values.get(field.name).unwrap_or(&Value::Null);
            for constraint in &field.constraints {
                if let Some(message) = constraint.check(value) {
                    violations.push(Violation {
                        property_path: field.name.to_string(),
                        message,
                    });
                }
            }
        }

        violations
    }

    /// Validate and turn the first violation into an error
    pub fn check(&self, values: &Map<String, Value>) -> Result<(), ValidationError> {
        match self.validate(values).into_iter().next() {
            Some(violation) => Err(violation.into()),
            None => Ok(()),
        }
    }
}
