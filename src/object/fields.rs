use super::ResourceKind;
use crate::error::ValidationError;
use serde_json::{Map, Value};
use std::marker::PhantomData;

static NULL: Value = Value::Null;

/// The declared field values of one object of kind `K`.
///
/// Holds exactly the names the kind's schema declares; undeclared names can
/// never be inserted.
pub struct Fields<K: ResourceKind> {
    values: Map<String, Value>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> Clone for Fields<K> {
    fn clone(&self) -> Self {
        Self {
            values: self.values.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K: ResourceKind> std::fmt::Debug for Fields<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map().entries(self.values.iter()).finish()
    }
}

impl<K: ResourceKind> PartialEq for Fields<K> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<K: ResourceKind> Fields<K> {
    /// All declared fields, set to `null`
    pub(crate) fn declared() -> Self {
        let values = K::schema()
            .fields()
            .iter()
            .map(|f| (f.name.to_string(), Value::Null))
            .collect();

        Self {
            values,
            _kind: PhantomData,
        }
    }

    /// Overlay the declared keys of `data`
    pub(crate) fn hydrate(&mut self, data: &Map<String, Value>) {
        for (key, value) in data {
            if let Some(slot) = self.values.get_mut(key) {
                *slot = value.clone();
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        K::schema().check(&self.values)
    }

    /// Whether the kind declares `name`, whatever its value
    pub fn has(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Current value of a declared field, `null` for undeclared names
    pub fn get(&self, name: &str) -> &Value {
        self.values.get(name).unwrap_or(&NULL)
    }

    pub fn id(&self) -> &Value {
        self.get("id")
    }

    pub fn endpoint(&self) -> String {
        K::endpoint_for(self.id())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }

    /// The writable subset, as sent on save
    pub fn writable(&self) -> Map<String, Value> {
        K::schema()
            .writable_fields()
            .map(|name| (name.to_string(), self.get(name).clone()))
            .collect()
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.values.clone())
    }
}
