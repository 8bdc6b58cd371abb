//! Resource objects
//!
//! A resource object is a validated snapshot of one remote entity. Objects
//! are produced by [`ObjectBuilder`]: the builder collects the declared
//! fields of a [`ResourceKind`], runs the kind's [`Schema`], and only then
//! hands out an [`ImmutableObject`] or a [`MutableObject`]. An object that
//! fails validation is never created.

mod fields;
mod immutable;
mod mutable;

pub use fields::Fields;
pub use immutable::ImmutableObject;
pub use mutable::MutableObject;

use crate::api::LinodeClient;
use crate::error::ValidationError;
use crate::validation::Schema;
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// A concrete resource type: its collection path and its declared fields.
pub trait ResourceKind: Send + Sync + 'static {
    /// Collection path, e.g. `/datacenters`
    const COLLECTION: &'static str;

    /// Declared fields and their constraints
    fn schema() -> &'static Schema;

    /// Collection path when `id` is null, item path otherwise
    fn endpoint_for(id: &Value) -> String {
        match id {
            Value::Null => Self::COLLECTION.to_string(),
            Value::String(s) => format!("{}/{}", Self::COLLECTION, s),
            other => format!("{}/{}", Self::COLLECTION, other),
        }
    }

    /// Key holding the items in a list response when the `data` envelope is absent
    fn items_key() -> &'static str {
        Self::COLLECTION.trim_start_matches('/')
    }
}

/// Anything a collection can hydrate from a response item.
pub trait ResourceObject: Sized {
    type Kind: ResourceKind;

    fn construct(client: LinodeClient, data: &Map<String, Value>) -> Result<Self, ValidationError>;

    fn fields(&self) -> &Fields<Self::Kind>;
}

/// Populates declared fields, then validates once on build.
pub struct ObjectBuilder<K: ResourceKind> {
    client: LinodeClient,
    fields: Fields<K>,
    _kind: PhantomData<fn() -> K>,
}

impl<K: ResourceKind> ObjectBuilder<K> {
    /// Every declared field starts out as `null`
    pub fn new(client: LinodeClient) -> Self {
        Self {
            client,
            fields: Fields::declared(),
            _kind: PhantomData,
        }
    }

    /// Copy the declared keys of `data`; everything else is ignored
    pub fn hydrate(mut self, data: &Map<String, Value>) -> Self {
        self.fields.hydrate(data);
        self
    }

    /// Set one declared field. Undeclared names are ignored.
    pub fn with_field(mut self, name: &str, value: impl Into<Value>) -> Self {
        let mut data = Map::new();
        data.insert(name.to_string(), value.into());
        self.fields.hydrate(&data);
        self
    }

    /// Validate and freeze
    pub fn build(self) -> Result<ImmutableObject<K>, ValidationError> {
        self.fields.validate()?;
        Ok(ImmutableObject::from_parts(self.client, self.fields))
    }

    /// Validate and hand out a mutable object
    pub fn build_mutable(self) -> Result<MutableObject<K>, ValidationError> {
        self.fields.validate()?;
        Ok(MutableObject::from_parts(self.client, self.fields))
    }

    /// Freeze without validating. Test fixtures only.
    #[cfg(test)]
    pub(crate) fn build_unchecked(self) -> ImmutableObject<K> {
        ImmutableObject::from_parts(self.client, self.fields)
    }
}
