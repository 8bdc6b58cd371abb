//! Read-write resource objects
//!
//! Same hydration and validation as [`ImmutableObject`](super::ImmutableObject),
//! plus the three calls that round-trip to the API. Fields still cannot be
//! written one at a time: changes go through [`MutableObject::update`] or
//! [`MutableObject::refresh`], which replace the declared fields together and
//! re-validate before anything is committed.

use super::{Fields, ObjectBuilder, ResourceKind, ResourceObject};
use crate::api::LinodeClient;
use crate::error::{Error, Result, ValidationError};
use serde_json::{Map, Value};

pub struct MutableObject<K: ResourceKind> {
    client: LinodeClient,
    fields: Fields<K>,
    deleted: bool,
}

impl<K: ResourceKind> std::fmt::Debug for MutableObject<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MutableObject")
            .field("endpoint", &self.endpoint())
            .field("fields", &self.fields)
            .field("deleted", &self.deleted)
            .finish()
    }
}

impl<K: ResourceKind> MutableObject<K> {
    /// Hydrate from `data` and validate
    pub fn new(client: LinodeClient, data: &Map<String, Value>) -> std::result::Result<Self, ValidationError> {
        ObjectBuilder::new(client).hydrate(data).build_mutable()
    }

    pub(crate) fn from_parts(client: LinodeClient, fields: Fields<K>) -> Self {
        Self {
            client,
            fields,
            deleted: false,
        }
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

    /// Same rule as the immutable variant: single-field writes are refused
    /// for declared names and dropped for anything else
    pub fn set(&self, name: &str, _value: impl Into<Value>) -> std::result::Result<(), ValidationError> {
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

    /// True once [`delete`](Self::delete) has succeeded
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Overlay `data` on the current fields and re-validate.
    ///
    /// All-or-nothing: on a violation the previous values are kept.
    pub fn update(&mut self, data: &Map<String, Value>) -> Result<()> {
        self.ensure_live()?;
        self.initialize(data)?;
        Ok(())
    }

    fn initialize(&mut self, data: &Map<String, Value>) -> std::result::Result<(), ValidationError> {
        let mut candidate = self.fields.clone();
        candidate.hydrate(data);
        candidate.validate()?;
        self.fields = candidate;
        Ok(())
    }

    /// Re-fetch the resource and re-hydrate from the response
    pub async fn refresh(&mut self) -> Result<()> {
        let endpoint = self.item_endpoint()?;
        let data = self.client.get(&endpoint).await?;
        self.initialize(&data)?;
        Ok(())
    }

    /// Send the writable fields to the item endpoint
    pub async fn save(&self) -> Result<()> {
        let endpoint = self.item_endpoint()?;
        let body = Value::Object(self.fields.writable());
        self.client.put(&endpoint, &body).await?;
        Ok(())
    }

    /// Remove the remote resource. The object is stale afterwards.
    pub async fn delete(&mut self) -> Result<()> {
        let endpoint = self.item_endpoint()?;
        self.client.delete(&endpoint).await?;
        self.deleted = true;
        tracing::info!("Deleted {}", endpoint);
        Ok(())
    }

    fn ensure_live(&self) -> Result<()> {
        if self.deleted {
            return Err(Error::Stale {
                endpoint: self.endpoint(),
            });
        }
        Ok(())
    }

    /// Item path for round trips; never the collection path
    fn item_endpoint(&self) -> Result<String> {
        self.ensure_live()?;
        if self.fields.id().is_null() {
            return Err(Error::MissingId {
                collection: K::COLLECTION,
            });
        }
        Ok(self.endpoint())
    }
}

impl<K: ResourceKind> ResourceObject for MutableObject<K> {
    type Kind = K;

    fn construct(client: LinodeClient, data: &Map<String, Value>) -> std::result::Result<Self, ValidationError> {
        Self::new(client, data)
    }

    fn fields(&self) -> &Fields<K> {
        &self.fields
    }
}
