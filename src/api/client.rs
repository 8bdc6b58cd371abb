//! Linode Client
//!
//! Owns the transport configuration (base URL, optional token, HTTP client)
//! and exposes the resource collections. Cloning is cheap: every resource
//! object holds its own clone and never mutates it.

use super::http::LinodeHttpClient;
use crate::error::{Result, TransportError};
use crate::object::{ImmutableObject, MutableObject, ResourceKind};
use crate::resource::{
    Collection, DatacenterKind, DistributionKind, KernelKind, LinodeKind,
};
use serde_json::{Map, Value};
use url::Url;

/// Production API root
pub const DEFAULT_API_URL: &str = "https://api.linode.com/v4";

/// Main Linode client
#[derive(Clone)]
pub struct LinodeClient {
    http: LinodeHttpClient,
    base_url: Url,
    token: Option<String>,
}

impl std::fmt::Debug for LinodeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinodeClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl LinodeClient {
    /// Create a new client. `token` may be omitted for public endpoints.
    pub fn new(token: Option<&str>, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)?;
        let http = LinodeHttpClient::new()?;

        Ok(Self {
            http,
            base_url,
            token: token.map(str::to_string),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build the absolute URL of an endpoint path such as `/kernels/42`
    pub fn api_url(&self, endpoint: &str) -> std::result::Result<Url, TransportError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = endpoint.trim_start_matches('/');
        Ok(Url::parse(&format!("{}/{}", base, path))?)
    }

    /// GET an endpoint, expecting a JSON object back
    pub async fn get(&self, endpoint: &str) -> Result<Map<String, Value>> {
        self.get_with_query(endpoint, &[]).await
    }

    /// GET an endpoint with query parameters
    pub async fn get_with_query(
        &self,
        endpoint: &str,
        query: &[(&str, String)],
    ) -> Result<Map<String, Value>> {
        let url = self.api_url(endpoint)?;
        let value = self
            .http
            .get(url.as_str(), self.token.as_deref(), query)
            .await?;
        Ok(into_object(value)?)
    }

    /// POST a JSON body to an endpoint
    pub async fn post(&self, endpoint: &str, body: &Value) -> Result<Map<String, Value>> {
        let url = self.api_url(endpoint)?;
        let value = self
            .http
            .post(url.as_str(), self.token.as_deref(), body)
            .await?;
        Ok(into_object(value)?)
    }

    /// PUT a JSON body to an endpoint. The response body is returned as-is.
    pub async fn put(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let url = self.api_url(endpoint)?;
        Ok(self
            .http
            .put(url.as_str(), self.token.as_deref(), body)
            .await?)
    }

    /// DELETE an endpoint
    pub async fn delete(&self, endpoint: &str) -> Result<()> {
        let url = self.api_url(endpoint)?;
        self.http.delete(url.as_str(), self.token.as_deref()).await?;
        Ok(())
    }

    // =========================================================================
    // Resource collections
    // =========================================================================

    pub fn datacenters(&self) -> Collection<'_, ImmutableObject<DatacenterKind>> {
        Collection::new(self)
    }

    pub fn kernels(&self) -> Collection<'_, ImmutableObject<KernelKind>> {
        Collection::new(self)
    }

    pub fn distributions(&self) -> Collection<'_, ImmutableObject<DistributionKind>> {
        Collection::new(self)
    }

    pub fn linodes(&self) -> Collection<'_, MutableObject<LinodeKind>> {
        Collection::new(self)
    }

    /// Generic accessor for any kind
    pub fn collection<K: ResourceKind>(&self) -> Collection<'_, ImmutableObject<K>> {
        Collection::new(self)
    }
}

fn into_object(value: Value) -> std::result::Result<Map<String, Value>, TransportError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Map::new()),
        other => Err(TransportError::Body(format!(
            "expected a JSON object, got {}",
            json_type_name(&other)
        ))),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
