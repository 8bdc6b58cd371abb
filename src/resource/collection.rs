//! Resource Collections
//!
//! Fetches resources of one kind and hydrates them into validated objects.

use crate::api::LinodeClient;
use crate::error::{Error, Result, TransportError};
use crate::object::{MutableObject, ResourceKind, ResourceObject};
use serde_json::{Map, Value};
use std::marker::PhantomData;

/// One page of a list response
pub struct Page<O> {
    pub items: Vec<O>,
    pub page: u64,
    pub pages: u64,
}

/// Typed access to one collection endpoint
pub struct Collection<'a, O: ResourceObject> {
    client: &'a LinodeClient,
    _object: PhantomData<fn() -> O>,
}

impl<'a, O: ResourceObject> Collection<'a, O> {
    pub(crate) fn new(client: &'a LinodeClient) -> Self {
        Self {
            client,
            _object: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        O::Kind::COLLECTION
    }

    /// Fetch all items (auto-paginate)
    pub async fn list(&self) -> Result<Vec<O>> {
        let mut all_items = Vec::new();
        let mut page = 1;

        loop {
            let result = self.list_page(page).await?;
            all_items.extend(result.items);

            if page >= result.pages {
                break;
            }
            page += 1;
        }

        Ok(all_items)
    }

    /// Fetch one page
    pub async fn list_page(&self, page: u64) -> Result<Page<O>> {
        let response = self
            .client
            .get_with_query(self.endpoint(), &[("page", page.to_string())])
            .await?;

        let items = extract_items(&response, O::Kind::items_key())?
            .into_iter()
            .map(|item| O::construct(self.client.clone(), item))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let current = read_u64(&response, "page").unwrap_or(page);
        let pages = read_u64(&response, "pages")
            .or_else(|| read_u64(&response, "total_pages"))
            .unwrap_or(current);

        tracing::debug!(
            "Fetched {} items from {} (page {}/{})",
            items.len(),
            self.endpoint(),
            current,
            pages
        );

        Ok(Page {
            items,
            page: current,
            pages,
        })
    }

    /// Fetch a single item by id
    pub async fn get(&self, id: impl Into<Value>) -> Result<O> {
        let id = id.into();
        if id.is_null() {
            return Err(Error::MissingId {
                collection: self.endpoint(),
            });
        }
        let endpoint = O::Kind::endpoint_for(&id);
        let data = self.client.get(&endpoint).await?;
        Ok(O::construct(self.client.clone(), &data)?)
    }
}

impl<'a, K: ResourceKind> Collection<'a, MutableObject<K>> {
    /// Create a resource and hydrate the object the API returns
    pub async fn create(&self, data: &Map<String, Value>) -> Result<MutableObject<K>> {
        let response = self
            .client
            .post(self.endpoint(), &Value::Object(data.clone()))
            .await?;
        let object = MutableObject::new(self.client.clone(), &response)?;
        tracing::info!("Created {}", object.endpoint());
        Ok(object)
    }
}

fn read_u64(response: &Map<String, Value>, key: &str) -> Option<u64> {
    response.get(key).and_then(|v| v.as_u64())
}

/// Items live under `data`, or under the collection name on older responses
fn extract_items<'r>(
    response: &'r Map<String, Value>,
    key: &str,
) -> std::result::Result<Vec<&'r Map<String, Value>>, TransportError> {
    let Some(items) = response.get("data").or_else(|| response.get(key)) else {
        return Ok(Vec::new());
    };

    let Some(items) = items.as_array() else {
        return Err(TransportError::Body(format!(
            "expected an array of {} items",
            key
        )));
    };

    items
        .iter()
        .map(|item| {
            item.as_object().ok_or_else(|| {
                TransportError::Body(format!("expected {} items to be objects", key))
            })
        })
        .collect()
}
