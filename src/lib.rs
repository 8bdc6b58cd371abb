//! Linode API v4 client
//!
//! Resources fetched from the API are hydrated into validated objects: an
//! object whose fields break their declared constraints is never created.
//!
//! # Module Structure
//!
//! - [`api`] - Client, HTTP transport and error formatting
//! - [`object`] - Immutable and mutable resource objects and their builder
//! - [`validation`] - Per-field constraints and the schema that checks them
//! - [`resource`] - Concrete resource kinds and collection access
//! - [`config`] - Persistent token/endpoint configuration
//!
//! # Example
//!
//! ```ignore
//! use linode::api::{LinodeClient, DEFAULT_API_URL};
//!
//! async fn example() -> linode::Result<()> {
//!     let client = LinodeClient::new(Some("token"), DEFAULT_API_URL)?;
//!     let mut web = client.linodes().get(123).await?;
//!     web.rename("web-02")?;
//!     web.save().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod object;
pub mod resource;
pub mod validation;

pub use api::LinodeClient;
pub use error::{Error, Result, TransportError, ValidationError};
pub use object::{ImmutableObject, MutableObject, ObjectBuilder, ResourceKind};
pub use resource::{Datacenter, Distribution, Kernel, Linode};
