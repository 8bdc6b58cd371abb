//! Resource definitions
//!
//! Each concrete resource is a zero-sized kind type carrying its collection
//! path and field schema, plus typed accessors on the object it names.
//!
//! # Architecture
//!
//! - [`collection`] - List/get/create against a collection endpoint
//! - [`datacenter`], [`kernel`], [`distribution`] - Read-only resources
//! - [`linode`] - Linode instances, the one mutable resource
//!
//! # Example
//!
//! ```ignore
//! use linode::api::LinodeClient;
//!
//! async fn labels(client: &LinodeClient) -> linode::Result<Vec<String>> {
//!     let datacenters = client.datacenters().list().await?;
//!     Ok(datacenters.iter().map(|d| d.label().to_string()).collect())
//! }
//! ```

pub mod collection;
pub mod datacenter;
pub mod distribution;
pub mod kernel;
pub mod linode;

pub use collection::{Collection, Page};
pub use datacenter::{Datacenter, DatacenterKind};
pub use distribution::{Distribution, DistributionKind};
pub use kernel::{Kernel, KernelKind};
pub use linode::{Linode, LinodeKind, LinodeStatus};

use serde_json::Value;

fn str_or_empty(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

fn bool_or_false(value: &Value) -> bool {
    value.as_bool().unwrap_or(false)
}
