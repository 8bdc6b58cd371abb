//! Linode API interaction module
//!
//! # Module Structure
//!
//! - [`client`] - Main Linode client: base URL, token and resource collections
//! - [`http`] - HTTP utilities for REST API calls
//!
//! # Example
//!
//! ```ignore
//! use linode::api::{LinodeClient, DEFAULT_API_URL};
//!
//! async fn example() -> linode::Result<()> {
//!     let client = LinodeClient::new(None, DEFAULT_API_URL)?;
//!     let kernels = client.kernels().list().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod http;

pub use client::{LinodeClient, DEFAULT_API_URL};
pub use http::format_api_error;
