//! Catalog API access.
//!
//! # Modules
//!
//! - `endpoint`: discover vs. search URL construction
//! - `response`: status/body classification into movies or a `QueryError`
//! - `client`: the `CatalogTransport` seam and its `reqwest` implementation
//! - `service`: `MovieQueryService`, the never-failing query entry point

pub mod client;
pub mod endpoint;
pub mod response;
pub mod service;

pub use client::{CatalogTransport, HttpCatalog};
pub use endpoint::{CatalogEndpoint, DEFAULT_API_BASE_URL};
pub use response::{parse_response, RawResponse};
pub use service::MovieQueryService;
