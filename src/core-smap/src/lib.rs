//! # Dynamic Sitemap Generation Library
//!
//! Builds an XML sitemap for a web application from two kinds of sources:
//!
//! - the site's own routes: every GET endpoint tagged [`SITEMAPPABLE`], with path parameters
//!   stripped from its template
//! - data model records: for each configured model, every record its inclusion filter returns,
//!   with hints taken from the record or from the configured defaults
//!
//! Entries are deduplicated by location (records override routes), sorted newest first,
//! rendered per the sitemaps.org protocol and cached for a configurable lifetime.
//!
//! ## Examples
//!
//! ```no_run
//! use core_smap::{Endpoint, MemoryCacheStore, ModelRegistry, RouteTable, SITEMAPPABLE, SitemapGenerator, SitemapService};
//! use data_model_smap::SitemapConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let routes = RouteTable::from(vec![Endpoint::new(["GET"], "about", [SITEMAPPABLE])]);
//!     let generator = SitemapGenerator::new(
//!         Arc::new(routes),
//!         ModelRegistry::new(),
//!         url::Url::parse("https://example.com")?,
//!         SitemapConfig::default(),
//!     );
//!     let service = SitemapService::new(generator, Arc::new(MemoryCacheStore::new()));
//!
//!     let response = service.serve().await?;
//!     println!("{}", String::from_utf8(response.body)?);
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod cache;
pub mod common;
mod errors;
pub mod json_model;
pub mod manifest;
pub mod memory;
pub mod parse;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod routes;
pub mod sources;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

// Public API re-exports
pub use aggregate::aggregate;
pub use cache::{SitemapResponse, SitemapService};
pub use errors::{Result, SitemapError};
pub use pipeline::SitemapGenerator;
pub use records::record_entries;
pub use render::{SITEMAP_CONTENT_TYPE, SITEMAP_NAMESPACE, render};
pub use routes::{absolute_url, normalize_path, route_entries};
pub use sources::{CacheStore, Endpoint, ModelRegistry, RouteRegistry, SITEMAPPABLE, SitemapModel, Sitemappable};

// Additional exports for advanced usage
pub use common::health::health_check;
pub use common::hostname::{HostPortError, get_api_base_url, get_site_base_url, site_base_url};
pub use common::logging::setup_logging;
pub use json_model::{JsonModel, JsonRecord, json_models};
pub use manifest::SiteManifest;
pub use memory::{MemoryCacheStore, RouteTable};
pub use parse::parse_sitemap;
