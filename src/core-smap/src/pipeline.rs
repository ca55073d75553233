use chrono::Utc;
use data_model_smap::SitemapConfig;
use std::sync::Arc;
use url::Url;

use crate::aggregate::aggregate;
use crate::errors::Result;
use crate::records::record_entries;
use crate::render::render;
use crate::routes::route_entries;
use crate::sources::{ModelRegistry, RouteRegistry};

/// Generates the sitemap document for a site from its routes and its data models.
#[derive(Clone)]
pub struct SitemapGenerator {
    routes: Arc<dyn RouteRegistry>,
    models: ModelRegistry,
    base_url: Url,
    config: SitemapConfig,
}

impl SitemapGenerator {
    pub fn new(routes: Arc<dyn RouteRegistry>, models: ModelRegistry, base_url: Url, config: SitemapConfig) -> Self {
        SitemapGenerator {
            routes,
            models,
            base_url,
            config,
        }
    }

    pub fn config(&self) -> &SitemapConfig {
        &self.config
    }

    /// Collects route and record entries, merges them and renders the XML document.
    ///
    /// Fails only if the routes cannot be listed or the document cannot be written.
    pub async fn generate(&self) -> Result<Vec<u8>> {
        let defaults = self.config.entry_defaults(Utc::now().fixed_offset());

        let routes = route_entries(self.routes.as_ref(), &self.base_url, &defaults).await?;
        let records = record_entries(&self.models, &self.config.models, &defaults).await;
        let (route_count, record_count) = (routes.len(), records.len());

        let entries = aggregate(routes, records);
        tracing::info!(
            routes = route_count,
            records = record_count,
            entries = entries.len(),
            "generated sitemap"
        );

        render(&entries)
    }
}
