use axum::extract::State;
use core_smap::{SitemapError, SitemapResponse, SitemapService};
use std::sync::Arc;

/// GET /sitemap.xml - The site's XML sitemap, served from cache when fresh.
pub async fn get_sitemap(State(service): State<Arc<SitemapService>>) -> Result<SitemapResponse, SitemapError> {
    service.serve().await
}
