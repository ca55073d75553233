use axum::{Router, middleware, routing::get};
use core_smap::{CacheStore, ModelRegistry, SitemapGenerator, SitemapService, health_check};
use data_model_smap::SitemapConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use url::Url;

use crate::site_router::SiteRouter;

pub mod logging_middleware;
pub mod sitemap;

//
// Router
//

/// Serves the site's pages alongside `/sitemap.xml` and `/health`.
pub fn router(pages: Router, service: Arc<SitemapService>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/sitemap.xml", get(sitemap::get_sitemap))
        .with_state(service)
        .merge(pages)
        // Custom route access logging
        .layer(middleware::from_fn(logging_middleware::log_route_access))
        // Tracing middleware
        .layer(TraceLayer::new_for_http())
}

/// Wires a sitemap generated from the site's own route table and the given models.
pub fn app(
    site: SiteRouter,
    models: ModelRegistry,
    base_url: Url,
    config: SitemapConfig,
    cache: Arc<dyn CacheStore>,
) -> Router {
    let (pages, table) = site.into_parts();
    let generator = SitemapGenerator::new(Arc::new(table), models, base_url, config);
    router(pages, Arc::new(SitemapService::new(generator, cache)))
}
