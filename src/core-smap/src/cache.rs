use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::Result;
use crate::pipeline::SitemapGenerator;
use crate::render::SITEMAP_CONTENT_TYPE;
use crate::sources::CacheStore;

/// A rendered sitemap, ready to be sent.
#[derive(Debug, Clone, PartialEq)]
pub struct SitemapResponse {
    pub body: Vec<u8>,
    pub content_type: &'static str,
    pub status: StatusCode,
}

impl SitemapResponse {
    pub fn ok(body: Vec<u8>) -> Self {
        SitemapResponse {
            body,
            content_type: SITEMAP_CONTENT_TYPE,
            status: StatusCode::OK,
        }
    }
}

impl IntoResponse for SitemapResponse {
    fn into_response(self) -> Response {
        (self.status, [(header::CONTENT_TYPE, self.content_type)], self.body).into_response()
    }
}

/// Serves the sitemap, regenerating it at most once per cache lifetime.
///
/// Concurrent misses are not coordinated: two requests that both miss the cache both generate
/// the sitemap, and the last write wins.
pub struct SitemapService {
    generator: SitemapGenerator,
    cache: Arc<dyn CacheStore>,
}

impl SitemapService {
    pub fn new(generator: SitemapGenerator, cache: Arc<dyn CacheStore>) -> Self {
        SitemapService { generator, cache }
    }

    pub async fn serve(&self) -> Result<SitemapResponse> {
        let config = self.generator.config();
        let body = if config.is_caching_enabled() {
            self.cached(&config.cache_key, Duration::from_secs(config.cache_lifetime))
                .await?
        } else {
            self.generator.generate().await?
        };
        Ok(SitemapResponse::ok(body))
    }

    /// Cached bytes if present, else a freshly generated sitemap that is then stored.
    /// The cache store failing is logged and otherwise ignored.
    async fn cached(&self, key: &str, ttl: Duration) -> Result<Vec<u8>> {
        match self.cache.get(key).await {
            Ok(Some(bytes)) => {
                tracing::debug!(key, "sitemap cache hit");
                return Ok(bytes);
            }
            Ok(None) => tracing::debug!(key, "sitemap cache miss"),
            Err(e) => tracing::warn!(key, error = %e, "sitemap cache read failed; regenerating"),
        }

        let body = self.generator.generate().await?;
        if let Err(e) = self.cache.set(key, body.clone(), ttl).await {
            tracing::warn!(key, error = %e, "sitemap cache write failed");
        }
        Ok(body)
    }
}
