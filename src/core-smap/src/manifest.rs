//! A whole site described in one JSON document, for generating sitemaps outside a running server.

use data_model_smap::SitemapConfig;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::common::hostname::site_base_url;
use crate::errors::{Result, SitemapError};
use crate::json_model::{JsonRecord, json_models};
use crate::memory::RouteTable;
use crate::pipeline::SitemapGenerator;
use crate::sources::Endpoint;

/// ```json
/// {
///   "base_url": "https://example.com",
///   "config": { "models": ["posts"], "default_priority": 0.5 },
///   "routes": [{ "methods": ["GET"], "path_template": "blog/{slug}", "tags": ["sitemappable"] }],
///   "models": { "posts": [{ "url": "https://example.com/blog/hello" }] }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct SiteManifest {
    pub base_url: String,
    #[serde(default)]
    pub config: SitemapConfig,
    #[serde(default)]
    pub routes: Vec<Endpoint>,
    #[serde(default)]
    pub models: BTreeMap<String, Vec<JsonRecord>>,
}

impl SiteManifest {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_generator(self) -> Result<SitemapGenerator> {
        let base_url =
            site_base_url(&self.base_url).map_err(|e| SitemapError::ParseError(format!("base_url: {e}")))?;
        Ok(SitemapGenerator::new(
            Arc::new(RouteTable::from(self.routes)),
            json_models(self.models),
            base_url,
            self.config,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::parse_sitemap;
    use indoc::indoc;

    #[tokio::test]
    async fn test_manifest_generates_sitemap() {
        let manifest = SiteManifest::from_json(indoc! {r#"
            {
              "base_url": "https://example.com",
              "config": { "models": ["posts"], "default_modified_date": "2025-01-01" },
              "routes": [
                { "methods": ["GET", "HEAD"], "path_template": "/", "tags": ["sitemappable"] },
                { "methods": ["GET", "HEAD"], "path_template": "about" }
              ],
              "models": {
                "posts": [{ "url": "https://example.com/blog/hello", "updated_at": "2025-02-01T00:00:00+00:00" }]
              }
            }
        "#})
        .unwrap();

        let xml = manifest.into_generator().unwrap().generate().await.unwrap();
        let entries = parse_sitemap(std::str::from_utf8(&xml).unwrap()).unwrap();
        let locations: Vec<&str> = entries.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(locations, vec!["https://example.com/blog/hello", "https://example.com/"]);
    }

    #[test]
    fn test_manifest_invalid() {
        assert!(matches!(
            SiteManifest::from_json(r#"{"routes": []}"#),
            Err(SitemapError::ManifestError(_))
        ));

        let manifest = SiteManifest::from_json(r#"{"base_url": "mailto:me@example.com"}"#).unwrap();
        assert!(manifest.into_generator().is_err());
    }
}
