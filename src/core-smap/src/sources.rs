//! Interfaces to the collaborators a sitemap is built from: the site's route registry, its data
//! models, and the store generated sitemaps are cached in.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use data_model_smap::{ChangeFrequency, EntryDefaults, Priority};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::Result;

/// Tag marking an endpoint for inclusion in the sitemap.
pub const SITEMAPPABLE: &str = "sitemappable";

/// A registered HTTP endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Accepted HTTP methods, e.g. `GET`, `HEAD`.
    pub methods: BTreeSet<String>,
    /// Path with `{name}` placeholders for path parameters, e.g. `blog/{slug}`.
    pub path_template: String,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl Endpoint {
    pub fn new<M, T>(methods: M, path_template: impl Into<String>, tags: T) -> Self
    where
        M: IntoIterator,
        M::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Endpoint {
            methods: methods.into_iter().map(Into::into).collect(),
            path_template: path_template.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    /// True if GET is one of the accepted methods (case-insensitive).
    pub fn accepts_get(&self) -> bool {
        self.methods.iter().any(|m| m.eq_ignore_ascii_case("GET"))
    }
}

/// The site's table of registered endpoints.
#[async_trait]
pub trait RouteRegistry: Send + Sync {
    /// Lists every registered endpoint, in registration order.
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>>;

    /// Gathers the tags attached to one endpoint. May fail for a single endpoint.
    fn gather_tags(&self, endpoint: &Endpoint) -> Result<BTreeSet<String>> {
        Ok(endpoint.tags.clone())
    }
}

/// A record that can describe its own sitemap entry.
///
/// Only `sitemap_url` is required; the other hints fall back to the configured defaults.
pub trait Sitemappable: Send + Sync {
    /// Absolute URL of this record. `None` means the record has no page of its own.
    fn sitemap_url(&self) -> Option<String>;

    /// When the record itself was last updated, if it tracks that.
    fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        None
    }

    fn sitemap_modified_date(&self, defaults: &EntryDefaults) -> DateTime<FixedOffset> {
        self.updated_at().unwrap_or(defaults.modified_date)
    }

    fn sitemap_change_frequency(&self, defaults: &EntryDefaults) -> ChangeFrequency {
        defaults.change_frequency
    }

    fn sitemap_priority(&self, defaults: &EntryDefaults) -> Priority {
        defaults.priority
    }
}

/// A queryable data model type.
#[async_trait]
pub trait SitemapModel: Send + Sync {
    /// Runs the model's inclusion filter, returning the records that belong in the sitemap.
    /// Drafts, soft-deleted or unpublished rows are left out here.
    async fn query_included(&self) -> Result<Vec<Box<dyn Sitemappable>>>;
}

/// Data model types by identifier, as named in [`SitemapConfig::models`](data_model_smap::SitemapConfig).
#[derive(Clone, Default)]
pub struct ModelRegistry {
    models: HashMap<String, Arc<dyn SitemapModel>>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `model` under `identifier`, replacing any earlier registration.
    pub fn register(mut self, identifier: impl Into<String>, model: Arc<dyn SitemapModel>) -> Self {
        self.models.insert(identifier.into(), model);
        self
    }

    pub fn resolve(&self, identifier: &str) -> Option<Arc<dyn SitemapModel>> {
        self.models.get(identifier).cloned()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

/// Key-value store with per-entry expiry.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// The stored bytes, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;
}
