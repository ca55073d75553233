//! Fakes of the route registry and data models, for tests in this crate and dependent crates.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use data_model_smap::{ChangeFrequency, EntryDefaults, Priority, parse_timestamp};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::errors::{Result, SitemapError};
use crate::sources::{Endpoint, RouteRegistry, SitemapModel, Sitemappable};

/// Parses a timestamp, panicking on malformed test input.
pub fn timestamp(value: &str) -> DateTime<FixedOffset> {
    parse_timestamp(value).expect("test timestamp must be valid")
}

/// 2025-01-01, monthly, 0.5.
pub fn defaults() -> EntryDefaults {
    EntryDefaults {
        modified_date: timestamp("2025-01-01"),
        change_frequency: ChangeFrequency::Monthly,
        priority: Priority::new(0.5).expect("0.5 is a valid priority"),
    }
}

/// A registry whose endpoints cannot be listed.
pub struct FailingRouteRegistry;

#[async_trait]
impl RouteRegistry for FailingRouteRegistry {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        Err(SitemapError::RouteDiscovery("router is not initialized".to_string()))
    }
}

/// A registry where gathering the tags of one particular endpoint fails.
pub struct FlakyTagRegistry {
    endpoints: Vec<Endpoint>,
    broken_path: String,
}

impl FlakyTagRegistry {
    pub fn new(endpoints: Vec<Endpoint>, broken_path: impl Into<String>) -> Self {
        FlakyTagRegistry {
            endpoints,
            broken_path: broken_path.into(),
        }
    }
}

#[async_trait]
impl RouteRegistry for FlakyTagRegistry {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        Ok(self.endpoints.clone())
    }

    fn gather_tags(&self, endpoint: &Endpoint) -> Result<BTreeSet<String>> {
        if endpoint.path_template == self.broken_path {
            Err(SitemapError::TagLookup {
                path: endpoint.path_template.clone(),
                reason: "middleware could not be resolved".to_string(),
            })
        } else {
            Ok(endpoint.tags.clone())
        }
    }
}

/// A record that only provides a URL, leaving every hint to the defaults.
pub struct UrlOnlyRecord(pub Option<String>);

impl Sitemappable for UrlOnlyRecord {
    fn sitemap_url(&self) -> Option<String> {
        self.0.clone()
    }
}

/// A model whose inclusion filter always fails.
pub struct FailingModel;

#[async_trait]
impl SitemapModel for FailingModel {
    async fn query_included(&self) -> Result<Vec<Box<dyn Sitemappable>>> {
        Err(SitemapError::ModelQuery {
            model: "failing".to_string(),
            reason: "connection refused".to_string(),
        })
    }
}

/// A model whose single record changes URL on every query: `{base}/post-1`, `{base}/post-2`, ...
pub struct CountingModel {
    base: String,
    queries: AtomicUsize,
}

impl CountingModel {
    pub fn new(base: impl Into<String>) -> Self {
        CountingModel {
            base: base.into(),
            queries: AtomicUsize::new(0),
        }
    }

    /// How many times the inclusion filter has run.
    pub fn queries(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SitemapModel for CountingModel {
    async fn query_included(&self) -> Result<Vec<Box<dyn Sitemappable>>> {
        let query = self.queries.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(vec![Box::new(UrlOnlyRecord(Some(format!("{}/post-{}", self.base, query))))])
    }
}
