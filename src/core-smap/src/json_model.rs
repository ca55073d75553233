//! A data model whose records are loaded from JSON.

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset};
use data_model_smap::{ChangeFrequency, EntryDefaults, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::errors::Result;
use crate::sources::{ModelRegistry, SitemapModel, Sitemappable};

/// One record, e.g.
/// `{"url": "https://example.com/blog/hello", "updated_at": "2024-01-01T00:00:00+00:00", "priority": 0.8}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRecord {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<FixedOffset>>,
    #[serde(default)]
    pub change_frequency: Option<ChangeFrequency>,
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Records with `included: false` are dropped by the inclusion filter.
    #[serde(default = "included_by_default")]
    pub included: bool,
}

fn included_by_default() -> bool {
    true
}

impl Sitemappable for JsonRecord {
    fn sitemap_url(&self) -> Option<String> {
        self.url.clone()
    }

    fn updated_at(&self) -> Option<DateTime<FixedOffset>> {
        self.updated_at
    }

    fn sitemap_change_frequency(&self, defaults: &EntryDefaults) -> ChangeFrequency {
        self.change_frequency.unwrap_or(defaults.change_frequency)
    }

    fn sitemap_priority(&self, defaults: &EntryDefaults) -> Priority {
        self.priority.unwrap_or(defaults.priority)
    }
}

#[derive(Debug, Clone, Default)]
pub struct JsonModel {
    records: Vec<JsonRecord>,
}

impl JsonModel {
    pub fn new(records: Vec<JsonRecord>) -> Self {
        JsonModel { records }
    }
}

#[async_trait]
impl SitemapModel for JsonModel {
    async fn query_included(&self) -> Result<Vec<Box<dyn Sitemappable>>> {
        Ok(self
            .records
            .iter()
            .filter(|record| record.included)
            .cloned()
            .map(|record| Box::new(record) as Box<dyn Sitemappable>)
            .collect())
    }
}

/// Builds a registry with one [`JsonModel`] per identifier.
pub fn json_models(models: BTreeMap<String, Vec<JsonRecord>>) -> ModelRegistry {
    models
        .into_iter()
        .fold(ModelRegistry::new(), |registry, (identifier, records)| {
            registry.register(identifier, Arc::new(JsonModel::new(records)))
        })
}
