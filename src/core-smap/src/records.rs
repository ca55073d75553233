//! Sitemap entries for data model records.

use data_model_smap::{EntryDefaults, UrlEntry};

use crate::sources::{ModelRegistry, Sitemappable};

/// Builds one entry per record returned by each configured model's inclusion filter, in
/// configuration order and then record order.
///
/// Nothing here is fatal: an unknown model identifier, a failing inclusion filter, or a record
/// without a URL is logged and skipped so the rest of the site still gets listed.
pub async fn record_entries(models: &ModelRegistry, identifiers: &[String], defaults: &EntryDefaults) -> Vec<UrlEntry> {
    let mut entries = Vec::new();

    for identifier in identifiers {
        let Some(model) = models.resolve(identifier) else {
            tracing::warn!(model = %identifier, "skipping model: not registered");
            continue;
        };

        let records = match model.query_included().await {
            Ok(records) => records,
            Err(e) => {
                tracing::warn!(model = %identifier, error = %e, "skipping model: inclusion filter failed");
                continue;
            }
        };

        let before = entries.len();
        entries.extend(records.iter().filter_map(|record| record_entry(record.as_ref(), defaults)));
        tracing::debug!(model = %identifier, count = entries.len() - before, "collected record entries");
    }

    entries
}

/// The entry for one record, or `None` if it has no URL.
fn record_entry(record: &dyn Sitemappable, defaults: &EntryDefaults) -> Option<UrlEntry> {
    let entry = UrlEntry::new(record.sitemap_url()?).ok()?;
    Some(
        entry
            .with_last_modified(record.sitemap_modified_date(defaults))
            .with_change_frequency(record.sitemap_change_frequency(defaults))
            .with_priority(record.sitemap_priority(defaults)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json_model::JsonModel;
    use crate::test_helpers::{FailingModel, UrlOnlyRecord, defaults, timestamp};
    use async_trait::async_trait;
    use data_model_smap::{ChangeFrequency, Priority};
    use std::sync::Arc;

    use crate::errors::Result;
    use crate::sources::SitemapModel;

    /// Records with and without URLs, in that order: "a", none, "", "b".
    struct MixedModel;

    #[async_trait]
    impl SitemapModel for MixedModel {
        async fn query_included(&self) -> Result<Vec<Box<dyn Sitemappable>>> {
            Ok(vec![
                Box::new(UrlOnlyRecord(Some("https://example.com/a".to_string()))),
                Box::new(UrlOnlyRecord(None)),
                Box::new(UrlOnlyRecord(Some(String::new()))),
                Box::new(UrlOnlyRecord(Some("https://example.com/b".to_string()))),
            ])
        }
    }

    fn ids(identifiers: &[&str]) -> Vec<String> {
        identifiers.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_records_without_url_are_skipped() {
        let models = ModelRegistry::new().register("mixed", Arc::new(MixedModel));
        let entries = record_entries(&models, &ids(&["mixed"]), &defaults()).await;

        let locations: Vec<&str> = entries.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(locations, vec!["https://example.com/a", "https://example.com/b"]);
    }

    #[tokio::test]
    async fn test_url_only_record_uses_defaults() {
        let models = ModelRegistry::new().register("mixed", Arc::new(MixedModel));
        let entries = record_entries(&models, &ids(&["mixed"]), &defaults()).await;

        let entry = &entries[0];
        assert_eq!(entry.last_modified, Some(timestamp("2025-01-01")));
        assert_eq!(entry.change_frequency, Some(ChangeFrequency::Monthly));
        assert_eq!(entry.priority, Some(Priority::new(0.5).unwrap()));
    }

    #[tokio::test]
    async fn test_unknown_and_failing_models_do_not_break_others() {
        let posts = serde_json::from_str(r#"[{"url": "https://example.com/blog/hello"}]"#).unwrap();
        let models = ModelRegistry::new()
            .register("failing", Arc::new(FailingModel))
            .register("posts", Arc::new(JsonModel::new(posts)));

        let entries = record_entries(&models, &ids(&["App\\Models\\Missing", "failing", "posts"]), &defaults()).await;

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].location, "https://example.com/blog/hello");
    }

    #[tokio::test]
    async fn test_configuration_order_then_record_order() {
        let first = serde_json::from_str(r#"[{"url": "https://example.com/1"}, {"url": "https://example.com/2"}]"#).unwrap();
        let second = serde_json::from_str(r#"[{"url": "https://example.com/3"}]"#).unwrap();
        let models = ModelRegistry::new()
            .register("first", Arc::new(JsonModel::new(first)))
            .register("second", Arc::new(JsonModel::new(second)));

        let entries = record_entries(&models, &ids(&["second", "first"]), &defaults()).await;
        let locations: Vec<&str> = entries.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(
            locations,
            vec!["https://example.com/3", "https://example.com/1", "https://example.com/2"]
        );
    }

    #[tokio::test]
    async fn test_no_models_configured() {
        let entries = record_entries(&ModelRegistry::new(), &[], &defaults()).await;
        assert!(entries.is_empty());
    }
}
