use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::entry::{ChangeFrequency, Priority, parse_timestamp};
use crate::errors::ModelError;

pub const DEFAULT_CACHE_KEY: &str = "dynamic-sitemap";
pub const DEFAULT_CACHE_LIFETIME_SECONDS: u64 = 60;
pub const DEFAULT_MODIFIED_DATE: &str = "2025-01-01";

/// Read-only settings for one sitemap generation.
///
/// Deserializes from JSON with every key optional; missing keys take the same defaults as
/// [`SitemapConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// Identifiers of the data models whose records are listed in the sitemap.
    pub models: Vec<String>,
    /// Fallback last-modified date. `None` means "now", resolved each time a sitemap is generated.
    #[serde(with = "optional_timestamp")]
    pub default_modified_date: Option<DateTime<FixedOffset>>,
    pub default_change_frequency: ChangeFrequency,
    pub default_priority: Priority,
    /// Seconds to keep a generated sitemap. 0 disables caching.
    pub cache_lifetime: u64,
    pub cache_key: String,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            models: Vec::new(),
            default_modified_date: parse_timestamp(DEFAULT_MODIFIED_DATE).ok(),
            default_change_frequency: ChangeFrequency::Monthly,
            default_priority: Priority::DEFAULT,
            cache_lifetime: DEFAULT_CACHE_LIFETIME_SECONDS,
            cache_key: DEFAULT_CACHE_KEY.to_string(),
        }
    }
}

/// The three fallback values, resolved once per sitemap generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntryDefaults {
    pub modified_date: DateTime<FixedOffset>,
    pub change_frequency: ChangeFrequency,
    pub priority: Priority,
}

impl SitemapConfig {
    /// Resolves the configured fallbacks. A missing default modified date becomes `now`.
    pub fn entry_defaults(&self, now: DateTime<FixedOffset>) -> EntryDefaults {
        EntryDefaults {
            modified_date: self.default_modified_date.unwrap_or(now),
            change_frequency: self.default_change_frequency,
            priority: self.default_priority,
        }
    }

    /// True if generated sitemaps should be cached.
    pub fn is_caching_enabled(&self) -> bool {
        self.cache_lifetime > 0
    }

    /// Reads the configuration from environment variables, falling back to defaults for unset ones.
    ///
    /// - `SITEMAP_MODELS`: comma-separated model identifiers
    /// - `SITEMAP_DEFAULT_MODIFIED_DATE`: RFC-3339 timestamp or `YYYY-MM-DD`; empty or `null` means "now"
    /// - `SITEMAP_DEFAULT_CHANGE_FREQUENCY`: always, hourly, daily, weekly, monthly, yearly or never
    /// - `SITEMAP_DEFAULT_PRIORITY`: 0.0 to 1.0
    /// - `SITEMAP_CACHE_LIFETIME`: seconds, 0 disables caching
    /// - `SITEMAP_CACHE_KEY`
    pub fn from_env() -> Result<Self, ModelError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as `from_env`, but reads each variable through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ModelError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = SitemapConfig::default();

        if let Some(models) = lookup("SITEMAP_MODELS") {
            config.models = models
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(date) = lookup("SITEMAP_DEFAULT_MODIFIED_DATE") {
            let date = date.trim();
            config.default_modified_date = if date.is_empty() || date.eq_ignore_ascii_case("null") {
                None
            } else {
                Some(parse_timestamp(date).map_err(|e| invalid("SITEMAP_DEFAULT_MODIFIED_DATE", e))?)
            };
        }

        if let Some(freq) = lookup("SITEMAP_DEFAULT_CHANGE_FREQUENCY") {
            config.default_change_frequency =
                freq.parse().map_err(|e| invalid("SITEMAP_DEFAULT_CHANGE_FREQUENCY", e))?;
        }

        if let Some(priority) = lookup("SITEMAP_DEFAULT_PRIORITY") {
            let value = priority
                .trim()
                .parse::<f64>()
                .map_err(|e| invalid("SITEMAP_DEFAULT_PRIORITY", e))?;
            config.default_priority = Priority::new(value).map_err(|e| invalid("SITEMAP_DEFAULT_PRIORITY", e))?;
        }

        if let Some(lifetime) = lookup("SITEMAP_CACHE_LIFETIME") {
            config.cache_lifetime = lifetime
                .trim()
                .parse::<u64>()
                .map_err(|e| invalid("SITEMAP_CACHE_LIFETIME", e))?;
        }

        if let Some(key) = lookup("SITEMAP_CACHE_KEY")
            && !key.trim().is_empty()
        {
            config.cache_key = key.trim().to_string();
        }

        Ok(config)
    }
}

fn invalid(key: &str, reason: impl std::fmt::Display) -> ModelError {
    ModelError::InvalidConfig {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

/// (De)serializes the default modified date: a date string or `null`.
mod optional_timestamp {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::entry::{format_timestamp, parse_timestamp};

    pub fn serialize<S>(value: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(timestamp) => serializer.serialize_str(&format_timestamp(timestamp)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(value) => parse_timestamp(&value).map(Some).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| vars.get(key).cloned()
    }

    fn utc(value: &str) -> DateTime<FixedOffset> {
        parse_timestamp(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = SitemapConfig::default();
        assert!(config.models.is_empty());
        assert_eq!(config.default_modified_date, Some(utc("2025-01-01")));
        assert_eq!(config.default_change_frequency, ChangeFrequency::Monthly);
        assert_eq!(config.default_priority, Priority::new(0.5).unwrap());
        assert_eq!(config.cache_lifetime, 60);
        assert_eq!(config.cache_key, "dynamic-sitemap");
        assert!(config.is_caching_enabled());
    }

    #[test]
    fn test_entry_defaults_null_date_is_now() {
        let config = SitemapConfig {
            default_modified_date: None,
            ..SitemapConfig::default()
        };
        let now = utc("2026-10-19T09:30:00+00:00");
        assert_eq!(config.entry_defaults(now).modified_date, now);
    }

    #[test]
    fn test_entry_defaults_configured_date_wins() {
        let config = SitemapConfig::default();
        let now = utc("2026-10-19T09:30:00+00:00");
        let defaults = config.entry_defaults(now);
        assert_eq!(defaults.modified_date, utc("2025-01-01"));
        assert_eq!(defaults.change_frequency, ChangeFrequency::Monthly);
        assert_eq!(defaults.priority.extract(), 0.5);
    }

    #[test]
    fn test_from_lookup_empty_keeps_defaults() {
        let config = SitemapConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, SitemapConfig::default());
    }

    #[test]
    fn test_from_lookup_all_keys() {
        let config = SitemapConfig::from_lookup(lookup_from(&[
            ("SITEMAP_MODELS", "posts, pages,,products "),
            ("SITEMAP_DEFAULT_MODIFIED_DATE", "2024-05-05T10:00:00+01:00"),
            ("SITEMAP_DEFAULT_CHANGE_FREQUENCY", "weekly"),
            ("SITEMAP_DEFAULT_PRIORITY", "0.8"),
            ("SITEMAP_CACHE_LIFETIME", "0"),
            ("SITEMAP_CACHE_KEY", "my-sitemap"),
        ]))
        .unwrap();

        assert_eq!(config.models, vec!["posts", "pages", "products"]);
        assert_eq!(config.default_modified_date, Some(utc("2024-05-05T10:00:00+01:00")));
        assert_eq!(config.default_change_frequency, ChangeFrequency::Weekly);
        assert_eq!(config.default_priority.extract(), 0.8);
        assert_eq!(config.cache_lifetime, 0);
        assert!(!config.is_caching_enabled());
        assert_eq!(config.cache_key, "my-sitemap");
    }

    #[test]
    fn test_from_lookup_null_date() {
        let config =
            SitemapConfig::from_lookup(lookup_from(&[("SITEMAP_DEFAULT_MODIFIED_DATE", "null")])).unwrap();
        assert_eq!(config.default_modified_date, None);
    }

    #[test]
    fn test_from_lookup_invalid_values() {
        let bad_priority = SitemapConfig::from_lookup(lookup_from(&[("SITEMAP_DEFAULT_PRIORITY", "1.5")]));
        assert!(matches!(
            bad_priority,
            Err(ModelError::InvalidConfig { ref key, .. }) if key == "SITEMAP_DEFAULT_PRIORITY"
        ));

        let bad_freq = SitemapConfig::from_lookup(lookup_from(&[("SITEMAP_DEFAULT_CHANGE_FREQUENCY", "often")]));
        assert!(bad_freq.is_err());

        let bad_lifetime = SitemapConfig::from_lookup(lookup_from(&[("SITEMAP_CACHE_LIFETIME", "-1")]));
        assert!(bad_lifetime.is_err());

        let bad_date = SitemapConfig::from_lookup(lookup_from(&[("SITEMAP_DEFAULT_MODIFIED_DATE", "soon")]));
        assert!(bad_date.is_err());
    }

    #[test]
    fn test_json_partial_config() {
        let config: SitemapConfig = serde_json::from_str(
            r#"{"models": ["posts"], "default_modified_date": null, "default_priority": 0.0}"#,
        )
        .unwrap();
        assert_eq!(config.models, vec!["posts"]);
        assert_eq!(config.default_modified_date, None);
        assert_eq!(config.default_priority.extract(), 0.0);
        assert_eq!(config.default_change_frequency, ChangeFrequency::Monthly);
        assert_eq!(config.cache_lifetime, 60);
    }

    #[test]
    fn test_json_rejects_bad_values() {
        assert!(serde_json::from_str::<SitemapConfig>(r#"{"default_priority": 2.0}"#).is_err());
        assert!(serde_json::from_str::<SitemapConfig>(r#"{"default_change_frequency": "often"}"#).is_err());
        assert!(serde_json::from_str::<SitemapConfig>(r#"{"default_modified_date": "yesterday"}"#).is_err());
    }
}
