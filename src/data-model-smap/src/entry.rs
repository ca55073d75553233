use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ModelError;

/// One `<url>` record of a sitemap: a location plus optional crawl hints.
///
/// Entries are built fresh on every sitemap generation and are discarded once rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlEntry {
    /// Absolute URL. Never empty, and unique within a rendered sitemap.
    pub location: String,
    /// Rendered as `<lastmod>` when present.
    pub last_modified: Option<DateTime<FixedOffset>>,
    /// Rendered as `<changefreq>` when present.
    pub change_frequency: Option<ChangeFrequency>,
    /// Rendered as `<priority>` when present. A zero priority is still present.
    pub priority: Option<Priority>,
}

impl UrlEntry {
    /// Creates an entry with no metadata. Fails if the location is empty or only whitespace.
    pub fn new(location: impl Into<String>) -> Result<Self, ModelError> {
        let location = location.into();
        if location.trim().is_empty() {
            return Err(ModelError::EmptyLocation);
        }
        Ok(UrlEntry {
            location,
            last_modified: None,
            change_frequency: None,
            priority: None,
        })
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<FixedOffset>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = Some(change_frequency);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// How often the content behind a URL is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "always",
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
            Self::Never => "never",
        }
    }
}

impl std::fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            "never" => Ok(Self::Never),
            _ => Err(ModelError::UnknownChangeFrequency(s.to_string())),
        }
    }
}

/// Relative importance of a URL, only constructible for values in [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Priority(f64);

impl Priority {
    /// The protocol's default priority of a page, 0.5.
    pub const DEFAULT: Priority = Priority(0.5);

    /// Create a new priority if the value is valid. Returns an error on failure.
    pub fn new(value: f64) -> Result<Self, ModelError> {
        if Self::is_valid(value) {
            Ok(Priority(value))
        } else {
            Err(ModelError::InvalidPriority(value))
        }
    }

    /// True if the value is finite and within [0.0, 1.0].
    pub fn is_valid(value: f64) -> bool {
        value.is_finite() && (0.0..=1.0).contains(&value)
    }

    /// Destroys the wrapper, obtaining the raw value.
    pub fn extract(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Priority {
    /// Always exactly one decimal digit: `0.0`, `0.5`, `1.0`.
    /// Half-steps round away from zero, so `0.25` is `0.3`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Nudge values such as 0.15, stored just below the half-step, over it.
        let tenths = (self.0 * 10.0 + 1e-9).round();
        write!(f, "{:.1}", tenths / 10.0)
    }
}

impl TryFrom<f64> for Priority {
    type Error = ModelError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Priority::new(value)
    }
}

impl From<Priority> for f64 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// Formats a timestamp in the Atom style used by `<lastmod>`, e.g. `2025-01-01T00:00:00+00:00`.
pub fn format_timestamp(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, false)
}

/// Parses an RFC-3339 timestamp or a bare `YYYY-MM-DD` date (taken as midnight UTC).
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, ModelError> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp);
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc().fixed_offset())
        .ok_or_else(|| ModelError::InvalidTimestamp(value.to_string()))
}
