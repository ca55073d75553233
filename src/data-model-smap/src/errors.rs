use thiserror::Error;

/// Errors raised while constructing or validating sitemap data.
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// Every sitemap entry needs a location.
    #[error("Sitemap entry location is empty")]
    EmptyLocation,

    /// Priorities are hints in the closed range [0.0, 1.0].
    #[error("Priority must be within [0.0, 1.0], got: {0}")]
    InvalidPriority(f64),

    /// Not one of always, hourly, daily, weekly, monthly, yearly, never.
    #[error("Unknown change frequency: '{0}'")]
    UnknownChangeFrequency(String),

    /// Neither an RFC-3339 timestamp nor a YYYY-MM-DD date.
    #[error("Invalid timestamp: '{0}'")]
    InvalidTimestamp(String),

    /// A configuration value could not be interpreted.
    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidConfig { key: String, reason: String },
}
