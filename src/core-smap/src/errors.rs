//! Error types for sitemap generation.

use axum::{Json, http::StatusCode, response::IntoResponse};
use data_model_smap::ModelError;
use serde_json::json;
use thiserror::Error;

/// Main error type for sitemap generation, serving and parsing.
#[derive(Debug, Error)]
pub enum SitemapError {
    /// The route registry could not list its endpoints. Fatal for the whole sitemap.
    #[error("Route discovery failed: {0}")]
    RouteDiscovery(String),

    /// Tags of a single endpoint could not be gathered. Only that endpoint is skipped.
    #[error("Tag lookup failed for route '{path}': {reason}")]
    TagLookup { path: String, reason: String },

    /// A model's inclusion filter failed. Only that model is skipped.
    #[error("Model query failed for '{model}': {reason}")]
    ModelQuery { model: String, reason: String },

    /// Invalid URL format
    #[error("Invalid URL: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Malformed XML while reading a sitemap
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Sitemap parsing failed
    #[error("Sitemap parsing failed: {0}")]
    ParseError(String),

    #[error("Invalid sitemap data: {0}")]
    ModelError(#[from] ModelError),

    /// The cache store could not be read or written.
    #[error("Cache store error: {0}")]
    CacheError(String),

    /// Site manifest is not valid JSON or does not match the expected shape.
    #[error("Invalid manifest: {0}")]
    ManifestError(#[from] serde_json::Error),
}

/// Type alias for Result with SitemapError
pub type Result<T> = std::result::Result<T, SitemapError>;

impl IntoResponse for SitemapError {
    fn into_response(self) -> axum::response::Response {
        tracing::error!(error = %self, "sitemap request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({
                "error": self.to_string()
            })),
        )
            .into_response()
    }
}
