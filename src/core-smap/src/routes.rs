//! Sitemap entries for the site's own routes.

use data_model_smap::{EntryDefaults, UrlEntry};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use crate::errors::Result;
use crate::sources::{RouteRegistry, SITEMAPPABLE};

static PATH_PARAMETER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]+\}").expect("path parameter pattern is a valid regex"));

static REPEATED_SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/+").expect("separator pattern is a valid regex"));

/// Strips `{name}` placeholders from a route template, collapses repeated `/` and trims
/// leading/trailing `/`.
///
/// ```
/// # use core_smap::normalize_path;
/// assert_eq!(normalize_path("items/{id}/edit"), "items/edit");
/// assert_eq!(normalize_path("/blog/{slug}"), "blog");
/// assert_eq!(normalize_path("/"), "");
/// ```
pub fn normalize_path(path_template: &str) -> String {
    let stripped = PATH_PARAMETER.replace_all(path_template, "");
    let collapsed = REPEATED_SEPARATORS.replace_all(&stripped, "/");
    collapsed.trim_matches('/').to_string()
}

/// Resolves a normalized path against the site's base URL.
///
/// The base URL's own path is kept: `https://example.com/app` + `about` is
/// `https://example.com/app/about`. An empty path resolves to the base URL itself.
pub fn absolute_url(base_url: &Url, path: &str) -> Result<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let with_slash = format!("{}/", base.path());
        base.set_path(&with_slash);
    }
    // "./" keeps a segment such as "a:b" from being read as a URL scheme.
    Ok(base.join(&format!("./{path}"))?)
}

/// Builds one entry per GET endpoint tagged [`SITEMAPPABLE`], in registration order, with every
/// hint taken from `defaults`.
///
/// Failing to list the endpoints is fatal. Failing to gather one endpoint's tags only skips that
/// endpoint.
pub async fn route_entries(
    registry: &dyn RouteRegistry,
    base_url: &Url,
    defaults: &EntryDefaults,
) -> Result<Vec<UrlEntry>> {
    let endpoints = registry.list_endpoints().await?;
    let mut entries = Vec::new();

    for endpoint in endpoints {
        if !endpoint.accepts_get() {
            continue;
        }

        let tags = match registry.gather_tags(&endpoint) {
            Ok(tags) => tags,
            Err(e) => {
                tracing::warn!(path = %endpoint.path_template, error = %e, "skipping route: tag lookup failed");
                continue;
            }
        };
        if !tags.contains(SITEMAPPABLE) {
            continue;
        }

        let location = absolute_url(base_url, &normalize_path(&endpoint.path_template))?;
        entries.push(
            UrlEntry::new(location.as_str())?
                .with_last_modified(defaults.modified_date)
                .with_change_frequency(defaults.change_frequency)
                .with_priority(defaults.priority),
        );
    }

    tracing::debug!(count = entries.len(), "collected route entries");
    Ok(entries)
}
