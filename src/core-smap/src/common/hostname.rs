use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

/// Gets the host:port from the env vars HOST and PORT.
/// Uses defaults `127.0.0.1:3000` if env vars are empty.
pub fn get_api_base_url() -> Result<SocketAddr, HostPortError> {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = match std::env::var("PORT") {
        Ok(p) => p.trim().parse::<u16>()?,
        Err(_) => 3000,
    };
    let address = format!("{}:{}", host, port).parse::<SocketAddr>()?;
    Ok(address)
}

/// Gets the public URL of the site from the env var SITE_BASE_URL.
/// Sitemap locations are absolute URLs built on top of it.
/// Falls back to `http://{addr}` when unset.
pub fn get_site_base_url(addr: &SocketAddr) -> Result<Url, HostPortError> {
    let base = std::env::var("SITE_BASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| format!("http://{}", addr));
    site_base_url(&base)
}

/// Parses a site base URL. Only http and https URLs can be listed in a sitemap.
pub fn site_base_url(base: &str) -> Result<Url, HostPortError> {
    let url = Url::parse(base.trim())?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(HostPortError::UnsupportedScheme(other.to_string())),
    }
}

#[derive(Debug, Error)]
pub enum HostPortError {
    #[error("Invalid port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
    #[error("Invalid hostname: {0}")]
    InvalidHostname(#[from] std::net::AddrParseError),
    #[error("Invalid site base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("Site base URL must be http or https, got: {0}")]
    UnsupportedScheme(String),
}
