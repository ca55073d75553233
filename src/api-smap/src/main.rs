use anyhow::Context;
use core_smap::{
    JsonRecord, MemoryCacheStore, ModelRegistry, get_api_base_url, get_site_base_url, json_models, setup_logging,
};
use data_model_smap::SitemapConfig;
use std::collections::BTreeMap;
use std::sync::Arc;

use api_smap::{routes, site};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    setup_logging("api_smap=debug,core_smap=debug,tower_http=debug");

    let config = SitemapConfig::from_env().context("Invalid sitemap configuration")?;
    let addr = get_api_base_url().context("Invalid HOST or PORT")?;
    let base_url = get_site_base_url(&addr).context("Invalid SITE_BASE_URL")?;
    let models = load_models()?;

    tracing::info!(
        %base_url,
        models = ?config.models,
        registered_models = models.len(),
        cache_lifetime = config.cache_lifetime,
        "sitemap configured"
    );

    let app = routes::app(site::pages(), models, base_url, config, Arc::new(MemoryCacheStore::new()));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;
    tracing::info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

/// Loads model records from the JSON file at SITEMAP_MODELS_FILE, keyed by model identifier.
/// No models are registered when it is unset.
fn load_models() -> anyhow::Result<ModelRegistry> {
    match std::env::var("SITEMAP_MODELS_FILE") {
        Ok(path) if !path.trim().is_empty() => {
            let content =
                std::fs::read_to_string(&path).with_context(|| format!("Cannot read SITEMAP_MODELS_FILE ({path})"))?;
            let models: BTreeMap<String, Vec<JsonRecord>> =
                serde_json::from_str(&content).with_context(|| format!("Invalid SITEMAP_MODELS_FILE ({path})"))?;
            Ok(json_models(models))
        }
        _ => Ok(ModelRegistry::new()),
    }
}
