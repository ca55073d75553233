//! In-process implementations of the route registry and the cache store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::errors::Result;
use crate::sources::{CacheStore, Endpoint, RouteRegistry};

/// Endpoints in the order they were registered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteTable {
    endpoints: Vec<Endpoint>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, endpoint: Endpoint) {
        self.endpoints.push(endpoint);
    }

    pub fn endpoints(&self) -> &[Endpoint] {
        &self.endpoints
    }
}

impl From<Vec<Endpoint>> for RouteTable {
    fn from(endpoints: Vec<Endpoint>) -> Self {
        RouteTable { endpoints }
    }
}

#[async_trait]
impl RouteRegistry for RouteTable {
    async fn list_endpoints(&self) -> Result<Vec<Endpoint>> {
        Ok(self.endpoints.clone())
    }
}

struct CachedValue {
    bytes: Vec<u8>,
    /// `None` when the ttl reaches past what an `Instant` can hold.
    expires_at: Option<Instant>,
}

impl CachedValue {
    fn is_fresh(&self) -> bool {
        self.expires_at.is_none_or(|deadline| Instant::now() < deadline)
    }
}

/// Cache store kept in process memory. Entries read as absent once their ttl has passed.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CachedValue>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(key)
            .filter(|cached| cached.is_fresh())
            .map(|cached| cached.bytes.clone()))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        let mut entries = self.entries.write().await;
        entries.insert(
            key.to_string(),
            CachedValue {
                bytes: value,
                expires_at: Instant::now().checked_add(ttl),
            },
        );
        Ok(())
    }
}
