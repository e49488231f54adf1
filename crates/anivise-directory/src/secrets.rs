//! Secret providers: a mutable in-memory store and a TTL cache
//! wrapper.
//!
//! The cache bounds how long a rotated secret can keep being served:
//! a new value is always observed within one TTL.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use anivise_core::error::AniviseResult;
use anivise_core::secrets::{SecretName, SecretProvider};

/// Mutable named-secret store (the stand-in for tenant-configurable
/// secrets held in the database).
#[derive(Clone, Default)]
pub struct MemorySecretStore {
    values: Arc<RwLock<HashMap<SecretName, String>>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, name: SecretName, value: impl Into<String>) {
        self.values.write().await.insert(name, value.into());
    }

    pub async fn unset(&self, name: &SecretName) {
        self.values.write().await.remove(name);
    }
}

impl SecretProvider for MemorySecretStore {
    async fn get(&self, name: &SecretName) -> AniviseResult<Option<String>> {
        Ok(self.values.read().await.get(name).cloned())
    }
}

struct CacheEntry {
    value: Option<String>,
    fetched_at: Instant,
}

/// Caches another provider's answers per name for a short TTL.
///
/// Negative answers are cached too, so flipping a secret from unset to
/// set is also observed within the TTL.
pub struct CachedSecretProvider<P: SecretProvider> {
    inner: Arc<P>,
    ttl: Duration,
    cache: Arc<RwLock<HashMap<SecretName, CacheEntry>>>,
}

impl<P: SecretProvider> Clone for CachedSecretProvider<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            ttl: self.ttl,
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<P: SecretProvider> CachedSecretProvider<P> {
    pub fn new(inner: P, ttl: Duration) -> Self {
        Self {
            inner: Arc::new(inner),
            ttl,
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<P: SecretProvider> SecretProvider for CachedSecretProvider<P> {
    async fn get(&self, name: &SecretName) -> AniviseResult<Option<String>> {
        {
            let cache = self.cache.read().await;
            if let Some(entry) = cache.get(name)
                && entry.fetched_at.elapsed() < self.ttl
            {
                return Ok(entry.value.clone());
            }
        }

        // Fetch errors are not cached; the next call retries.
        let value = self.inner.get(name).await?;
        self.cache.write().await.insert(
            name.clone(),
            CacheEntry {
                value: value.clone(),
                fetched_at: Instant::now(),
            },
        );
        Ok(value)
    }
}
