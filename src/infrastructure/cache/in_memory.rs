//! In-memory cache implementation using moka

use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache as MokaCache;

use crate::domain::DomainError;
use crate::domain::cache::Cache;

/// Configuration for the in-memory cache
#[derive(Debug, Clone)]
pub struct InMemoryCacheConfig {
    /// Maximum number of entries
    pub max_capacity: u64,
    /// Upper bound on how long the backing store keeps an entry after its
    /// last write. Per-entry TTLs passed to `set_raw` stay authoritative;
    /// this only bounds how long expired data lingers in memory.
    pub purge_after: Duration,
}

impl Default for InMemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: 10_000,
            purge_after: Duration::from_secs(600),
        }
    }
}

impl InMemoryCacheConfig {
    pub fn with_max_capacity(mut self, capacity: u64) -> Self {
        self.max_capacity = capacity;
        self
    }

    pub fn with_purge_after(mut self, purge_after: Duration) -> Self {
        self.purge_after = purge_after;
        self
    }
}

/// Cache entry stored in moka
#[derive(Debug, Clone)]
struct CacheEntry {
    /// Serialized JSON value
    data: String,
    /// Expiration timestamp (millis since epoch)
    expires_at: u64,
}

/// Thread-safe in-memory cache backed by moka.
///
/// Entries carry their own expiry and are checked at read time, so a
/// value is authoritative for exactly the TTL it was written with. The
/// moka-level time-to-live acts as a purge backstop that removes stale
/// entries from memory without extending their validity.
#[derive(Debug)]
pub struct InMemoryCache {
    cache: MokaCache<String, CacheEntry>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        Self::with_config(InMemoryCacheConfig::default())
    }

    pub fn with_config(config: InMemoryCacheConfig) -> Self {
        let cache = MokaCache::builder()
            .max_capacity(config.max_capacity)
            .time_to_live(config.purge_after)
            .build();

        Self { cache }
    }

    fn current_time_millis() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }

    fn is_expired(entry: &CacheEntry) -> bool {
        Self::current_time_millis() > entry.expires_at
    }
}

impl Default for InMemoryCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, DomainError> {
        match self.cache.get(key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(key).await;
                    return Ok(None);
                }

                Ok(Some(entry.data.clone()))
            }
            None => Ok(None),
        }
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> Result<(), DomainError> {
        let expires_at = Self::current_time_millis() + ttl.as_millis() as u64;
        let entry = CacheEntry {
            data: value.to_string(),
            expires_at,
        };

        self.cache.insert(key.to_string(), entry).await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<bool, DomainError> {
        let existed = self.cache.get(key).await.is_some();
        self.cache.remove(key).await;
        Ok(existed)
    }

    async fn exists(&self, key: &str) -> Result<bool, DomainError> {
        match self.cache.get(key).await {
            Some(entry) => {
                if Self::is_expired(&entry) {
                    self.cache.remove(key).await;
                    Ok(false)
                } else {
                    Ok(true)
                }
            }
            None => Ok(false),
        }
    }

    async fn ttl(&self, key: &str) -> Result<Option<Duration>, DomainError> {
        match self.cache.get(key).await {
            Some(entry) => {
                let now = Self::current_time_millis();

                if entry.expires_at <= now {
                    self.cache.remove(key).await;
                    Ok(None)
                } else {
                    Ok(Some(Duration::from_millis(entry.expires_at - now)))
                }
            }
            None => Ok(None),
        }
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
        Ok(())
    }

    async fn size(&self) -> Result<usize, DomainError> {
        self.cache.run_pending_tasks().await;
        Ok(self.cache.entry_count() as usize)
    }
}
