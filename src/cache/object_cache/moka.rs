use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use tracing::debug;

use crate::cache::{CacheResult, ObjectCache};
use crate::config::AppConfig;
use crate::declare_object_cache_plugin;

declare_object_cache_plugin!("moka", MokaCacheWrapper);

/// 值与其有效期（秒）
type Entry = (String, u64);

/// 按条目设置过期时间
struct PerEntryTtl;

impl Expiry<String, Entry> for PerEntryTtl {
    fn expire_after_create(&self, _key: &String, value: &Entry, _created_at: Instant) -> Option<Duration> {
        Some(Duration::from_secs(value.1))
    }
}

pub struct MokaCacheWrapper {
    inner: Cache<String, Entry>,
    default_ttl: u64,
}

impl MokaCacheWrapper {
    pub fn new() -> Result<Self, String> {
        let config = AppConfig::get();
        Ok(Self::with_capacity(
            config.cache.memory.max_capacity,
            config.cache.default_ttl,
        ))
    }

    pub fn with_capacity(max_capacity: u64, default_ttl: u64) -> Self {
        let inner = Cache::builder()
            .max_capacity(max_capacity)
            .expire_after(PerEntryTtl)
            .build();

        debug!(
            "MokaCacheWrapper initialized with max capacity: {}",
            max_capacity
        );
        Self { inner, default_ttl }
    }
}

#[async_trait]
impl ObjectCache for MokaCacheWrapper {
    async fn get_raw(&self, key: &str) -> CacheResult<String> {
        if let Some((value, _)) = self.inner.get(key).await {
            debug!("Successfully retrieved key: {}", key);
            CacheResult::Found(value)
        } else {
            debug!("Key not found in cache: {}", key);
            CacheResult::NotFound
        }
    }

    async fn insert_raw(&self, key: String, value: String, ttl: u64) {
        let effective_ttl = if ttl == 0 { self.default_ttl } else { ttl };
        self.inner.insert(key, (value, effective_ttl)).await;
    }

    async fn remove(&self, key: &str) {
        self.inner.invalidate(key).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let cache = MokaCacheWrapper::with_capacity(100, 60);
        cache
            .insert_raw("session:abc".to_string(), "42".to_string(), 0)
            .await;
        assert_eq!(
            cache.get_raw("session:abc").await,
            CacheResult::Found("42".to_string())
        );

        cache.remove("session:abc").await;
        assert_eq!(cache.get_raw("session:abc").await, CacheResult::NotFound);
    }

    #[tokio::test]
    async fn test_entry_expires() {
        let cache = MokaCacheWrapper::with_capacity(100, 60);
        cache.insert_raw("k".to_string(), "v".to_string(), 1).await;
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert_eq!(cache.get_raw("k").await, CacheResult::NotFound);
    }
}
