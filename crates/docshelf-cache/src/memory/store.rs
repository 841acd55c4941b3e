//! In-memory cache implementation using the moka crate.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use moka::Expiry;
use moka::future::Cache;
use moka::ops::compute::{CompResult, Op};
use tracing::debug;

use docshelf_core::config::cache::MemoryCacheConfig;
use docshelf_core::error::AppError;
use docshelf_core::result::AppResult;
use docshelf_core::traits::cache::CacheProvider;

/// A cached value plus the TTL it should carry after its latest write.
#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    ttl: EntryTtl,
}

#[derive(Debug, Clone, Copy)]
enum EntryTtl {
    /// Reset the expiry to this duration.
    Fixed(Duration),
    /// Keep the remaining lifetime (default TTL for new keys).
    Keep,
}

/// Per-entry expiry policy mirroring Redis semantics.
#[derive(Debug)]
struct EntryExpiry {
    default_ttl: Duration,
}

impl Expiry<String, CacheEntry> for EntryExpiry {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CacheEntry,
        _created_at: Instant,
    ) -> Option<Duration> {
        match value.ttl {
            EntryTtl::Fixed(ttl) => Some(ttl),
            EntryTtl::Keep => Some(self.default_ttl),
        }
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CacheEntry,
        _updated_at: Instant,
        duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        match value.ttl {
            EntryTtl::Fixed(ttl) => Some(ttl),
            EntryTtl::Keep => duration_until_expiry,
        }
    }
}

/// In-memory cache provider using moka with per-entry TTLs.
#[derive(Debug, Clone)]
pub struct MemoryCacheProvider {
    /// The underlying moka cache.
    cache: Cache<String, CacheEntry>,
}

impl MemoryCacheProvider {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig, default_ttl_seconds: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_capacity)
            .expire_after(EntryExpiry {
                default_ttl: Duration::from_secs(default_ttl_seconds),
            })
            .build();

        Self { cache }
    }
}

#[async_trait]
impl CacheProvider for MemoryCacheProvider {
    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.cache.get(key).await.map(|entry| entry.value))
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> AppResult<()> {
        self.cache
            .insert(
                key.to_string(),
                CacheEntry {
                    value: value.to_string(),
                    ttl: EntryTtl::Fixed(ttl),
                },
            )
            .await;
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.cache.remove(key).await;
        Ok(())
    }

    async fn incr(&self, key: &str) -> AppResult<i64> {
        // The upsert runs under moka's per-key lock, so concurrent
        // increments of one key never lose an update.
        let entry = self
            .cache
            .entry(key.to_string())
            .and_upsert_with(|current| async move {
                match current.map(|e| e.into_value()) {
                    Some(existing) => match existing.value.parse::<i64>() {
                        Ok(n) => CacheEntry {
                            value: (n + 1).to_string(),
                            ttl: EntryTtl::Keep,
                        },
                        Err(_) => CacheEntry {
                            value: existing.value,
                            ttl: EntryTtl::Keep,
                        },
                    },
                    None => CacheEntry {
                        value: "1".to_string(),
                        ttl: EntryTtl::Keep,
                    },
                }
            })
            .await;

        entry
            .into_value()
            .value
            .parse::<i64>()
            .map_err(|_| AppError::cache(format!("Value at '{key}' is not an integer")))
    }

    async fn expire(&self, key: &str, ttl: Duration) -> AppResult<bool> {
        let result = self
            .cache
            .entry(key.to_string())
            .and_compute_with(|current| async move {
                match current {
                    Some(entry) => Op::Put(CacheEntry {
                        value: entry.into_value().value,
                        ttl: EntryTtl::Fixed(ttl),
                    }),
                    None => Op::Nop,
                }
            })
            .await;

        let updated = matches!(result, CompResult::ReplacedWith(_));
        debug!(key, updated, ttl_secs = ttl.as_secs(), "Set cache entry TTL");
        Ok(updated)
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }
}
