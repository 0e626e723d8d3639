//! Optional short-lived cache of alert API tokens
//!
//! Uses moka for thread-safe concurrent caching with TTL-based expiration.
//! Only successful token fetches are stored, so a failure still surfaces on
//! the call that hit it.

use moka::sync::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use super::model::AuthToken;
use crate::config::AdminApiConfig;

/// One entry per credential set
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct CacheKey {
    url: String,
    username: String,
    password: String,
}

impl CacheKey {
    fn new(config: &AdminApiConfig) -> Self {
        Self {
            url: config.url.trim().to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }
}

pub struct TokenCache {
    cache: Cache<CacheKey, AuthToken>,
    hits: AtomicU64,
    misses: AtomicU64,
    ttl: Duration,
}

impl TokenCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            cache: Cache::builder().max_capacity(16).time_to_live(ttl).build(),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
            ttl,
        }
    }

    pub fn get(&self, config: &AdminApiConfig) -> Option<AuthToken> {
        if let Some(token) = self.cache.get(&CacheKey::new(config)) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            Some(token)
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
            None
        }
    }

    pub fn put(&self, config: &AdminApiConfig, token: AuthToken) {
        self.cache.insert(CacheKey::new(config), token);
    }

    pub fn invalidate(&self, config: &AdminApiConfig) {
        self.cache.invalidate(&CacheKey::new(config));
    }

    pub fn stats(&self) -> TokenCacheStats {
        TokenCacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            ttl_secs: self.ttl.as_secs(),
        }
    }
}

impl std::fmt::Debug for TokenCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub ttl_secs: u64,
}
