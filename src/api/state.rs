//! Shared API state
//!
//! API key registry and the in-memory rate limiter.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

use crate::config::{ApiKeyEntry, Config};

/// State shared by every request
#[derive(Debug, Clone)]
pub struct AppState {
    pub api_keys: Arc<ApiKeyRegistry>,
    pub rate_limiter: Arc<RateLimiter>,
    pub max_batch_size: usize,
}

impl AppState {
    pub fn new(api_keys: ApiKeyRegistry, rate_limiter: RateLimiter, max_batch_size: usize) -> Self {
        Self {
            api_keys: Arc::new(api_keys),
            rate_limiter: Arc::new(rate_limiter),
            max_batch_size,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            ApiKeyRegistry::new(config.api_keys.iter().cloned()),
            RateLimiter::per_minute(config.rate_limit_per_minute),
            config.max_batch_size,
        )
    }
}

// =========================================================================
// API keys
// =========================================================================

/// Hex SHA-256 of an API key, the form keys are configured in
pub fn hash_api_key(key: &str) -> String {
    hex::encode(Sha256::digest(key.as_bytes()))
}

/// Accepted API keys, indexed by digest
#[derive(Debug, Default)]
pub struct ApiKeyRegistry {
    by_hash: HashMap<String, String>,
}

impl ApiKeyRegistry {
    pub fn new(entries: impl IntoIterator<Item = ApiKeyEntry>) -> Self {
        Self {
            by_hash: entries
                .into_iter()
                .map(|entry| (entry.key_hash, entry.name))
                .collect(),
        }
    }

    /// Name of the key if it is accepted
    pub fn authenticate(&self, key: &str) -> Option<&str> {
        self.by_hash.get(&hash_api_key(key)).map(String::as_str)
    }
}

// =========================================================================
// Rate limiting
// =========================================================================

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Fixed-window request counter per API key
#[derive(Debug)]
pub struct RateLimiter {
    limit: u32,
    window: Duration,
    windows: Mutex<HashMap<String, Window>>,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            limit,
            window,
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn per_minute(limit: u32) -> Self {
        Self::new(limit, Duration::from_secs(60))
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Window>> {
        // a panicked holder cannot leave a window half-updated
        self.windows.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Count a request and report whether it is within the limit
    pub fn check_and_increment(&self, key: &str) -> bool {
        self.check_at(key, Instant::now())
    }

    fn check_at(&self, key: &str, now: Instant) -> bool {
        let mut windows = self.lock();
        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(window.started_at) >= self.window {
            *window = Window {
                started_at: now,
                count: 0,
            };
        }

        if window.count >= self.limit {
            return false;
        }
        window.count += 1;
        true
    }

    /// Drop windows that have ended; returns how many were removed
    pub fn evict_expired(&self) -> usize {
        self.evict_at(Instant::now())
    }

    fn evict_at(&self, now: Instant) -> usize {
        let mut windows = self.lock();
        let before = windows.len();
        windows.retain(|_, w| now.duration_since(w.started_at) < self.window);
        before - windows.len()
    }

    /// Keys with an open window
    pub fn tracked_keys(&self) -> usize {
        self.lock().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_api_key() {
        assert_eq!(
            hash_api_key("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            hash_api_key("test_key_123"),
            "1f8e8c97805e4ad56c611029fbba4c04dab40bf05d18c46655696357705cc136"
        );
    }

    #[test]
    fn test_registry_authenticates_by_digest() {
        let registry = ApiKeyRegistry::new(vec![ApiKeyEntry {
            name: "portal".to_string(),
            key_hash: hash_api_key("s3cret"),
        }]);

        assert_eq!(registry.authenticate("s3cret"), Some("portal"));
        assert_eq!(registry.authenticate("S3cret"), None);
        assert_eq!(ApiKeyRegistry::default().authenticate("s3cret"), None);
    }

    #[test]
    fn test_rate_limiter_blocks_after_limit() {
        let limiter = RateLimiter::per_minute(2);

        assert!(limiter.check_and_increment("a"));
        assert!(limiter.check_and_increment("a"));
        assert!(!limiter.check_and_increment("a"));
        // other keys have their own window
        assert!(limiter.check_and_increment("b"));
    }

    #[test]
    fn test_rate_limiter_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();

        assert!(limiter.check_at("a", start));
        assert!(!limiter.check_at("a", start + Duration::from_secs(59)));
        assert!(limiter.check_at("a", start + Duration::from_secs(60)));
    }

    #[test]
    fn test_evict_expired_windows() {
        let limiter = RateLimiter::new(5, Duration::from_secs(60));
        let start = Instant::now();

        limiter.check_at("old", start);
        limiter.check_at("new", start + Duration::from_secs(30));

        assert_eq!(limiter.evict_at(start + Duration::from_secs(61)), 1);
        assert_eq!(limiter.tracked_keys(), 1);
    }
}
