//! Rate limiter for preventing brute force attacks on the login endpoint

use common::settings;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Rate limiter configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RateLimiterConfig {
    /// Failed attempts allowed inside one window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_seconds: u64,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300, // 5 minutes
            ban_seconds: 900,    // 15 minutes
        }
    }
}

impl RateLimiterConfig {
    /// Create a new RateLimiterConfig from environment variables
    ///
    /// # Environment Variables
    /// - `LOGIN_MAX_ATTEMPTS` (default: 5)
    /// - `LOGIN_WINDOW_SECONDS` (default: 300)
    /// - `LOGIN_BAN_SECONDS` (default: 900)
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        settings::env_builder("LOGIN")
            .set_default("max_attempts", defaults.max_attempts as i64)?
            .set_default("window_seconds", defaults.window_seconds as i64)?
            .set_default("ban_seconds", defaults.ban_seconds as i64)?
            .build()?
            .try_deserialize()
    }
}

/// Failure record for one key
#[derive(Debug)]
struct RateLimiterEntry {
    /// Failures inside the current window
    failures: u32,
    /// Start of the current window
    window_start: Instant,
    /// Ban expiration time
    ban_expires: Option<Instant>,
}

impl RateLimiterEntry {
    /// Still counting failures or still banned
    fn is_live(&self, now: Instant, window: Duration) -> bool {
        self.ban_expires.is_some_and(|expires| now < expires)
            || now.duration_since(self.window_start) < window
    }
}

/// Rate limiter counting failed logins per key
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, RateLimiterEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check whether `key` may attempt a login right now
    pub async fn is_allowed(&self, key: &str) -> bool {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();

        let Some(ban_expires) = entries.get(key).map(|entry| entry.ban_expires) else {
            return true;
        };

        match ban_expires {
            Some(ban_expires) if now < ban_expires => false,
            Some(_) => {
                entries.remove(key);
                true
            }
            None => true,
        }
    }

    /// Record a failed attempt, banning `key` once the limit is reached
    ///
    /// Entries whose window has passed without an active ban are dropped
    /// first, so keys that stop failing do not accumulate.
    pub async fn record_failure(&self, key: &str) {
        let mut entries = self.entries.lock().await;
        let now = Instant::now();
        let window = Duration::from_secs(self.config.window_seconds);

        entries.retain(|_, entry| entry.is_live(now, window));

        let entry = entries.entry(key.to_string()).or_insert(RateLimiterEntry {
            failures: 0,
            window_start: now,
            ban_expires: None,
        });

        if now.duration_since(entry.window_start) >= window {
            entry.failures = 0;
            entry.window_start = now;
        }

        entry.failures += 1;

        if entry.failures >= self.config.max_attempts {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_seconds));
            warn!(
                "Banned login key {} for {} seconds",
                key, self.config.ban_seconds
            );
        }
    }

    /// Forget all failures for `key` (after a successful login)
    pub async fn reset(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }
}
