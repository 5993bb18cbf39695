//! Fixed-window request limiter for the auth API

use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

const DEFAULT_WINDOW_SECS: u64 = 60;
const DEFAULT_MAX_REQUESTS: u32 = 100;

/// Distinct client keys tracked before new clients share one overflow window
const DEFAULT_MAX_KEYS: usize = 10_000;

/// Bucket for clients that arrive while the table is full. Not a valid address.
const OVERFLOW_KEY: &str = "\0overflow";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub enabled: bool,
    pub window: Duration,
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window: Duration::from_secs(DEFAULT_WINDOW_SECS),
            max_requests: DEFAULT_MAX_REQUESTS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

#[derive(Debug)]
struct WindowTable {
    windows: HashMap<String, Window>,
    last_sweep: Instant,
}

#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    max_keys: usize,
    table: Mutex<WindowTable>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self::with_max_keys(config, DEFAULT_MAX_KEYS)
    }

    pub(crate) fn with_max_keys(config: RateLimitConfig, max_keys: usize) -> Self {
        Self {
            config,
            max_keys,
            table: Mutex::new(WindowTable {
                windows: HashMap::new(),
                last_sweep: Instant::now(),
            }),
        }
    }

    pub fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Count one request for `key`
    pub async fn check(&self, key: &str) -> RateLimitDecision {
        self.check_at(key, Instant::now()).await
    }

    pub(crate) async fn check_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        if !self.config.enabled {
            return RateLimitDecision::Allowed {
                remaining: self.config.max_requests,
            };
        }

        let window = self.config.window;
        let mut table = self.table.lock().await;

        // A full table is swept at most once per window
        if table.windows.len() >= self.max_keys
            && now.saturating_duration_since(table.last_sweep) >= window
        {
            table
                .windows
                .retain(|_, w| now.saturating_duration_since(w.started) < window);
            table.last_sweep = now;
        }

        let key = if table.windows.len() >= self.max_keys && !table.windows.contains_key(key) {
            tracing::debug!(key, "Rate limit table full, using the overflow window");
            OVERFLOW_KEY
        } else {
            key
        };

        let entry = table.windows.entry(key.to_string()).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.config.window {
            entry.started = now;
            entry.count = 0;
        }

        if entry.count >= self.config.max_requests {
            let retry_after = self.config.window - now.saturating_duration_since(entry.started);
            tracing::warn!(key, ?retry_after, "Rate limit exceeded");
            return RateLimitDecision::Limited { retry_after };
        }

        entry.count += 1;
        RateLimitDecision::Allowed {
            remaining: self.config.max_requests - entry.count,
        }
    }
}
