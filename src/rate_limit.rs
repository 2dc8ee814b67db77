use dashmap::DashMap;
use std::time::{Duration, Instant};

// Rate limit entry - tracks requests per client key
pub struct RateLimitEntry {
    pub count: u32,
    pub window_start: Instant,
}

// Fixed-window limiter keyed by client
pub struct RateLimiter {
    entries: DashMap<String, RateLimitEntry>,
    limit: u32,       // max requests allowed per window
    window: Duration, // length of a window
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            limit,
            window,
        }
    }

    // true when the request is allowed
    pub fn check(&self, key: &str) -> bool {
        let now = Instant::now();

        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert(RateLimitEntry {
                count: 0,
                window_start: now,
            });

        // window expired..? reset it
        if entry.window_start.elapsed() > self.window {
            entry.count = 1;
            entry.window_start = now;
            return true;
        }

        if entry.count < self.limit {
            entry.count += 1;
            return true;
        }

        false
    }

    // Drops clients whose window has ended, returns how many were dropped
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| entry.window_start.elapsed() <= self.window);
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allows_up_to_limit() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.check("a"));
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
    }

    #[test]
    fn test_keys_are_independent() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("a"));
        assert!(limiter.check("b"));
        assert!(!limiter.check("a"));
    }

    #[test]
    fn test_purge_drops_finished_windows() {
        let limiter = RateLimiter::new(1, Duration::ZERO);
        for i in 0..5 {
            limiter.check(&format!("10.0.0.{}", i));
        }
        assert_eq!(limiter.len(), 5);

        std::thread::sleep(Duration::from_millis(2));
        assert_eq!(limiter.purge_expired(), 5);
        assert!(limiter.is_empty());
    }

    #[test]
    fn test_purge_keeps_open_windows() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("10.0.0.1"));
        assert_eq!(limiter.purge_expired(), 0);
        assert_eq!(limiter.len(), 1);
        // quota is still spent after the sweep
        assert!(!limiter.check("10.0.0.1"));
    }

    #[test]
    fn test_window_reset() {
        let limiter = RateLimiter::new(1, Duration::ZERO);
        assert!(limiter.check("a"));
        std::thread::sleep(Duration::from_millis(2));
        assert!(limiter.check("a"));
    }
}
