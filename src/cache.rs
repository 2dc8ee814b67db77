use dashmap::DashMap;
use prometheus::Gauge;
use sha2::{Digest, Sha256};
use std::time::{Duration, Instant};

use crate::metrics::CACHE_SIZE;
use crate::models::GenerationRequest;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

// Cache entry with timestamp
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub content: String,
    pub created_at: Instant,
}

impl CacheEntry {
    fn is_fresh(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() < ttl
    }
}

// Short, stable hash of the topic. Collisions only cost a cache reuse.
fn topic_hash(topic: &str) -> String {
    let digest = Sha256::digest(topic.as_bytes());
    digest[..8].iter().map(|b| format!("{:02x}", b)).collect()
}

// Cache key: content type, language, tone and a hash of the topic
pub fn fingerprint(req: &GenerationRequest) -> String {
    format!(
        "{}-{}-{}-{}",
        req.content_type.as_str(),
        req.language.as_str(),
        req.tone.as_str(),
        topic_hash(&req.topic)
    )
}

/// Generated content keyed by fingerprint. Entries expire a fixed time after
/// insertion regardless of how often they are read. `size` tracks the entry
/// count after every insert or removal.
pub struct ResultCache {
    entries: DashMap<String, CacheEntry>,
    ttl: Duration,
    size: Gauge,
}

impl ResultCache {
    pub fn new(ttl: Duration) -> Self {
        Self::with_size_gauge(ttl, CACHE_SIZE.clone())
    }

    pub fn with_size_gauge(ttl: Duration, size: Gauge) -> Self {
        Self {
            entries: DashMap::new(),
            ttl,
            size,
        }
    }

    fn record_size(&self) {
        self.size.set(self.entries.len() as f64);
    }

    pub fn get(&self, key: &str) -> Option<String> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_fresh(self.ttl) {
                return Some(entry.content.clone());
            }
        }
        // expired, drop it unless someone refreshed it meanwhile
        if self
            .entries
            .remove_if(key, |_, entry| !entry.is_fresh(self.ttl))
            .is_some()
        {
            self.record_size();
        }
        None
    }

    pub fn set(&self, key: String, content: String) {
        self.entries.insert(
            key,
            CacheEntry {
                content,
                created_at: Instant::now(),
            },
        );
        self.record_size();
    }

    /// Removes every expired entry and returns how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_fresh(self.ttl));
        self.record_size();
        before.saturating_sub(self.entries.len())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}
