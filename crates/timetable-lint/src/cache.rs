//! Short-lived key/value staging between invocations
//!
//! A full schedule lint stages the unknown subjects and locations it found;
//! the promote operations read them back.

use std::time::{Duration, Instant};

use ahash::AHashMap;

/// Key/value store with per-entry expiry
pub trait StagingCache {
    /// Store `value` under `key` for `ttl`, replacing any previous value
    fn put(&mut self, key: &str, value: &str, ttl: Duration);

    /// The live value under `key`
    fn get(&self, key: &str) -> Option<String>;
}

/// In-process [`StagingCache`]
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: AHashMap<String, (String, Instant)>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StagingCache for MemoryCache {
    fn put(&mut self, key: &str, value: &str, ttl: Duration) {
        self.entries
            .insert(key.to_string(), (value.to_string(), Instant::now() + ttl));
    }

    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .get(key)
            .filter(|(_, expires)| Instant::now() < *expires)
            .map(|(value, _)| value.clone())
    }
}

impl<C: StagingCache + ?Sized> StagingCache for &mut C {
    fn put(&mut self, key: &str, value: &str, ttl: Duration) {
        (**self).put(key, value, ttl)
    }

    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}
