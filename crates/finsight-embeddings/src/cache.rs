//! In-memory query-embedding cache.
//!
//! Queries repeat heavily across a session (interactive refinement,
//! evaluation reruns), so the remote provider fronts itself with a
//! small moka cache keyed by blake3 content hash.

use std::time::Duration;

use moka::sync::Cache;

pub(crate) struct QueryCache {
    cache: Cache<String, Vec<f32>>,
}

impl QueryCache {
    pub fn new(max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(1800))
            .build();
        Self { cache }
    }

    pub fn key(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }

    pub fn get(&self, key: &str) -> Option<Vec<f32>> {
        self.cache.get(key)
    }

    pub fn put(&self, key: String, vector: &[f32]) {
        self.cache.insert(key, vector.to_vec());
    }
}
