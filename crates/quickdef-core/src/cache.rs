//! In-memory lookup cache with per-call max age.
//! Stale entries stay in place until the next successful store overwrites them.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;
use quickdef_types::LookupKind;
use tokio::time::Instant;

use crate::word::normalize;

/// One entry per (kind, normalized word)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    kind: LookupKind,
    word: String,
}

impl CacheKey {
    pub fn new(kind: LookupKind, word: &str) -> Self {
        Self {
            kind,
            word: normalize(word),
        }
    }

    pub fn word(&self) -> &str {
        &self.word
    }
}

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

pub struct LookupCache<V> {
    entries: Mutex<HashMap<CacheKey, CacheEntry<V>>>,
}

impl<V: Clone> LookupCache<V> {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached value only if it is strictly younger than `max_age`
    pub fn get_fresh(&self, key: &CacheKey, max_age: Duration) -> Option<V> {
        let entries = self.entries.lock();
        let entry = entries.get(key)?;
        if entry.inserted_at.elapsed() < max_age {
            Some(entry.value.clone())
        } else {
            None
        }
    }

    pub fn set(&self, key: CacheKey, value: V) {
        self.entries.lock().insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl<V: Clone> Default for LookupCache<V> {
    fn default() -> Self {
        Self::new()
    }
}
