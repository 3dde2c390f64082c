// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Keyed values that expire `ttl` after they were fetched.
///
/// The caller passes `now`, so expiry is deterministic under test.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: HashMap<K, (Instant, V)>,
}

impl<K, V> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<K: Eq + Hash, V: Clone> TtlCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached value if younger than `ttl`, else the result of `fetch`.
    ///
    /// A failed fetch leaves any stale entry in place.
    pub fn get_or_fetch<E, F>(&mut self, key: K, ttl: Duration, now: Instant, fetch: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some((stored_at, v)) = self.entries.get(&key) {
            if now.saturating_duration_since(*stored_at) < ttl {
                return Ok(v.clone());
            }
        }
        tracing::debug!("cache miss, fetching");
        let v = fetch()?;
        self.entries.insert(key, (now, v.clone()));
        Ok(v)
    }

    pub fn invalidate(&mut self, key: &K) {
        self.entries.remove(key);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
