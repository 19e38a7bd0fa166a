// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-collection memoization: flattened records and finished result sets.
//!
//! The table is keyed by `CollectionId` and each entry holds only a `Weak`
//! reference to its collection, so caching never keeps records alive. Entries
//! whose collection is gone are swept whenever a new entry is inserted, or
//! on demand through `evict_dropped`.
//!
//! Result sets are keyed by the full `SearchRequest`. They are never
//! recomputed while the entry lives: a hit returns the same `Arc` the miss
//! stored. When `capacity` is set, each collection keeps at most that many
//! result sets and evicts the least recently used one first.

use crate::query::SearchRequest;
use crate::types::{Collection, CollectionId, CollectionInner, FlatRecord};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Snapshot of cache occupancy and effectiveness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Collections with a live cache entry.
    pub collections: usize,
    /// Memoized result sets across all collections.
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Debug)]
struct CachedResult {
    indices: Arc<[usize]>,
    last_used: u64,
}

/// Result sets for one collection.
#[derive(Debug, Default)]
struct QueryCache {
    entries: HashMap<SearchRequest, CachedResult>,
    clock: u64,
}

impl QueryCache {
    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn get(&mut self, request: &SearchRequest) -> Option<Arc<[usize]>> {
        let now = self.tick();
        self.entries.get_mut(request).map(|entry| {
            entry.last_used = now;
            Arc::clone(&entry.indices)
        })
    }

    fn insert(
        &mut self,
        request: SearchRequest,
        indices: Arc<[usize]>,
        capacity: Option<usize>,
    ) -> Arc<[usize]> {
        let now = self.tick();
        if let Some(existing) = self.entries.get_mut(&request) {
            // Another caller stored this key first; keep theirs so every hit
            // shares one allocation.
            existing.last_used = now;
            return Arc::clone(&existing.indices);
        }
        if let Some(cap) = capacity {
            while self.entries.len() >= cap.max(1) {
                let Some(oldest) = self
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.last_used)
                    .map(|(k, _)| k.clone())
                else {
                    break;
                };
                self.entries.remove(&oldest);
                debug!("evicted least recently used result set");
            }
        }
        self.entries.insert(
            request,
            CachedResult {
                indices: Arc::clone(&indices),
                last_used: now,
            },
        );
        indices
    }
}

#[derive(Debug)]
struct CollectionCache {
    owner: Weak<CollectionInner>,
    flattened: Arc<[FlatRecord]>,
    results: QueryCache,
}

impl CollectionCache {
    fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

/// Side table mapping collection identities to their caches.
#[derive(Debug, Default)]
pub struct CacheTable {
    collections: HashMap<CollectionId, CollectionCache>,
    capacity: Option<usize>,
    hits: u64,
    misses: u64,
}

impl CacheTable {
    /// Create a table; `capacity` bounds result sets per collection.
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Flattened records for a collection, if already computed.
    pub fn flattened(&self, id: CollectionId) -> Option<Arc<[FlatRecord]>> {
        self.collections
            .get(&id)
            .map(|cache| Arc::clone(&cache.flattened))
    }

    /// Store flattened records, returning whichever copy ends up cached.
    pub fn insert_flattened(
        &mut self,
        collection: &Collection,
        flattened: Arc<[FlatRecord]>,
    ) -> Arc<[FlatRecord]> {
        if let Some(cache) = self.collections.get(&collection.id()) {
            return Arc::clone(&cache.flattened);
        }
        self.evict_dropped();
        debug!(
            collection = collection.id().get(),
            records = flattened.len(),
            "caching flattened collection"
        );
        self.collections.insert(
            collection.id(),
            CollectionCache {
                owner: collection.downgrade(),
                flattened: Arc::clone(&flattened),
                results: QueryCache::default(),
            },
        );
        flattened
    }

    /// Look up a memoized result set, counting the hit or miss.
    pub fn lookup(&mut self, id: CollectionId, request: &SearchRequest) -> Option<Arc<[usize]>> {
        let found = self
            .collections
            .get_mut(&id)
            .and_then(|cache| cache.results.get(request));
        match found {
            Some(_) => self.hits += 1,
            None => self.misses += 1,
        }
        found
    }

    /// Memoize a result set. The first stored value for a key wins and is
    /// returned. Without a flattened entry for `id` nothing is stored.
    pub fn store(
        &mut self,
        id: CollectionId,
        request: SearchRequest,
        indices: Arc<[usize]>,
    ) -> Arc<[usize]> {
        let capacity = self.capacity;
        match self.collections.get_mut(&id) {
            Some(cache) => cache.results.insert(request, indices, capacity),
            None => indices,
        }
    }

    /// Drop everything cached for one collection.
    pub fn invalidate(&mut self, id: CollectionId) -> bool {
        self.collections.remove(&id).is_some()
    }

    /// Drop caches whose collection no longer exists. Returns how many.
    pub fn evict_dropped(&mut self) -> usize {
        let before = self.collections.len();
        self.collections.retain(|_, cache| cache.is_alive());
        let evicted = before - self.collections.len();
        if evicted > 0 {
            debug!(evicted, "swept caches of dropped collections");
        }
        evicted
    }

    pub fn clear(&mut self) {
        self.collections.clear();
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            collections: self.collections.len(),
            entries: self
                .collections
                .values()
                .map(|cache| cache.results.entries.len())
                .sum(),
            hits: self.hits,
            misses: self.misses,
        }
    }
}
