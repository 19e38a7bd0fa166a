// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The search engine: flatten once, evaluate, rank, sort, memoize.
//!
//! ```text
//! search(collection, request)
//!   │
//!   ├─ cache hit? ──────────────────────────────▶ same Arc as before
//!   │
//!   ├─ flattened(collection)     (computed once per collection identity)
//!   ├─ evaluate                  (strict filter or lax score + rank)
//!   ├─ sort_indices              (user sort spec, stable)
//!   └─ store ───────────────────────────────────▶ SearchResults
//! ```
//!
//! The cache lock is held only around lookups and insertions. Evaluation runs
//! unlocked, so concurrent misses on the same key may both evaluate; the first
//! insertion wins and both callers receive the stored result.

use crate::cache::{CacheStats, CacheTable};
use crate::config::EngineConfig;
use crate::flatten::flatten_collection;
use crate::query::{evaluate, Clause, SearchRequest};
use crate::sort::sort_indices;
use crate::types::{Collection, FlatRecord, SearchResults};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, trace};

/// In-memory search over collections of JSON records.
#[derive(Debug, Default)]
pub struct SearchEngine {
    config: EngineConfig,
    caches: Mutex<CacheTable>,
}

impl SearchEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let caches = Mutex::new(CacheTable::new(config.max_cached_queries));
        Self { config, caches }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Flattened form of every record, in collection order.
    ///
    /// Computed on first use per collection identity; later calls share the
    /// same allocation.
    pub fn flattened(&self, collection: &Collection) -> Arc<[FlatRecord]> {
        if let Some(flat) = self.caches.lock().flattened(collection.id()) {
            return flat;
        }
        let flat: Arc<[FlatRecord]> =
            flatten_collection(collection.records(), self.config.parallel_threshold).into();
        self.caches.lock().insert_flattened(collection, flat)
    }

    /// Run a request against a collection.
    ///
    /// Never fails: malformed clauses are skipped, and an empty collection
    /// yields empty results.
    pub fn search(&self, collection: &Collection, request: &SearchRequest) -> SearchResults {
        let id = collection.id();
        if let Some(indices) = self.caches.lock().lookup(id, request) {
            debug!(collection = id.get(), hits = indices.len(), "result cache hit");
            return SearchResults::new(collection.clone(), indices);
        }

        let started = Instant::now();
        let flattened = self.flattened(collection);
        let mut indices = evaluate(&flattened, request, self.config.combination);
        sort_indices(collection.records(), &mut indices, &request.sort);

        debug!(
            collection = id.get(),
            matched = indices.len(),
            lax = request.lax,
            "result cache miss"
        );
        trace!(elapsed_us = started.elapsed().as_micros() as u64, "evaluated request");

        let stored = self
            .caches
            .lock()
            .store(id, request.clone(), Arc::from(indices));
        SearchResults::new(collection.clone(), stored)
    }

    /// Free-text search over every path.
    pub fn search_text(&self, collection: &Collection, query: &str, lax: bool) -> SearchResults {
        self.search(collection, &SearchRequest::text(query).lax(lax))
    }

    /// Structured search with a clause list.
    pub fn search_clauses(
        &self,
        collection: &Collection,
        clauses: Vec<Clause>,
        lax: bool,
    ) -> SearchResults {
        self.search(collection, &SearchRequest::clauses(clauses).lax(lax))
    }

    /// Forget everything cached for `collection`.
    ///
    /// Returns whether anything was cached.
    pub fn invalidate(&self, collection: &Collection) -> bool {
        self.caches.lock().invalidate(collection.id())
    }

    /// Reclaim caches of collections that have been dropped.
    pub fn evict_dropped(&self) -> usize {
        self.caches.lock().evict_dropped()
    }

    pub fn clear(&self) {
        self.caches.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.caches.lock().stats()
    }
}
