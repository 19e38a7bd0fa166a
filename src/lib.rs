//! In-memory structured search over heterogeneous JSON records.
//!
//! Records are flattened into `(path, value)` leaves once per collection, then
//! queried with free text or a small clause algebra (`all`, `any`, `=`, `!=`,
//! `>`, `<`, `range`). Lax queries rank matches by how many leaves satisfy
//! them. Results can be sorted by field paths and are memoized per collection
//! identity.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  types.rs   │────▶│  flatten.rs  │────▶│   query/     │
//! │ (Collection,│     │ (path/value  │     │ (clauses,    │
//! │  entries)   │     │  leaves)     │     │  eval)       │
//! └─────────────┘     └──────────────┘     └──────────────┘
//!        │                                        │
//!        ▼                                        ▼
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  cache.rs   │◀────│  engine.rs   │────▶│ scoring/,    │
//! │ (per-id     │     │ (SearchEngine│     │ sort.rs      │
//! │  memo)      │     │  API)        │     │              │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use serde_json::json;
//! use sifter::{Clause, Collection, Operator, SearchEngine, SearchRequest, SortKey};
//!
//! let people = Collection::new(vec![
//!     json!({"name": "Alice", "age": 30}),
//!     json!({"name": "Bob", "age": 25}),
//! ]);
//! let engine = SearchEngine::new();
//!
//! let hits = engine.search_text(&people, "ali", false);
//! assert_eq!(hits.to_vec(), vec![json!({"name": "Alice", "age": 30})]);
//!
//! let request = SearchRequest::clauses(vec![Clause::new(Operator::Range, ["20", "28"], ["age"])])
//!     .sort(vec![SortKey::desc("age")]);
//! assert_eq!(engine.search(&people, &request).len(), 1);
//! ```

mod cache;
pub mod config;
mod engine;
pub mod error;
pub mod flatten;
pub mod query;
pub mod scoring;
pub mod sort;
mod types;
mod utils;

#[doc(hidden)]
pub mod testing;

#[cfg(feature = "wasm")]
mod wasm;

// Re-exports for public API
pub use cache::CacheStats;
pub use config::EngineConfig;
pub use engine::SearchEngine;
pub use error::SifterError;
pub use flatten::{coerce_scalar, flatten, flatten_collection};
pub use query::{Clause, Combination, Operator, Query, SearchRequest};
pub use sort::{sort_records, SortDirection, SortKey};
pub use types::{
    Collection, CollectionId, FlatRecord, FlattenedEntry, Record, SearchResults,
};
pub use utils::{fold_case, parse_number};
