// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks the engine works with.
//!
//! Records are plain `serde_json::Value` trees with no schema. A `Collection`
//! wraps an ordered sequence of them behind a shared handle with a stable
//! identity, because every cache in this crate is scoped to *which* collection
//! was searched, not to what it contains.
//!
//! # Invariants
//!
//! - **Collection**: the `CollectionId` is assigned once at construction and
//!   shared by every clone of the handle. Two collections built from identical
//!   content never share an id.
//!
//! - **FlattenedEntry**: `folded == value.to_lowercase()`. Construct entries via
//!   `FlattenedEntry::new` so the folded form cannot drift from the value.

use crate::error::SifterError;
use crate::utils::fold_case;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// One searchable item: an arbitrary tree of scalars, objects and arrays.
pub type Record = serde_json::Value;

// =============================================================================
// IDENTITY
// =============================================================================

static NEXT_COLLECTION_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a collection.
///
/// Stands in for reference identity: caches are keyed by this, never by the
/// records themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct CollectionId(pub u64);

impl CollectionId {
    fn next() -> Self {
        CollectionId(NEXT_COLLECTION_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }
}

// =============================================================================
// COLLECTION
// =============================================================================

#[derive(Debug)]
pub(crate) struct CollectionInner {
    pub(crate) id: CollectionId,
    pub(crate) records: Vec<Record>,
}

/// An ordered sequence of records with reference identity.
///
/// Cloning is cheap and keeps the identity. Building a new collection from the
/// same records produces a new identity, and therefore a fresh cache domain.
/// Records are immutable once wrapped; to change the data, build a new
/// collection (or call `SearchEngine::invalidate`).
#[derive(Debug, Clone)]
pub struct Collection {
    inner: Arc<CollectionInner>,
}

impl Collection {
    /// Wrap records into a new collection with a fresh identity.
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            inner: Arc::new(CollectionInner {
                id: CollectionId::next(),
                records,
            }),
        }
    }

    /// Build a collection from a JSON value, which must be an array.
    ///
    /// This is the validation boundary: anything other than an array is
    /// rejected here so that evaluation itself never has to fail.
    pub fn from_json(value: Record) -> Result<Self, SifterError> {
        match value {
            Record::Array(records) => Ok(Self::new(records)),
            other => Err(SifterError::NotACollection {
                found: json_kind(&other),
            }),
        }
    }

    /// Parse a JSON document into a collection.
    pub fn from_json_str(text: &str) -> Result<Self, SifterError> {
        let value: Record = serde_json::from_str(text)?;
        Self::from_json(value)
    }

    pub fn id(&self) -> CollectionId {
        self.inner.id
    }

    pub fn records(&self) -> &[Record] {
        &self.inner.records
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.inner.records.get(index)
    }

    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.is_empty()
    }

    /// True when both handles refer to the same collection.
    pub fn same_identity(&self, other: &Collection) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub(crate) fn downgrade(&self) -> Weak<CollectionInner> {
        Arc::downgrade(&self.inner)
    }
}

impl From<Vec<Record>> for Collection {
    fn from(records: Vec<Record>) -> Self {
        Collection::new(records)
    }
}

/// Name of a JSON value's kind, for error messages.
pub(crate) fn json_kind(value: &Record) -> &'static str {
    match value {
        Record::Null => "null",
        Record::Bool(_) => "boolean",
        Record::Number(_) => "number",
        Record::String(_) => "string",
        Record::Array(_) => "array",
        Record::Object(_) => "object",
    }
}

// =============================================================================
// FLATTENED ENTRIES
// =============================================================================

/// One leaf of a record: its address and its string-coerced value.
///
/// `path` uses dots for object keys and brackets for array indices, e.g.
/// `user.address[0].city`. A scalar record has a single entry with an empty
/// path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlattenedEntry {
    pub path: String,
    pub value: String,
    /// Lower-cased `value`, computed once so matching never re-folds.
    #[serde(skip)]
    pub(crate) folded: String,
}

impl FlattenedEntry {
    pub fn new(path: impl Into<String>, value: impl Into<String>) -> Self {
        let value = value.into();
        let folded = fold_case(&value);
        Self {
            path: path.into(),
            value,
            folded,
        }
    }

    /// The lower-cased value used for case-insensitive matching.
    #[inline]
    pub fn folded(&self) -> &str {
        &self.folded
    }

    /// Whether this entry's path falls under one of `prefixes`.
    ///
    /// An empty prefix list admits every path.
    #[inline]
    pub fn is_eligible(&self, prefixes: &[String]) -> bool {
        prefixes.is_empty() || prefixes.iter().any(|p| self.path.starts_with(p.as_str()))
    }
}

/// All flattened entries of one record, in depth-first order.
pub type FlatRecord = Vec<FlattenedEntry>;

// =============================================================================
// RESULTS
// =============================================================================

/// The outcome of a search: matching records in result order.
///
/// Holds the collection handle plus shared record positions, so cloning is
/// cheap and a cache hit hands back the very same storage as the original
/// evaluation (`ptr_eq`).
#[derive(Debug, Clone)]
pub struct SearchResults {
    collection: Collection,
    indices: Arc<[usize]>,
}

impl SearchResults {
    pub(crate) fn new(collection: Collection, indices: Arc<[usize]>) -> Self {
        Self {
            collection,
            indices,
        }
    }

    /// Positions of the matching records within the collection, in result order.
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Record> + '_ {
        self.indices
            .iter()
            .filter_map(move |&i| self.collection.get(i))
    }

    /// Copy the matching records out.
    pub fn to_vec(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    /// True when both results share the same memoized storage.
    pub fn ptr_eq(&self, other: &SearchResults) -> bool {
        Arc::ptr_eq(&self.indices, &other.indices)
    }
}
