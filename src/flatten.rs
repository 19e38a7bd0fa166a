// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Record flattening: nested trees in, `(path, value)` leaves out.
//!
//! Every query runs against the flattened form, so the exact shape of paths
//! and values here is what users type into field filters and sort keys.
//!
//! ```text
//! {"user": {"tags": ["a", "b"]}, "age": 30}
//!   → user.tags[0] = "a"
//!   → user.tags[1] = "b"
//!   → age          = "30"
//! ```
//!
//! Objects keep key insertion order (serde_json `preserve_order`), arrays keep
//! index order. Empty objects and arrays have no leaves and contribute nothing.

use crate::types::{FlatRecord, FlattenedEntry, Record};
use crate::utils::format_number;

/// Flatten one record into its leaves, depth-first.
///
/// A scalar record produces exactly one entry with an empty path.
pub fn flatten(record: &Record) -> FlatRecord {
    let mut entries = Vec::new();
    let mut path = String::new();
    flatten_into(record, &mut path, &mut entries);
    entries
}

fn flatten_into(value: &Record, path: &mut String, out: &mut FlatRecord) {
    match value {
        Record::Array(items) => {
            for (idx, item) in items.iter().enumerate() {
                let mark = path.len();
                path.push('[');
                path.push_str(&idx.to_string());
                path.push(']');
                flatten_into(item, path, out);
                path.truncate(mark);
            }
        }
        Record::Object(map) => {
            for (key, item) in map {
                let mark = path.len();
                if !path.is_empty() {
                    path.push('.');
                }
                path.push_str(key);
                flatten_into(item, path, out);
                path.truncate(mark);
            }
        }
        scalar => out.push(FlattenedEntry::new(path.clone(), coerce_scalar(scalar))),
    }
}

/// String coercion of a leaf, following JavaScript `String(x)`.
///
/// Non-scalars render as compact JSON; `flatten` never calls it with one.
pub fn coerce_scalar(value: &Record) -> String {
    match value {
        Record::Null => "null".to_string(),
        Record::Bool(b) => b.to_string(),
        Record::Number(n) => {
            if n.is_i64() || n.is_u64() {
                n.to_string()
            } else {
                n.as_f64().map(format_number).unwrap_or_else(|| n.to_string())
            }
        }
        Record::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flatten every record of a collection, preserving collection order.
///
/// With the `parallel` feature, collections larger than `parallel_threshold`
/// are flattened on the rayon pool.
pub fn flatten_collection(records: &[Record], parallel_threshold: usize) -> Vec<FlatRecord> {
    #[cfg(feature = "parallel")]
    {
        if records.len() > parallel_threshold {
            use rayon::prelude::*;
            return records.par_iter().map(flatten).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel_threshold;

    records.iter().map(flatten).collect()
}
