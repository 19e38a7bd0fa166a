// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for record flattening.
//!
//! Any JSON document must flatten without panicking, deterministically, with
//! unique paths that resolve back to the leaf they came from.

#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::Value;
use sifter::sort::resolve_path;
use sifter::{coerce_scalar, flatten};
use std::collections::HashSet;

fn has_ambiguous_key(value: &Value) -> bool {
    match value {
        Value::Object(map) => map.iter().any(|(key, child)| {
            key.is_empty() || key.contains(['.', '[', ']']) || has_ambiguous_key(child)
        }),
        Value::Array(items) => items.iter().any(has_ambiguous_key),
        _ => false,
    }
}

fuzz_target!(|data: &[u8]| {
    let Ok(record) = serde_json::from_slice::<Value>(data) else {
        return;
    };

    let first = flatten(&record);
    let second = flatten(&record);

    // INVARIANT 1: Flattening is deterministic
    assert_eq!(first, second, "Flattening the same record twice differed");

    // Empty keys and keys containing '.', '[' or ']' are ambiguous in path
    // syntax; the remaining invariants only hold without them.
    if has_ambiguous_key(&record) {
        return;
    }

    // INVARIANT 2: Paths are unique within a record
    let paths: HashSet<&str> = first.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(paths.len(), first.len(), "Duplicate path in flattened record");

    // INVARIANT 3: Every path resolves back to its leaf
    for entry in &first {
        let leaf = resolve_path(&record, &entry.path)
            .unwrap_or_else(|| panic!("Path '{}' did not resolve", entry.path));
        assert_eq!(coerce_scalar(leaf), entry.value);
    }
});
