// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for request deserialization.
//!
//! Any bytes that parse as a `SearchRequest` must evaluate without panicking.
//! Malformed clauses are dropped rather than rejected.

#![no_main]

use libfuzzer_sys::fuzz_target;
use serde_json::json;
use sifter::{Collection, SearchEngine, SearchRequest};

fuzz_target!(|data: &[u8]| {
    let Ok(request) = serde_json::from_slice::<SearchRequest>(data) else {
        return;
    };

    let collection = Collection::new(vec![
        json!({"name": "Alice", "age": 30}),
        json!({"name": "Bob", "age": 25, "tags": ["x", "y"]}),
    ]);
    let results = SearchEngine::new().search(&collection, &request);
    assert!(results.len() <= collection.len());
});
