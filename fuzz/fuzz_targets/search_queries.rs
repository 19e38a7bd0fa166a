// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search evaluation.
//!
//! Arbitrary clause lists, text queries and sort specs against a fixed
//! collection. The engine must never panic, must only return valid distinct
//! positions, and must serve a repeated call from the cache.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::json;
use sifter::{Clause, Collection, Operator, SearchEngine, SearchRequest, SortKey};
use std::collections::HashSet;
use std::sync::OnceLock;

const OPERATORS: [Operator; 8] = [
    Operator::All,
    Operator::Any,
    Operator::Eq,
    Operator::Ne,
    Operator::Gt,
    Operator::Lt,
    Operator::Range,
    Operator::Unknown,
];

#[derive(Debug, Arbitrary)]
struct FuzzClause {
    operator: u8,
    queries: Vec<String>,
    fields: Vec<String>,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    text: Option<String>,
    clauses: Vec<FuzzClause>,
    fields: Vec<String>,
    sort: Vec<String>,
    lax: bool,
}

fn collection() -> &'static Collection {
    static COLLECTION: OnceLock<Collection> = OnceLock::new();
    COLLECTION.get_or_init(|| {
        Collection::new(vec![
            json!({"name": "Alice", "age": 30, "tags": ["admin", "ops"]}),
            json!({"name": "Bob", "age": 25, "address": {"city": "Oslo"}}),
            json!({"name": "Åsa", "age": -1.5, "joined": "2021-04-01"}),
            json!([1, [2, [3]], {"deep": null}]),
            json!("scalar record"),
            json!({}),
        ])
    })
}

fuzz_target!(|input: FuzzInput| {
    let query = match input.text {
        Some(text) => SearchRequest::text(text),
        None => SearchRequest::clauses(
            input
                .clauses
                .into_iter()
                .take(16)
                .map(|c| {
                    let op = OPERATORS[c.operator as usize % OPERATORS.len()];
                    Clause::new(op, c.queries, c.fields)
                })
                .collect(),
        ),
    };
    let sort: Vec<SortKey> = input
        .sort
        .iter()
        .take(4)
        .filter_map(|s| s.parse().ok())
        .collect();
    let request = query.fields(input.fields).sort(sort).lax(input.lax);

    let engine = SearchEngine::new();
    let coll = collection();
    let results = engine.search(coll, &request);

    // INVARIANT 1: Positions are in bounds and distinct
    let mut seen = HashSet::new();
    for &i in results.indices() {
        assert!(i < coll.len(), "Position {} out of bounds", i);
        assert!(seen.insert(i), "Position {} returned twice", i);
    }

    // INVARIANT 2: Strict results without a sort keep collection order
    if !request.lax && request.sort.is_empty() {
        assert!(
            results.indices().windows(2).all(|w| w[0] < w[1]),
            "Strict results out of collection order"
        );
    }

    // INVARIANT 3: A repeated call is a cache hit
    let again = engine.search(coll, &request);
    assert!(results.ptr_eq(&again), "Repeated search was not served from cache");
});
