//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures to avoid duplication.

#![doc(hidden)]

use crate::query::{Clause, Operator};
use crate::types::{Collection, Record};
use serde_json::json;

/// The two-person fixture used throughout the docs.
pub fn alice_and_bob() -> Collection {
    Collection::new(vec![
        json!({"name": "Alice", "age": 30}),
        json!({"name": "Bob", "age": 25}),
    ])
}

/// Create a simple person record.
pub fn make_person(name: &str, age: i64) -> Record {
    json!({"name": name, "age": age})
}

/// Create a nested record with an address list and tags.
pub fn make_customer(id: usize, name: &str, city: &str, tags: &[&str]) -> Record {
    json!({
        "id": id,
        "user": {
            "name": name,
            "address": [{"city": city}],
        },
        "tags": tags,
    })
}

/// Shorthand for a clause without field scope.
pub fn clause(operator: Operator, queries: &[&str]) -> Clause {
    Clause::new(operator, queries.iter().copied(), Vec::<String>::new())
}

/// Shorthand for a clause scoped to field prefixes.
pub fn scoped(operator: Operator, queries: &[&str], fields: &[&str]) -> Clause {
    Clause::new(operator, queries.iter().copied(), fields.iter().copied())
}
