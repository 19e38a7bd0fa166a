//! End-to-end behavior on the two-person fixture.
//!
//! Records: `[{name: "Alice", age: 30}, {name: "Bob", age: 25}]`.

use super::common::{alice_and_bob, run, scoped};
use serde_json::json;
use sifter::{sort_records, Operator, SearchRequest, SortKey};

#[test]
fn test_free_text_substring() {
    let results = run(&alice_and_bob(), &SearchRequest::text("ali"));
    assert_eq!(results, vec![json!({"name": "Alice", "age": 30})]);
}

#[test]
fn test_all_clause_scoped_to_name() {
    let request = SearchRequest::clauses(vec![scoped(Operator::All, &["b"], &["name"])]);
    assert_eq!(
        run(&alice_and_bob(), &request),
        vec![json!({"name": "Bob", "age": 25})]
    );
}

#[test]
fn test_greater_than_clause() {
    let request = SearchRequest::clauses(vec![scoped(Operator::Gt, &["26"], &["age"])]);
    assert_eq!(
        run(&alice_and_bob(), &request),
        vec![json!({"name": "Alice", "age": 30})]
    );
}

#[test]
fn test_range_clause() {
    let request = SearchRequest::clauses(vec![scoped(Operator::Range, &["20", "28"], &["age"])]);
    assert_eq!(
        run(&alice_and_bob(), &request),
        vec![json!({"name": "Bob", "age": 25})]
    );
}

#[test]
fn test_lax_text_ranks_by_match_count() {
    // Only "Alice" contains an "a" in this fixture.
    let results = run(&alice_and_bob(), &SearchRequest::text("a").lax(true));
    assert_eq!(results, vec![json!({"name": "Alice", "age": 30})]);

    let collection = sifter::Collection::new(vec![
        json!({"name": "Bob", "city": "Bath"}),
        json!({"name": "Alice", "city": "Paris"}),
        json!({"name": "Dan", "city": "Oslo"}),
    ]);
    let results = run(&collection, &SearchRequest::text("a").lax(true));
    assert_eq!(
        results,
        vec![
            json!({"name": "Alice", "city": "Paris"}),
            json!({"name": "Bob", "city": "Bath"}),
            json!({"name": "Dan", "city": "Oslo"}),
        ]
    );
}

#[test]
fn test_sort_descending_by_age() {
    let collection = alice_and_bob();
    let sorted = sort_records(collection.records(), &[SortKey::desc("age")]);
    assert_eq!(
        sorted,
        vec![
            json!({"name": "Alice", "age": 30}),
            json!({"name": "Bob", "age": 25})
        ]
    );

    let request = SearchRequest::text("").sort(vec![SortKey::asc("age")]);
    assert_eq!(
        run(&collection, &request),
        vec![
            json!({"name": "Bob", "age": 25}),
            json!({"name": "Alice", "age": 30})
        ]
    );
}

#[test]
fn test_empty_collection_returns_nothing() {
    let empty = sifter::Collection::new(vec![]);
    assert!(run(&empty, &SearchRequest::text("a")).is_empty());
    assert!(run(&empty, &SearchRequest::text("a").lax(true)).is_empty());
}
