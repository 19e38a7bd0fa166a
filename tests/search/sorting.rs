//! Sort specifications applied to search results and plain record lists.

use super::common::{customers, names, positions, products};
use serde_json::json;
use sifter::{sort_records, Collection, SearchRequest, SortKey};

fn everything(sort: Vec<SortKey>) -> SearchRequest {
    SearchRequest::text("").sort(sort)
}

fn key(spec: &str) -> SortKey {
    spec.parse().unwrap()
}

#[test]
fn test_multi_key_sort() {
    let request = everything(vec![key("price"), key("name:desc")]);
    assert_eq!(positions(&products(), &request), vec![0, 3, 2, 1]);
}

#[test]
fn test_equal_keys_keep_input_order() {
    let request = everything(vec![key("price")]);
    assert_eq!(positions(&products(), &request), vec![0, 3, 2, 1]);
}

#[test]
fn test_missing_values_sort_last_in_both_directions() {
    assert_eq!(
        positions(&products(), &everything(vec![key("added")])),
        vec![1, 3, 0, 2]
    );
    assert_eq!(
        positions(&products(), &everything(vec![key("added:desc")])),
        vec![0, 3, 1, 2]
    );
}

#[test]
fn test_fallback_candidates() {
    let records = vec![
        json!({"id": "a", "updated": "2024-05-01", "created": "2020-01-01"}),
        json!({"id": "b", "created": "2023-01-01"}),
        json!({"id": "c", "updated": null, "created": "2021-06-01"}),
    ];
    // A present null stops the fallback, so "c" sorts with the missing keys.
    let sorted = sort_records(&records, &[key("updated|created")]);
    assert_eq!(names(&sorted, "id"), vec!["b", "a", "c"]);
}

#[test]
fn test_text_ignores_case() {
    let records = vec![
        json!({"name": "bob"}),
        json!({"name": "Alice"}),
        json!({"name": "carl"}),
    ];
    let sorted = sort_records(&records, &[SortKey::asc("name")]);
    assert_eq!(names(&sorted, "name"), vec!["Alice", "bob", "carl"]);
}

#[test]
fn test_nested_path_sort() {
    let request = everything(vec![key("user.address[0].city")]);
    assert_eq!(positions(&customers(), &request), vec![1, 0, 3, 2]);
}

#[test]
fn test_mixed_kinds_have_fixed_order() {
    let records = vec![json!({"v": "x"}), json!({"v": 3}), json!({"v": true})];
    let sorted = sort_records(&records, &[SortKey::asc("v")]);
    assert_eq!(sorted, vec![json!({"v": true}), json!({"v": 3}), json!({"v": "x"})]);
}

#[test]
fn test_sort_records_leaves_input_alone() {
    let collection = Collection::new(vec![json!({"n": 2}), json!({"n": 1})]);
    let sorted = sort_records(collection.records(), &[SortKey::asc("n")]);
    assert_eq!(sorted, vec![json!({"n": 1}), json!({"n": 2})]);
    assert_eq!(collection.records()[0], json!({"n": 2}));
}
