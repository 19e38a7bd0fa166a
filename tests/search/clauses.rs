//! Structured clause evaluation in strict mode.

use super::common::{alice_and_bob, customers, positions, products, scoped};
use serde_json::json;
use sifter::{
    Clause, Collection, Combination, EngineConfig, Operator, SearchEngine, SearchRequest,
};

fn strict(clauses: Vec<Clause>) -> SearchRequest {
    SearchRequest::clauses(clauses)
}

// ============================================================================
// OPERATORS
// ============================================================================

#[test]
fn test_any_on_tag_list() {
    let request = strict(vec![scoped(Operator::Any, &["VIP"], &["tags"])]);
    assert_eq!(positions(&customers(), &request), vec![0, 2]);
}

#[test]
fn test_all_needs_every_operand() {
    let request = strict(vec![scoped(Operator::All, &["vip", "nordic"], &["tags"])]);
    assert_eq!(positions(&customers(), &request), vec![0]);
}

#[test]
fn test_not_equal_needs_one_differing_entry() {
    // Carla's only tag is excluded; Dana has no tags at all.
    let request = strict(vec![scoped(Operator::Ne, &["vip"], &["tags"])]);
    assert_eq!(positions(&customers(), &request), vec![0, 1]);
}

#[test]
fn test_equal_compares_numerically() {
    let request = strict(vec![scoped(Operator::Eq, &["25.50"], &["price"])]);
    assert_eq!(positions(&products(), &request), vec![0, 3]);
}

#[test]
fn test_less_than() {
    let request = strict(vec![scoped(Operator::Lt, &["30"], &["price"])]);
    assert_eq!(positions(&products(), &request), vec![0, 3]);
}

#[test]
fn test_range_bounds_are_inclusive() {
    let request = strict(vec![scoped(Operator::Range, &["60", "120"], &["price"])]);
    assert_eq!(positions(&products(), &request), vec![1, 2]);
}

#[test]
fn test_numeric_operator_skips_text_values() {
    let request = strict(vec![scoped(Operator::Gt, &["0"], &["name", "sku"])]);
    assert!(positions(&products(), &request).is_empty());
}

#[test]
fn test_spelled_out_infinity_is_text() {
    let codes = Collection::new(vec![
        json!({"code": "inf"}),
        json!({"code": "Infinity"}),
        json!({"code": "-INF"}),
    ]);
    for op in [Operator::Gt, Operator::Lt] {
        let request = strict(vec![scoped(op, &["0"], &["code"])]);
        assert!(positions(&codes, &request).is_empty());
    }
    let request = strict(vec![scoped(Operator::Range, &["-1e308", "1e308"], &["code"])]);
    assert!(positions(&codes, &request).is_empty());
}

// ============================================================================
// FIELD SCOPE
// ============================================================================

#[test]
fn test_field_prefix_reaches_nested_paths() {
    let request = strict(vec![scoped(Operator::Any, &["o"], &["user.address"])]);
    assert_eq!(positions(&customers(), &request), vec![0, 2]);

    // Prefixes are plain string prefixes, not path segments.
    let request = strict(vec![scoped(Operator::Any, &["o"], &["user.addr"])]);
    assert_eq!(positions(&customers(), &request), vec![0, 2]);
}

#[test]
fn test_text_query_with_fields() {
    let request = SearchRequest::text("oslo").fields(["tags"]);
    assert!(positions(&customers(), &request).is_empty());
    let request = SearchRequest::text("oslo").fields(["user"]);
    assert_eq!(positions(&customers(), &request), vec![0]);
}

// ============================================================================
// COMBINATION
// ============================================================================

#[test]
fn test_clauses_combine_as_conjunction_by_default() {
    let clauses = vec![
        scoped(Operator::Any, &["desk"], &["name"]),
        scoped(Operator::Gt, &["100"], &["price"]),
    ];
    assert_eq!(positions(&products(), &strict(clauses.clone())), vec![1]);

    let mut reversed = clauses;
    reversed.reverse();
    assert_eq!(positions(&products(), &strict(reversed)), vec![1]);
}

#[test]
fn test_union_combination() {
    let engine = SearchEngine::with_config(EngineConfig {
        combination: Combination::Union,
        ..EngineConfig::default()
    });
    let request = strict(vec![
        scoped(Operator::Any, &["chair"], &["name"]),
        scoped(Operator::Eq, &["0"], &["stock"]),
    ]);
    assert_eq!(engine.search(&products(), &request).indices(), &[1, 2]);
}

// ============================================================================
// MALFORMED INPUT
// ============================================================================

#[test]
fn test_malformed_clauses_are_skipped() {
    let clauses: Vec<Clause> = serde_json::from_value(json!([
        {"operator": "~", "queries": ["x"]},
        {"operator": "range", "queries": ["1"]},
        {"operator": ">", "queries": ["many"]},
        {"operator": "any", "queries": ["vip"], "fields": ["tags"]},
    ]))
    .unwrap();
    assert_eq!(clauses[0].operator, Operator::Unknown);
    assert_eq!(positions(&customers(), &strict(clauses)), vec![0, 2]);
}

#[test]
fn test_only_malformed_clauses_filter_nothing() {
    let clauses: Vec<Clause> =
        serde_json::from_value(json!([{"operator": "like", "queries": ["a"]}])).unwrap();
    assert_eq!(
        positions(&customers(), &strict(clauses.clone())),
        vec![0, 1, 2, 3]
    );
    // In lax mode they contribute no score, so nothing ranks.
    assert!(positions(&customers(), &strict(clauses).lax(true)).is_empty());
}

/// One valid clause (Alice is over 26) next to an operand-less one.
fn with_empty_operands(operator: &str) -> Vec<Clause> {
    serde_json::from_value(json!([
        {"operator": ">", "queries": ["26"], "fields": ["age"]},
        {"operator": operator, "fields": ["name"]},
    ]))
    .unwrap()
}

#[test]
fn test_clauses_without_operands_are_skipped() {
    let union = SearchEngine::with_config(EngineConfig {
        combination: Combination::Union,
        ..EngineConfig::default()
    });
    for operator in ["all", "any", "!="] {
        let clauses = with_empty_operands(operator);
        assert!(clauses[1].queries.is_empty());

        let request = strict(clauses.clone());
        assert_eq!(positions(&alice_and_bob(), &request), vec![0], "{}", operator);
        assert_eq!(union.search(&alice_and_bob(), &request).indices(), &[0]);

        let request = strict(clauses).lax(true);
        assert_eq!(positions(&alice_and_bob(), &request), vec![0], "{}", operator);
    }
}

#[test]
fn test_empty_operand_list_is_skipped() {
    let clauses: Vec<Clause> = serde_json::from_value(json!([
        {"operator": "all", "queries": [], "fields": ["name"]},
        {"operator": ">", "queries": ["26"], "fields": ["age"]},
    ]))
    .unwrap();
    let union = SearchEngine::with_config(EngineConfig {
        combination: Combination::Union,
        ..EngineConfig::default()
    });
    assert_eq!(union.search(&alice_and_bob(), &strict(clauses.clone())).indices(), &[0]);
    assert_eq!(positions(&alice_and_bob(), &strict(clauses)), vec![0]);
}

#[test]
fn test_json_clause_forms() {
    let clauses: Vec<Clause> = serde_json::from_value(json!([
        {"match": "==", "queries": [120], "fields": null},
    ]))
    .unwrap();
    assert_eq!(clauses[0].operator, Operator::Eq);
    assert_eq!(clauses[0].queries, vec!["120"]);
    assert!(clauses[0].fields.is_empty());
    assert_eq!(positions(&products(), &strict(clauses)), vec![1]);
}
