//! Lax (ranked) evaluation: scoring, ordering, and interaction with sort.

use super::common::{customers, positions, run, scoped};
use sifter::{Operator, SearchRequest, SortKey};

#[test]
fn test_lax_text_orders_by_score_then_position() {
    // Scores: Ann 2 (oslo, nordic), Bjorn 2 (bjorn, nordic), Carla 1 (rome), Dana 0.
    let request = SearchRequest::text("o").lax(true);
    assert_eq!(positions(&customers(), &request), vec![0, 1, 2]);
}

#[test]
fn test_lax_scores_sum_across_clauses() {
    let request = SearchRequest::clauses(vec![
        scoped(Operator::Any, &["vip"], &["tags"]),
        scoped(Operator::Gt, &["2"], &["id"]),
    ])
    .lax(true);
    assert_eq!(positions(&customers(), &request), vec![2, 0, 3]);
}

#[test]
fn test_lax_all_gives_partial_credit() {
    let clauses = vec![scoped(Operator::All, &["vip", "nordic"], &["tags"])];
    let strict = SearchRequest::clauses(clauses.clone());
    assert_eq!(positions(&customers(), &strict), vec![0]);

    let lax = SearchRequest::clauses(clauses).lax(true);
    assert_eq!(positions(&customers(), &lax), vec![0, 1, 2]);
}

#[test]
fn test_user_sort_overrides_ranking() {
    let request = SearchRequest::text("o")
        .lax(true)
        .sort(vec![SortKey::desc("user.name")]);
    assert_eq!(positions(&customers(), &request), vec![2, 1, 0]);
}

#[test]
fn test_scores_never_leak_into_records() {
    let collection = customers();
    let results = run(&collection, &SearchRequest::text("o").lax(true));
    for record in &results {
        assert!(record.get("score").is_none());
    }
    assert_eq!(results[0], collection.records()[0]);
}
