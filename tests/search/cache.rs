//! Result memoization keyed by collection identity.

use super::common::{alice_and_bob, customers};
use serde_json::json;
use sifter::{Collection, EngineConfig, SearchEngine, SearchRequest, SortKey};

#[test]
fn test_repeat_search_returns_same_allocation() {
    let engine = SearchEngine::new();
    let people = alice_and_bob();
    let request = SearchRequest::text("a").sort(vec![SortKey::desc("age")]);
    let first = engine.search(&people, &request);
    let second = engine.search(&people, &request);
    assert!(first.ptr_eq(&second));
    assert_eq!(engine.stats().hits, 1);
}

#[test]
fn test_cloned_handle_shares_identity() {
    let engine = SearchEngine::new();
    let people = alice_and_bob();
    let alias = people.clone();
    let first = engine.search_text(&people, "bob", false);
    let second = engine.search_text(&alias, "bob", false);
    assert!(first.ptr_eq(&second));
}

#[test]
fn test_equal_content_is_a_different_collection() {
    let engine = SearchEngine::new();
    let a = alice_and_bob();
    let b = alice_and_bob();
    assert!(!a.same_identity(&b));

    let first = engine.search_text(&a, "ali", false);
    let second = engine.search_text(&b, "ali", false);
    assert!(!first.ptr_eq(&second));
    assert_eq!(first.to_vec(), second.to_vec());
    assert_eq!(engine.stats().collections, 2);
}

#[test]
fn test_key_covers_query_sort_and_mode() {
    let engine = SearchEngine::new();
    let people = alice_and_bob();
    let base = SearchRequest::text("a");
    engine.search(&people, &base);
    engine.search(&people, &base.clone().lax(true));
    engine.search(&people, &base.clone().sort(vec![SortKey::asc("age")]));
    engine.search(&people, &base.clone().fields(["name"]));
    let stats = engine.stats();
    assert_eq!(stats.entries, 4);
    assert_eq!(stats.hits, 0);
}

#[test]
fn test_invalidate_after_mutation() {
    let engine = SearchEngine::new();
    let people = alice_and_bob();
    assert_eq!(engine.search_text(&people, "ali", false).len(), 1);
    assert!(engine.invalidate(&people));
    assert!(!engine.invalidate(&people));
    assert_eq!(engine.stats().collections, 0);
}

#[test]
fn test_dropped_collections_are_reclaimed() {
    let engine = SearchEngine::new();
    {
        let temp = Collection::new(vec![json!({"name": "Eve"})]);
        engine.search_text(&temp, "eve", false);
    }
    assert_eq!(engine.stats().collections, 1);
    assert_eq!(engine.evict_dropped(), 1);
    assert_eq!(engine.stats().collections, 0);
}

#[test]
fn test_results_keep_collection_alive() {
    let engine = SearchEngine::new();
    let results = {
        let temp = Collection::new(vec![json!({"name": "Eve"})]);
        engine.search_text(&temp, "eve", false)
    };
    assert_eq!(engine.evict_dropped(), 0);
    assert_eq!(results.to_vec(), vec![json!({"name": "Eve"})]);
}

#[test]
fn test_bounded_cache_evicts() {
    let engine = SearchEngine::with_config(EngineConfig {
        max_cached_queries: Some(2),
        ..EngineConfig::default()
    });
    let people = customers();
    for query in ["a", "b", "c", "d"] {
        engine.search_text(&people, query, false);
    }
    assert_eq!(engine.stats().entries, 2);
}

#[test]
fn test_concurrent_searches_agree() {
    let engine = SearchEngine::new();
    let people = customers();
    let request = SearchRequest::text("o").lax(true);

    let results: Vec<_> = std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| engine.search(&people, &request)))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    // Racing misses may all evaluate, but every caller gets the stored copy.
    for r in &results {
        assert!(r.ptr_eq(&results[0]));
    }
    assert_eq!(engine.stats().entries, 1);
    assert!(engine.search(&people, &request).ptr_eq(&results[0]));
}
