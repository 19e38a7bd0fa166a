//! Flattening invariants.

use super::oracles::oracle_leaves;
use super::{collection_strategy, record_strategy};
use proptest::prelude::*;
use sifter::sort::resolve_path;
use sifter::{coerce_scalar, flatten, flatten_collection};
use std::collections::HashSet;

fn pairs(record: &serde_json::Value) -> Vec<(String, String)> {
    flatten(record)
        .into_iter()
        .map(|e| (e.path, e.value))
        .collect()
}

proptest! {
    /// Property: flattening is deterministic.
    #[test]
    fn prop_flatten_deterministic(record in record_strategy()) {
        prop_assert_eq!(pairs(&record), pairs(&record));
    }

    /// Property: one entry per scalar leaf, in document order.
    #[test]
    fn prop_flatten_matches_leaf_walk(record in record_strategy()) {
        let values: Vec<String> = flatten(&record)
            .iter()
            .map(|e| e.value.to_lowercase())
            .collect();
        prop_assert_eq!(values, oracle_leaves(&record));
    }

    /// Property: every path resolves back to the leaf it was built from.
    #[test]
    fn prop_paths_resolve_to_their_leaf(record in record_strategy()) {
        for entry in flatten(&record) {
            let leaf = resolve_path(&record, &entry.path);
            prop_assert!(leaf.is_some(), "path '{}' did not resolve", entry.path);
            prop_assert_eq!(coerce_scalar(leaf.unwrap()), entry.value);
        }
    }

    /// Property: paths within one record are unique.
    #[test]
    fn prop_paths_unique(record in record_strategy()) {
        let entries = flatten(&record);
        let unique: HashSet<&str> = entries.iter().map(|e| e.path.as_str()).collect();
        prop_assert_eq!(unique.len(), entries.len());
    }

    /// Property: parallel and sequential flattening agree.
    #[test]
    fn prop_parallel_flatten_agrees(records in collection_strategy()) {
        let sequential = flatten_collection(&records, usize::MAX);
        let parallel = flatten_collection(&records, 0);
        prop_assert_eq!(sequential, parallel);
    }
}
