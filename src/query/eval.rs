// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query evaluation over a flattened collection.
//!
//! Output is a list of record positions:
//! - strict mode: matching records in collection order
//! - lax mode: records with a positive score, best first, ties in collection order
//!
//! Strict clause lists combine according to `Combination`. With no usable
//! clauses, strict mode filters nothing.

use super::predicate::{compile_clauses, CompiledClause};
use super::{Query, SearchRequest};
use crate::scoring::{ranking::rank, score_all};
use crate::types::FlatRecord;
use serde::{Deserialize, Serialize};

/// How strict mode combines several clauses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combination {
    /// Every clause must hold. Each clause filters the previous one's output.
    #[default]
    Conjunction,
    /// At least one clause must hold; the union keeps collection order.
    Union,
}

/// Evaluate a request's query against flattened records.
///
/// Sorting by `request.sort` is not applied here.
pub fn evaluate(
    flattened: &[FlatRecord],
    request: &SearchRequest,
    combination: Combination,
) -> Vec<usize> {
    let clauses = match &request.query {
        Query::Text(text) => vec![CompiledClause::text(text, &request.fields)],
        Query::Clauses(clauses) => compile_clauses(clauses),
    };

    if request.lax {
        rank(score_all(&clauses, flattened))
    } else {
        filter_strict(&clauses, flattened, combination)
    }
}

fn filter_strict(
    clauses: &[CompiledClause],
    flattened: &[FlatRecord],
    combination: Combination,
) -> Vec<usize> {
    if clauses.is_empty() {
        return (0..flattened.len()).collect();
    }

    match combination {
        Combination::Conjunction => {
            let mut survivors: Vec<usize> = (0..flattened.len()).collect();
            for clause in clauses {
                survivors.retain(|&i| clause.matches(&flattened[i]));
                if survivors.is_empty() {
                    break;
                }
            }
            survivors
        }
        // One pass per record gives the deduplicated union in collection order.
        Combination::Union => flattened
            .iter()
            .enumerate()
            .filter(|(_, entries)| clauses.iter().any(|c| c.matches(entries)))
            .map(|(i, _)| i)
            .collect(),
    }
}
