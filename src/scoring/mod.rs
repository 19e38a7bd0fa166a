// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Lax-mode scoring: how strongly a record matches.
//!
//! A score is a count of satisfying entries, summed across clauses. It lives
//! beside the record in a `Scored` pair and is dropped once results are
//! ranked; records themselves are never annotated.

pub mod ranking;

use crate::query::CompiledClause;
use crate::types::FlattenedEntry;

/// A record position with its transient lax score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    pub index: usize,
    pub score: usize,
}

/// Total lax score of one record across every clause.
pub fn score_record(clauses: &[CompiledClause], entries: &[FlattenedEntry]) -> usize {
    clauses.iter().map(|clause| clause.score(entries)).sum()
}

/// Score every record, keeping only those with a positive total.
///
/// Output is in collection order.
pub fn score_all(clauses: &[CompiledClause], flattened: &[Vec<FlattenedEntry>]) -> Vec<Scored> {
    flattened
        .iter()
        .enumerate()
        .filter_map(|(index, entries)| {
            let score = score_record(clauses, entries);
            (score > 0).then_some(Scored { index, score })
        })
        .collect()
}
