// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Clause compilation and per-record predicate evaluation.
//!
//! Compilation does the work that does not depend on the record: lower-casing
//! operands, parsing numeric bounds, ordering clauses. A clause that cannot be
//! compiled (unknown operator, missing operands, unparseable bound) is dropped
//! with a warning and contributes nothing.
//!
//! Both evaluation modes read the same predicate:
//! - `matches` answers the strict question (does any eligible entry satisfy it)
//! - `score` counts how strongly it is satisfied, for lax ranking
//!
//! `score(entries) > 0` implies `matches(entries)` for every predicate except
//! `all`, whose lax score gives partial credit per satisfied operand.

use super::{Clause, Operator};
use crate::types::FlattenedEntry;
use crate::utils::{fold_case, parse_number};
use tracing::warn;

/// A clause's test, with operands already normalized.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Every needle is a substring of some eligible value.
    ContainsAll(Vec<String>),
    /// Some needle is a substring of some eligible value.
    ContainsAny(Vec<String>),
    /// Some eligible value equals none of the excluded values.
    NotIn(Vec<String>),
    Equal(f64),
    Greater(f64),
    Less(f64),
    /// Inclusive on both ends.
    Between(f64, f64),
}

/// A predicate plus the path prefixes that scope it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledClause {
    pub operator: Operator,
    pub predicate: Predicate,
    pub fields: Vec<String>,
}

impl CompiledClause {
    /// Compile a free-text query: one case-insensitive substring needle.
    pub fn text(query: &str, fields: &[String]) -> Self {
        Self {
            operator: Operator::Any,
            predicate: Predicate::ContainsAny(vec![fold_case(query)]),
            fields: fields.to_vec(),
        }
    }

    /// Compile one clause, or `None` when it is malformed.
    pub fn compile(clause: &Clause) -> Option<Self> {
        let folded = || clause.queries.iter().map(|q| fold_case(q)).collect();
        let bound = |i: usize| clause.queries.get(i).and_then(|q| parse_number(q));

        let predicate = match clause.operator {
            Operator::All | Operator::Any | Operator::Ne if clause.queries.is_empty() => {
                return None
            }
            Operator::All => Predicate::ContainsAll(folded()),
            Operator::Any => Predicate::ContainsAny(folded()),
            Operator::Ne => Predicate::NotIn(folded()),
            Operator::Eq => Predicate::Equal(bound(0)?),
            Operator::Gt => Predicate::Greater(bound(0)?),
            Operator::Lt => Predicate::Less(bound(0)?),
            Operator::Range => Predicate::Between(bound(0)?, bound(1)?),
            Operator::Unknown => return None,
        };

        Some(Self {
            operator: clause.operator,
            predicate,
            fields: clause.fields.clone(),
        })
    }

    fn eligible<'a>(
        &'a self,
        entries: &'a [FlattenedEntry],
    ) -> impl Iterator<Item = &'a FlattenedEntry> + 'a {
        entries.iter().filter(move |e| e.is_eligible(&self.fields))
    }

    fn numeric_hit(&self, entry: &FlattenedEntry) -> bool {
        let Some(v) = parse_number(&entry.value) else {
            return false;
        };
        match self.predicate {
            Predicate::Equal(x) => v == x,
            Predicate::Greater(x) => v > x,
            Predicate::Less(x) => v < x,
            Predicate::Between(lo, hi) => lo <= v && v <= hi,
            _ => false,
        }
    }

    /// Strict test: does this record satisfy the clause?
    pub fn matches(&self, entries: &[FlattenedEntry]) -> bool {
        match &self.predicate {
            Predicate::ContainsAll(needles) => needles.iter().all(|needle| {
                self.eligible(entries)
                    .any(|e| e.folded().contains(needle.as_str()))
            }),
            Predicate::ContainsAny(needles) => self
                .eligible(entries)
                .any(|e| needles.iter().any(|n| e.folded().contains(n.as_str()))),
            Predicate::NotIn(excluded) => self
                .eligible(entries)
                .any(|e| !excluded.iter().any(|x| x == e.folded())),
            _ => self.eligible(entries).any(|e| self.numeric_hit(e)),
        }
    }

    /// Lax score: how many eligible entries satisfy the clause.
    ///
    /// For `all`, each operand counts the entries containing it, so records
    /// covering more operands rank higher.
    pub fn score(&self, entries: &[FlattenedEntry]) -> usize {
        match &self.predicate {
            Predicate::ContainsAll(needles) => needles
                .iter()
                .map(|needle| {
                    self.eligible(entries)
                        .filter(|e| e.folded().contains(needle.as_str()))
                        .count()
                })
                .sum(),
            Predicate::ContainsAny(needles) => self
                .eligible(entries)
                .filter(|e| needles.iter().any(|n| e.folded().contains(n.as_str())))
                .count(),
            Predicate::NotIn(excluded) => self
                .eligible(entries)
                .filter(|e| !excluded.iter().any(|x| x == e.folded()))
                .count(),
            _ => self.eligible(entries).filter(|e| self.numeric_hit(e)).count(),
        }
    }
}

/// Compile clauses into processing order, dropping malformed ones.
///
/// The sort is stable, so clauses with the same operator keep their order.
pub fn compile_clauses(clauses: &[Clause]) -> Vec<CompiledClause> {
    let mut compiled: Vec<CompiledClause> = clauses
        .iter()
        .filter_map(|clause| {
            let result = CompiledClause::compile(clause);
            if result.is_none() {
                warn!(
                    operator = clause.operator.as_str(),
                    queries = ?clause.queries,
                    "dropping malformed clause"
                );
            }
            result
        })
        .collect();
    compiled.sort_by_key(|c| c.operator.priority());
    compiled
}
