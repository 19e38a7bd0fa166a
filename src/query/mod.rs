// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The query language: free text or a list of structured clauses.
//!
//! Requests are plain serde data so the same shapes travel through the CLI's
//! request files, the WASM bindings and the Rust API:
//!
//! ```json
//! {"query": "ali", "fields": ["name"], "lax": true}
//! {"query": [{"operator": "range", "queries": ["20", "28"], "fields": ["age"]}],
//!  "sort": [{"fields": ["age"], "type": "desc"}]}
//! ```
//!
//! A `SearchRequest` is also the result-cache key, which is why every type in
//! here is `Hash + Eq`.

pub mod eval;
mod predicate;

pub use eval::{evaluate, Combination};
pub use predicate::{compile_clauses, CompiledClause, Predicate};

use crate::flatten::coerce_scalar;
use crate::sort::SortKey;
use serde::{Deserialize, Deserializer, Serialize};

// =============================================================================
// OPERATORS
// =============================================================================

/// Structured clause operator.
///
/// Unrecognized operator strings deserialize to `Unknown` instead of failing;
/// such clauses are dropped at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "all")]
    All,
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "=", alias = "==", alias = "eq")]
    Eq,
    #[serde(rename = "!=", alias = "ne")]
    Ne,
    #[serde(rename = ">", alias = "gt")]
    Gt,
    #[serde(rename = "<", alias = "lt")]
    Lt,
    #[serde(rename = "range")]
    Range,
    #[serde(other)]
    Unknown,
}

impl Operator {
    /// Position in the fixed processing order: narrow predicates first.
    ///
    /// `all`, `=`, `!=`, `>`, `<`, `range`, `any`, then anything unrecognized.
    pub fn priority(self) -> u8 {
        match self {
            Operator::All => 0,
            Operator::Eq => 1,
            Operator::Ne => 2,
            Operator::Gt => 3,
            Operator::Lt => 4,
            Operator::Range => 5,
            Operator::Any => 6,
            Operator::Unknown => 7,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::All => "all",
            Operator::Any => "any",
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Lt => "<",
            Operator::Range => "range",
            Operator::Unknown => "unknown",
        }
    }
}

// =============================================================================
// CLAUSES
// =============================================================================

/// One structured predicate.
///
/// `fields` holds path prefixes: an entry is eligible when its path starts with
/// one of them. Empty means every path is eligible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    #[serde(alias = "match")]
    pub operator: Operator,
    #[serde(default, deserialize_with = "operands")]
    pub queries: Vec<String>,
    #[serde(default, deserialize_with = "nullable_list")]
    pub fields: Vec<String>,
}

impl Clause {
    pub fn new<Q, F>(operator: Operator, queries: Q, fields: F) -> Self
    where
        Q: IntoIterator,
        Q::Item: Into<String>,
        F: IntoIterator,
        F::Item: Into<String>,
    {
        Self {
            operator,
            queries: queries.into_iter().map(Into::into).collect(),
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }
}

/// Operands may arrive as numbers or booleans (`"queries": [26]`); they are
/// coerced with the same rules as record leaves.
fn operands<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .map(coerce_scalar)
        .collect())
}

fn nullable_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw.unwrap_or_default())
}

// =============================================================================
// REQUESTS
// =============================================================================

/// Free text or structured clauses.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Query {
    Text(String),
    Clauses(Vec<Clause>),
}

impl From<&str> for Query {
    fn from(text: &str) -> Self {
        Query::Text(text.to_string())
    }
}

impl From<String> for Query {
    fn from(text: String) -> Self {
        Query::Text(text)
    }
}

impl From<Vec<Clause>> for Query {
    fn from(clauses: Vec<Clause>) -> Self {
        Query::Clauses(clauses)
    }
}

/// Everything that determines a result set for a given collection.
///
/// Used verbatim as the result-cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub query: Query,
    /// Path prefixes for free-text queries; ignored for clause queries,
    /// which carry their own.
    #[serde(default, deserialize_with = "nullable_list")]
    pub fields: Vec<String>,
    #[serde(default)]
    pub sort: Vec<SortKey>,
    #[serde(default)]
    pub lax: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<Query>) -> Self {
        Self {
            query: query.into(),
            fields: Vec::new(),
            sort: Vec::new(),
            lax: false,
        }
    }

    pub fn text(query: impl Into<String>) -> Self {
        Self::new(Query::Text(query.into()))
    }

    pub fn clauses(clauses: Vec<Clause>) -> Self {
        Self::new(Query::Clauses(clauses))
    }

    pub fn fields<I>(mut self, fields: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn sort(mut self, sort: Vec<SortKey>) -> Self {
        self.sort = sort;
        self
    }

    pub fn lax(mut self, lax: bool) -> Self {
        self.lax = lax;
        self
    }
}
