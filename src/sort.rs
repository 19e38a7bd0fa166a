// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Multi-key, stable sorting of records by field paths.
//!
//! Each `SortKey` lists candidate paths; the first one present in the record
//! supplies the key, even when its value is `null`. Values compare by kind:
//!
//! | Kind    | Ordering                                           |
//! |---------|----------------------------------------------------|
//! | boolean | `false < true`                                     |
//! | number  | numeric                                            |
//! | date    | epoch milliseconds (RFC 3339 or `YYYY-MM-DD` text) |
//! | text    | case-insensitive, then code point                  |
//! | other   | compact JSON text (arrays and objects)             |
//!
//! Mixed kinds order by the table's row order. Missing values sort last in
//! both directions; `desc` only flips the comparison of present values.

use crate::types::Record;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// One level of a sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortKey {
    /// Candidate paths, tried in order.
    pub fields: Vec<String>,
    #[serde(rename = "type", default)]
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![field.into()],
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            fields: vec![field.into()],
            direction: SortDirection::Desc,
        }
    }
}

/// Parses `path[|fallback...][:asc|:desc]`, e.g. `updated|created:desc`.
impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (paths, direction) = match s.rsplit_once(':') {
            Some((paths, "asc")) => (paths, SortDirection::Asc),
            Some((paths, "desc")) => (paths, SortDirection::Desc),
            Some((_, other)) => return Err(format!("unknown sort direction '{}'", other)),
            None => (s, SortDirection::Asc),
        };
        let fields: Vec<String> = paths
            .split('|')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect();
        if fields.is_empty() {
            return Err(format!("sort key '{}' names no field", s));
        }
        Ok(SortKey { fields, direction })
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = match self.direction {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        };
        write!(f, "{}:{}", self.fields.join("|"), dir)
    }
}

// =============================================================================
// PATH RESOLUTION
// =============================================================================

/// Resolve a dotted/bracketed path (`a.b[0].c`, `tags.1`) inside a record.
///
/// An empty path resolves to the record itself.
pub fn resolve_path<'a>(record: &'a Record, path: &str) -> Option<&'a Record> {
    let mut current = record;
    for part in path.split('.') {
        let (key, mut rest) = match part.find('[') {
            Some(pos) => part.split_at(pos),
            None => (part, ""),
        };
        if !key.is_empty() {
            current = step(current, key)?;
        }
        while let Some(stripped) = rest.strip_prefix('[') {
            let end = stripped.find(']')?;
            current = step(current, &stripped[..end])?;
            rest = &stripped[end + 1..];
        }
    }
    Some(current)
}

fn step<'a>(value: &'a Record, key: &str) -> Option<&'a Record> {
    match value {
        Record::Object(map) => map.get(key),
        Record::Array(items) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

// =============================================================================
// COMPARABLE VALUES
// =============================================================================

/// A resolved sort key, normalized for comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum SortValue {
    Missing,
    Bool(bool),
    Number(f64),
    /// Epoch milliseconds.
    Date(i64),
    Text { folded: String, raw: String },
    Other(String),
}

impl SortValue {
    pub fn from_record(value: Option<&Record>) -> Self {
        match value {
            None | Some(Record::Null) => SortValue::Missing,
            Some(Record::Bool(b)) => SortValue::Bool(*b),
            Some(Record::Number(n)) => n.as_f64().map_or(SortValue::Missing, SortValue::Number),
            Some(Record::String(s)) => match parse_date(s) {
                Some(millis) => SortValue::Date(millis),
                None => SortValue::Text {
                    folded: s.to_lowercase(),
                    raw: s.clone(),
                },
            },
            Some(other) => SortValue::Other(other.to_string()),
        }
    }

    fn kind_rank(&self) -> u8 {
        match self {
            SortValue::Bool(_) => 0,
            SortValue::Number(_) => 1,
            SortValue::Date(_) => 2,
            SortValue::Text { .. } => 3,
            SortValue::Other(_) => 4,
            SortValue::Missing => 5,
        }
    }

    /// Ascending comparison of two present values.
    fn cmp_present(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Bool(a), SortValue::Bool(b)) => a.cmp(b),
            (SortValue::Number(a), SortValue::Number(b)) => a.total_cmp(b),
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp(b),
            (
                SortValue::Text { folded: fa, raw: ra },
                SortValue::Text { folded: fb, raw: rb },
            ) => fa.cmp(fb).then_with(|| ra.cmp(rb)),
            (SortValue::Other(a), SortValue::Other(b)) => a.cmp(b),
            _ => self.kind_rank().cmp(&other.kind_rank()),
        }
    }
}

fn parse_date(s: &str) -> Option<i64> {
    // Cheap reject before handing text to chrono.
    let bytes = s.as_bytes();
    if bytes.len() < 10 || !bytes[..4].iter().all(u8::is_ascii_digit) || bytes[4] != b'-' {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}

/// Resolve the key for one `SortKey` level: the first candidate present.
///
/// A present `null` wins over later candidates and sorts as missing.
pub fn key_for(record: &Record, key: &SortKey) -> SortValue {
    SortValue::from_record(key.fields.iter().find_map(|path| resolve_path(record, path)))
}

/// Compare two key tuples under a sort spec.
pub fn compare_keys(a: &[SortValue], b: &[SortValue], spec: &[SortKey]) -> Ordering {
    for ((va, vb), key) in a.iter().zip(b).zip(spec) {
        let ord = match (va, vb) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Greater,
            (_, SortValue::Missing) => Ordering::Less,
            _ => {
                let ord = va.cmp_present(vb);
                match key.direction {
                    SortDirection::Asc => ord,
                    SortDirection::Desc => ord.reverse(),
                }
            }
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

// =============================================================================
// SORTING
// =============================================================================

/// Reorder record positions by `spec`, stably.
///
/// Keys are resolved once per record before sorting.
pub fn sort_indices(records: &[Record], indices: &mut Vec<usize>, spec: &[SortKey]) {
    if spec.is_empty() || indices.len() < 2 {
        return;
    }
    let mut keyed: Vec<(usize, Vec<SortValue>)> = indices
        .iter()
        .map(|&i| {
            let keys = match records.get(i) {
                Some(record) => spec.iter().map(|k| key_for(record, k)).collect(),
                None => vec![SortValue::Missing; spec.len()],
            };
            (i, keys)
        })
        .collect();
    keyed.sort_by(|(_, a), (_, b)| compare_keys(a, b, spec));
    indices.clear();
    indices.extend(keyed.into_iter().map(|(i, _)| i));
}

/// Sort a copy of `records` by `spec`. The input is left untouched.
pub fn sort_records(records: &[Record], spec: &[SortKey]) -> Vec<Record> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    sort_indices(records, &mut order, spec);
    order.into_iter().map(|i| records[i].clone()).collect()
}
