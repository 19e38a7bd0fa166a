// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking for lax queries.
//!
//! Higher score first. Equal scores keep collection order, so ranking is
//! deterministic and a user sort applied afterwards only has to be stable.

use super::Scored;
use std::cmp::Ordering;

/// Compare two scored records for ranking.
///
/// Sort order:
/// 1. **Score** - descending
/// 2. **Index** - ascending, i.e. original collection order
pub fn compare_scored(a: &Scored, b: &Scored) -> Ordering {
    b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index))
}

/// Rank scored records and strip the scores.
pub fn rank(mut scored: Vec<Scored>) -> Vec<usize> {
    scored.sort_by(compare_scored);
    scored.into_iter().map(|s| s.index).collect()
}
