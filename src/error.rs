// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Boundary errors.
//!
//! Evaluation never fails: a malformed clause is dropped, a value that does not
//! parse simply does not match. Errors only exist where outside data enters the
//! crate, i.e. parsing collections and requests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SifterError {
    /// A collection must be a JSON array of records.
    #[error("expected a JSON array of records, found {found}")]
    NotACollection { found: &'static str },

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = SifterError> = std::result::Result<T, E>;
