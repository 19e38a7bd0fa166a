// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Engine configuration and loading of JSON inputs from disk.
//!
//! Everything here is serde data with defaults, so a config file only needs
//! the keys it changes:
//!
//! ```json
//! {"combination": "union", "maxCachedQueries": 256}
//! ```

use crate::error::{Result, SifterError};
use crate::query::{Clause, Combination, SearchRequest};
use crate::types::Collection;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Record count above which flattening runs on the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 2048;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// How strict clause lists combine.
    pub combination: Combination,
    /// Result sets kept per collection; `None` keeps everything.
    pub max_cached_queries: Option<usize>,
    pub parallel_threshold: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            combination: Combination::Conjunction,
            max_cached_queries: None,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl EngineConfig {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(serde_json::from_str(&read_text(path.as_ref())?)?)
    }
}

/// Read a file, or stdin when the path is `-`.
pub fn read_text(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| SifterError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        return Ok(text);
    }
    fs::read_to_string(path).map_err(|source| SifterError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a JSON array of records as a new collection.
pub fn load_collection(path: impl AsRef<Path>) -> Result<Collection> {
    Collection::from_json_str(&read_text(path.as_ref())?)
}

/// Load a full `SearchRequest` from a JSON file.
pub fn load_request(path: impl AsRef<Path>) -> Result<SearchRequest> {
    Ok(serde_json::from_str(&read_text(path.as_ref())?)?)
}

/// Load a JSON array of clauses.
pub fn load_clauses(path: impl AsRef<Path>) -> Result<Vec<Clause>> {
    Ok(serde_json::from_str(&read_text(path.as_ref())?)?)
}
