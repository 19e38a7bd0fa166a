// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the sifter command-line interface.
//!
//! Two subcommands: `search` to query a JSON array of records, and `flatten`
//! to show the path/value leaves a query actually sees. A search can be given
//! inline (free text, flags) or as a request file; flags override the file.

pub mod display;

use clap::{Parser, Subcommand};
use sifter::SortKey;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sifter",
    about = "Structured search over JSON records",
    version
)]
pub struct Cli {
    /// Engine configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search a JSON array of records and print the matches
    Search {
        /// JSON file containing an array of records ("-" for stdin)
        data: PathBuf,

        /// Free-text query (case-insensitive substring)
        query: Option<String>,

        /// JSON file with a list of clauses, e.g.
        /// [{"operator": ">", "queries": ["26"], "fields": ["age"]}]
        #[arg(long, conflicts_with = "query")]
        clauses: Option<PathBuf>,

        /// JSON file with a complete request (query, fields, sort, lax)
        #[arg(long)]
        request: Option<PathBuf>,

        /// Restrict free-text matching to paths starting with this prefix
        #[arg(short, long = "field")]
        fields: Vec<String>,

        /// Sort key: PATH[|FALLBACK...][:asc|:desc], repeatable
        #[arg(short, long = "sort")]
        sort: Vec<SortKey>,

        /// Rank matches by score instead of filtering strictly
        #[arg(long)]
        lax: bool,

        /// Combine clauses with OR instead of AND
        #[arg(long)]
        union: bool,

        /// Maximum number of records to print
        #[arg(short, long, default_value = "20")]
        limit: usize,

        /// Print results as a JSON array instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the flattened path/value leaves of records
    Flatten {
        /// JSON file containing an array of records ("-" for stdin)
        data: PathBuf,

        /// Only flatten the record at this position
        #[arg(short, long)]
        record: Option<usize>,
    },
}
