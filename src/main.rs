use anyhow::{Context, Result};
use clap::Parser;
use sifter::config::{load_clauses, load_collection, load_request};
use sifter::{
    coerce_scalar, flatten, Collection, Combination, EngineConfig, Query, SearchEngine,
    SearchRequest, SortKey,
};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

/// Width of the record column in the results table.
const RECORD_WIDTH: usize = 70;

fn main() {
    init_tracing();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `SIFTER_LOG` (warnings only by default).
fn init_tracing() {
    let filter = EnvFilter::try_from_env("SIFTER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Search {
            data,
            query,
            clauses,
            request,
            fields,
            sort,
            lax,
            union,
            limit,
            json,
        } => {
            if union {
                config.combination = Combination::Union;
            }
            let overrides = SearchOverrides {
                query,
                clauses,
                fields,
                sort,
                lax,
            };
            let request = build_request(request.as_deref(), overrides)?;
            run_search(&data, config, &request, limit, json)
        }
        Commands::Flatten { data, record } => run_flatten(&data, record),
    }
}

/// Search options given on the command line; each one overrides the
/// corresponding part of a request file.
struct SearchOverrides {
    query: Option<String>,
    clauses: Option<PathBuf>,
    fields: Vec<String>,
    sort: Vec<SortKey>,
    lax: bool,
}

fn build_request(file: Option<&Path>, overrides: SearchOverrides) -> Result<SearchRequest> {
    let mut request = match file {
        Some(path) => load_request(path)
            .with_context(|| format!("Failed to load request {}", path.display()))?,
        None => SearchRequest::text(""),
    };

    if let Some(path) = &overrides.clauses {
        let clauses = load_clauses(path)
            .with_context(|| format!("Failed to load clauses {}", path.display()))?;
        request.query = Query::Clauses(clauses);
    } else if let Some(text) = overrides.query {
        request.query = Query::Text(text);
    }
    if !overrides.fields.is_empty() {
        request.fields = overrides.fields;
    }
    if !overrides.sort.is_empty() {
        request.sort = overrides.sort;
    }
    request.lax |= overrides.lax;
    Ok(request)
}

fn run_search(
    data: &Path,
    config: EngineConfig,
    request: &SearchRequest,
    limit: usize,
    json: bool,
) -> Result<()> {
    let collection = load_data(data)?;
    let engine = SearchEngine::with_config(config);

    let start = Instant::now();
    let results = engine.search(&collection, request);
    let elapsed = start.elapsed().as_secs_f64() * 1000.0;

    if json {
        let shown: Vec<_> = results.iter().take(limit).collect();
        println!("{}", serde_json::to_string_pretty(&shown)?);
        return Ok(());
    }

    println!();
    banner(&format!("{} in {}", describe_query(&request.query), data.display()));
    println!();

    section_top(if request.lax { "RANKED" } else { "MATCHES" });
    if results.is_empty() {
        row(&format!("  {}", paint(Role::Muted, "no records matched")));
    }
    for (position, &index) in results.indices().iter().take(limit).enumerate() {
        let record = &collection.records()[index];
        let rendered = serde_json::to_string(record)?;
        row(&format!(
            "  {} {} {}",
            position_badge(position + 1),
            pad_right(&paint(Role::Muted, &format!("[{}]", index)), 6),
            truncate(&rendered, RECORD_WIDTH - 14)
        ));
    }
    section_bot();

    let hidden = results.len().saturating_sub(limit);
    println!(
        "  {} of {} records matched in {} ms{}",
        paint_bold(Role::Title, &results.len().to_string()),
        collection.len(),
        timing_ms(elapsed),
        if hidden > 0 {
            format!(" ({} not shown)", hidden)
        } else {
            String::new()
        }
    );
    println!();
    Ok(())
}

fn run_flatten(data: &Path, only: Option<usize>) -> Result<()> {
    let collection = load_data(data)?;
    let positions: Vec<usize> = match only {
        Some(index) => {
            anyhow::ensure!(
                index < collection.len(),
                "Record {} out of range (collection has {})",
                index,
                collection.len()
            );
            vec![index]
        }
        None => (0..collection.len()).collect(),
    };

    for index in positions {
        let record = &collection.records()[index];
        section_top(&format!("RECORD {}", index));
        let entries = flatten(record);
        let width = entries
            .iter()
            .map(|e| e.path.chars().count())
            .max()
            .unwrap_or(0)
            .min(40);
        for entry in &entries {
            row(&format!(
                "  {}  {}",
                pad_right(&path_label(&truncate(&entry.path, 40)), width),
                value_label(&truncate(&entry.value, BOX_WIDTH.saturating_sub(width + 6)))
            ));
        }
        if entries.is_empty() {
            // Empty containers flatten to nothing.
            row(&format!("  {}", value_label(&coerce_scalar(record))));
        }
        section_bot();
    }
    Ok(())
}

fn load_data(path: &Path) -> Result<Collection> {
    load_collection(path).with_context(|| format!("Failed to load records {}", path.display()))
}

fn describe_query(query: &Query) -> String {
    match query {
        Query::Text(text) if text.is_empty() => "everything".to_string(),
        Query::Text(text) => format!("\"{}\"", truncate(text, 30)),
        Query::Clauses(clauses) => format!("{} clauses", clauses.len()),
    }
}
