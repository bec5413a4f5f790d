// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use anyhow::{bail, Context, Result};
use clap::Parser;
use futures::executor::block_on;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use glean::index::{ElasticIndex, IndexBuilder};
use glean::session::{Env, FsFetcher, Key, LoadStatus, ResultList, SearchSession, UiEvent};
use glean::{make_teaser, IndexDocument, SessionConfig};

mod cli;
use cli::display::{self, row, section_bot, section_top};
use cli::{Cli, Commands};

fn main() {
    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Build {
            input,
            output,
            file_name,
        } => run_build(&input, &output, &file_name),
        Commands::Inspect { file } => run_inspect(&file),
        Commands::Search {
            site,
            query,
            location,
            limit,
            config,
        } => run_search(&site, &query, &location, limit, config.as_deref()),
        Commands::Teaser { file, terms } => run_teaser(&file, &terms),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", display::error_label(), e);
        std::process::exit(1);
    }
}

fn run_build(input: &Path, output: &Path, file_name: &str) -> Result<()> {
    let start = Instant::now();
    let json = fs::read_to_string(input)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    let docs: Vec<IndexDocument> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not a JSON array of documents", input.display()))?;
    info!(docs = docs.len(), "building index");

    let mut builder = IndexBuilder::new();
    builder.add_documents(&docs);
    let index = builder.build();

    fs::create_dir_all(output)
        .with_context(|| format!("Failed to create {}", output.display()))?;
    let path = output.join(file_name);
    let serialized = index.to_json()?;
    fs::write(&path, &serialized)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!(
        "Indexed {} documents into {} ({}) in {} ms",
        index.len(),
        display::link(&path.display().to_string()),
        display::format_size(serialized.len()),
        display::timing_ms(start.elapsed().as_secs_f64() * 1000.0)
    );
    Ok(())
}

fn run_inspect(file: &Path) -> Result<()> {
    let json = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let index = ElasticIndex::load(&json)
        .with_context(|| format!("Failed to load {}", file.display()))?;

    section_top("INDEX");
    row(&format!(" file       {}", file.display()));
    row(&format!(" size       {}", display::format_size(json.len())));
    row(&format!(" version    {}", index.version()));
    row(&format!(" language   {}", index.lang().unwrap_or("-")));
    row(&format!(" documents  {}", index.len()));
    section_bot();

    section_top("FIELDS");
    for field in index.fields() {
        let terms = index
            .field_index(field)
            .map_or(0, |f| f.vocabulary_size());
        row(&format!(" {:<10} {} terms", field, terms));
    }
    section_bot();
    Ok(())
}

fn run_search(
    site: &Path,
    query: &str,
    location: &str,
    limit: Option<usize>,
    config_path: Option<&Path>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            SessionConfig::from_json(&json)
                .with_context(|| format!("Invalid session config in {}", path.display()))?
        }
        None => SessionConfig::default(),
    };
    if let Some(limit) = limit {
        config.max_items = limit;
    }

    let session = SearchSession::new(config, FsFetcher::new(site), location);
    let start = Instant::now();

    // Open the modal, type the query, then let every timer run out
    block_on(async {
        let t0 = Env::at(Duration::ZERO);
        session
            .dispatch_and_settle(UiEvent::KeyDown(Key::Slash), &t0)
            .await;
        session
            .dispatch_and_settle(UiEvent::ModalInput(query.to_string()), &t0)
            .await;
        while let Some(deadline) = session.next_deadline() {
            debug!(deadline_ms = deadline.as_millis() as u64, "tick");
            session
                .dispatch_and_settle(UiEvent::Tick, &Env::at(deadline))
                .await;
        }
    });
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    if session.loader().status() == LoadStatus::Failed {
        if let Err(e) = block_on(session.loader().get()) {
            return Err(e).context(format!("No usable search index under {}", site.display()));
        }
    }

    let state = session.state();
    match state.count() {
        Some(count) => println!("{}", display::results_count(count.total, &count.query)),
        None => println!("0 results for \"{}\"", query.trim()),
    }

    match state.results() {
        ResultList::Items(items) => {
            for (i, item) in items.iter().enumerate() {
                let marker = if state.selected() == Some(i) { "▸" } else { " " };
                section_top(&format!("{} {}", marker, item.title));
                row(&format!(" {}", display::link(&item.href)));
                for line in display::wrap(&display::teaser(&item.teaser), display::BOX_WIDTH - 2) {
                    row(&format!(" {}", line));
                }
                section_bot();
            }
        }
        ResultList::NoResults => println!("{}", display::dim(glean::session::NO_RESULTS_TEXT)),
        ResultList::Empty => {}
    }

    println!("{}", display::dim(&format!("searched in {:.3} ms", elapsed_ms)));
    Ok(())
}

fn run_teaser(file: &Path, terms: &[String]) -> Result<()> {
    let body = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    if body.trim().is_empty() {
        bail!("{} is empty", file.display());
    }

    let teaser = make_teaser(&body, terms);
    for line in display::wrap(&display::teaser(&teaser), display::BOX_WIDTH) {
        println!("{}", line);
    }
    Ok(())
}
