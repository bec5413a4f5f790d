// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the glean command-line interface.
//!
//! Four subcommands: `build` writes a search index from a JSON document list,
//! `inspect` summarizes an index file, `search` runs the full search session
//! against a built site directory, and `teaser` prints the teaser for a body.

pub mod display;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "glean",
    about = "Search teasers and index tooling for static sites",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build a search index from a JSON array of documents
    Build {
        /// JSON file holding `[{ "id": ..., "title": ..., "body": ... }]`
        #[arg(short, long)]
        input: PathBuf,

        /// Output directory for the index file
        #[arg(short, long)]
        output: PathBuf,

        /// Index file name
        #[arg(long, default_value = "search_index.en.json")]
        file_name: String,
    },

    /// Summarize a search index file
    Inspect {
        /// Path to the index JSON
        file: PathBuf,
    },

    /// Search a built site the way the page widget would
    Search {
        /// Site root directory (what the web server serves at `/`)
        site: PathBuf,

        /// Search query
        query: String,

        /// Page path the search is launched from; selects the base-path index
        #[arg(long, default_value = "/")]
        location: String,

        /// Maximum number of results to show
        #[arg(short, long)]
        limit: Option<usize>,

        /// Session config JSON (debounceMs, maxItems, indexFile, query, ...)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the teaser for a text body
    Teaser {
        /// File holding the body text
        file: PathBuf,

        /// Query terms
        #[arg(required = true)]
        terms: Vec<String>,
    },
}
