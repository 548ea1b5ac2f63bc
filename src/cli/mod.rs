// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the quizdex command-line interface.
//!
//! Every command that needs documents reads them from a JSON file: either an
//! array of documents (loaded into the collection named by `--collection`) or
//! an object mapping collection names to arrays. Nothing is written back
//! except by `index`, which writes the corpus blob to a file.

pub mod display;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "quizdex",
    about = "Search and autocomplete for quiz card collections",
    version
)]
pub struct Cli {
    /// Engine config file (JSON); defaults apply when omitted
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank documents against a query and print one page
    Search {
        /// JSON file with documents
        docs: String,

        /// Search query
        query: String,

        /// Collection to search
        #[arg(short, long, default_value = "cards")]
        collection: String,

        /// Page to show (0-based)
        #[arg(long, default_value = "0")]
        page: usize,

        /// Results per page
        #[arg(long, default_value = "10")]
        page_size: usize,

        /// Also expand query tokens through tag names
        #[arg(long)]
        use_tag: bool,
    },

    /// Complete a prefix from the word or tag vocabulary
    Complete {
        /// JSON file with documents
        docs: String,

        /// Prefix to complete
        prefix: String,

        /// Collection to complete from
        #[arg(short, long, default_value = "cards")]
        collection: String,

        /// Complete tag names instead of words
        #[arg(long)]
        tags: bool,

        /// Maximum number of completions
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Build a collection's corpus and write its blob
    Index {
        /// JSON file with documents
        docs: String,

        /// Output blob path
        #[arg(short, long)]
        output: String,

        /// Collection to index
        #[arg(short, long, default_value = "cards")]
        collection: String,
    },

    /// Inspect a corpus blob
    Inspect {
        /// Path to blob file
        file: String,
    },

    /// Show how a piece of text is tokenized
    Tokenize {
        /// Text to tokenize
        text: String,
    },
}
