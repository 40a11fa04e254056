// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the boolex command-line interface.
//!
//! Two subcommands: `index` builds the three artifacts from a manifest and
//! a corpus directory, `search` loads them and evaluates one boolean
//! expression per stdin line. Invocation errors (unknown flag, missing
//! required argument) exit with clap's usage-error code 2; runtime failures
//! exit 1.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "boolex",
    about = "Boolean-query inverted index over a static text corpus",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the inverted index from a manifest and a corpus directory
    Index {
        /// JSON-lines manifest; each line carries doc_id, title, url
        #[arg(long)]
        manifest: String,

        /// Directory holding one <doc_id>.txt per manifest record
        #[arg(long)]
        corpus: String,

        /// Output directory for docs.bin, lexicon.bin, postings.bin
        #[arg(long, default_value = "out")]
        out: String,

        /// Flush the in-memory term table when it reaches this many MiB
        #[arg(long = "mem-mb", default_value = "512")]
        mem_mb: u64,

        /// Refresh the progress line every this many MiB of corpus text
        #[arg(long = "report-mb", default_value = "200")]
        report_mb: u64,
    },

    /// Evaluate boolean queries from stdin against a built index
    Search {
        /// Index directory produced by `boolex index`
        #[arg(long, default_value = "./out")]
        index: String,

        /// Maximum results printed per query
        #[arg(long, default_value = "50")]
        limit: u32,

        /// Skip this many results before printing
        #[arg(long, default_value = "0")]
        offset: u32,

        /// Print only the [STATS] line, not the result rows
        #[arg(long)]
        stats_only: bool,

        /// Print the document count and exit
        #[arg(long)]
        print_doccount: bool,
    },
}
