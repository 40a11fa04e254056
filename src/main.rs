// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! boolex CLI: build and query boolean inverted indexes.
//!
//! ```bash
//! # Build an index from a crawler manifest and a corpus directory
//! boolex index --manifest manifest.jsonl --corpus ./corpus --out ./out
//!
//! # Query it, one boolean expression per line
//! echo '(cat || dog) !fast' | boolex search --index ./out --limit 20
//! ```
//!
//! Results print as `<id>\t<title>\t<url>`, followed by a `[STATS]` line
//! with hit count and timing.

use std::io::BufRead;
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use boolex::{eval_postfix, parse_query, run_build, BuildOptions, Index};

mod cli;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Index {
            manifest,
            corpus,
            out,
            mem_mb,
            report_mb,
        } => {
            let opts = BuildOptions {
                manifest: PathBuf::from(manifest),
                corpus: PathBuf::from(corpus),
                out: PathBuf::from(out),
                mem_mb,
                report_mb,
            };
            if let Err(e) = run_build(&opts) {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
        Commands::Search {
            index,
            limit,
            offset,
            stats_only,
            print_doccount,
        } => {
            let index = match Index::load(&PathBuf::from(index)) {
                Ok(idx) => idx,
                Err(e) => {
                    eprintln!("❌ Index load failed: {}", e);
                    std::process::exit(1);
                }
            };

            if print_doccount {
                println!("{}", index.doc_count());
                return;
            }

            if let Err(e) = query_loop(&index, limit, offset, stats_only) {
                eprintln!("❌ {}", e);
                std::process::exit(1);
            }
        }
    }
}

/// Read queries from stdin until EOF, printing results and a stats line for
/// each. Whitespace-only lines are ignored without any output.
fn query_loop(index: &Index, limit: u32, offset: u32, stats_only: bool) -> std::io::Result<()> {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.bytes().all(|b| b == b' ' || b == b'\t') {
            continue;
        }

        let started = Instant::now();
        let program = parse_query(line);
        let result = eval_postfix(index, &program);
        let elapsed = started.elapsed().as_secs_f64();

        let mut shown: u32 = 0;
        if !stats_only {
            for &id in result.iter().skip(offset as usize) {
                if shown >= limit {
                    break;
                }
                let Some((title, url)) = index.doc(id) else {
                    continue;
                };
                println!(
                    "{}\t{}\t{}",
                    id,
                    String::from_utf8_lossy(title),
                    String::from_utf8_lossy(url)
                );
                shown += 1;
            }
        } else if (offset as usize) < result.len() {
            shown = (result.len() - offset as usize).min(limit as usize) as u32;
        }

        println!(
            "[STATS] query=\"{}\" hits={} shown={} offset={} time={:.6} sec",
            line,
            result.len(),
            shown,
            offset,
            elapsed
        );
    }
    Ok(())
}
