// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Build pipeline for boolex indexes.
//!
//! Reads a JSON-lines manifest plus a directory of `.txt` files, and emits
//! the three final artifacts (`docs.bin`, `lexicon.bin`, `postings.bin`)
//! under the output directory. Memory is bounded: stems accumulate in an
//! in-memory term table, and whenever its approximate footprint crosses the
//! budget the table is spilled to a sorted block under `<out>/blocks/`; the
//! blocks are k-way merged at the end. Flushes only happen between
//! documents, so a single document never straddles two blocks.
//!
//! The whole pipeline is single-threaded and streaming: one pass over the
//! manifest, one pass over each document, one pass over the blocks.

pub mod block;
pub mod docs;
pub mod manifest;
pub mod merge;
pub mod term_table;

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use crate::stem::stem_word;
use crate::tokenize::{Tokenizer, MAX_TOKEN_LEN};

use block::write_block;
use docs::DocsBuilder;
use manifest::ManifestRecord;
use merge::merge_blocks;
use term_table::{DocTermSet, TermTable};

/// Per-file read buffer.
const READ_BUF_BYTES: usize = 1 << 20;

/// Initial term-table capacity (slots; power of two).
const TERM_TABLE_CAPACITY: usize = 1 << 20;

/// Per-document set capacity (slots; power of two, never grows).
const DOC_SET_CAPACITY: usize = 1 << 17;

/// Build configuration, mirroring the `boolex index` flags.
pub struct BuildOptions {
    pub manifest: PathBuf,
    pub corpus: PathBuf,
    pub out: PathBuf,
    /// Flush the term table when it approaches this many MiB.
    pub mem_mb: u64,
    /// Refresh the progress line every this many MiB of corpus text.
    pub report_mb: u64,
}

/// Counters shared across the whole build.
#[derive(Default)]
struct BuildCounters {
    total_bytes: u64,
    total_tokens: u64,
    unique_terms_sum: u64,
}

fn progress_spinner() -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {prefix:<9} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_prefix("Indexing");
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Run the whole build. Fatal problems (unreadable manifest, unwritable
/// output) come back as error strings; a missing document file is only a
/// warning and the document keeps its slot in `docs.bin`.
pub fn run_build(opts: &BuildOptions) -> Result<(), String> {
    let blocks_dir = opts.out.join("blocks");
    std::fs::create_dir_all(&blocks_dir)
        .map_err(|e| format!("Failed to create {}: {}", blocks_dir.display(), e))?;

    let manifest_file = File::open(&opts.manifest)
        .map_err(|e| format!("Cannot open manifest {}: {}", opts.manifest.display(), e))?;
    let manifest_reader = BufReader::new(manifest_file);

    let mut docs = DocsBuilder::new();
    let mut table = TermTable::with_capacity(TERM_TABLE_CAPACITY, 1 << 20);
    let mut doc_set = DocTermSet::with_capacity(DOC_SET_CAPACITY, 1 << 16);
    let mut counters = BuildCounters::default();

    let mem_limit = opts.mem_mb.saturating_mul(1024 * 1024) as usize;
    let report_step = opts.report_mb.saturating_mul(1024 * 1024);
    let mut next_report = report_step;

    let pb = progress_spinner();
    let started = Instant::now();

    let mut doc_id: u32 = 0;
    let mut block_id: u32 = 0;

    for line in manifest_reader.lines() {
        let line = line.map_err(|e| format!("Manifest read error: {}", e))?;
        let Some(record) = ManifestRecord::from_line(&line) else {
            continue;
        };

        docs.add_doc(&record.title, &record.url);

        let txt_path = opts.corpus.join(format!("{}.txt", record.doc_id));
        process_document(&txt_path, doc_id, &mut table, &mut doc_set, &mut counters, &pb);

        doc_id += 1;

        if report_step > 0 && counters.total_bytes >= next_report {
            let elapsed = started.elapsed().as_secs_f64();
            let kb = counters.total_bytes as f64 / 1024.0;
            let speed = if elapsed > 0.0 { kb / elapsed } else { 0.0 };
            let avg_unique = counters.unique_terms_sum as f64 / doc_id.max(1) as f64;
            pb.set_message(format!(
                "{} docs · {} tokens · {} terms · avg {:.1} uniq/doc · ≈{} MB · {:.1} KB/s",
                doc_id,
                counters.total_tokens,
                table.len(),
                avg_unique,
                table.approx_bytes() / (1024 * 1024),
                speed
            ));
            next_report += report_step;
        }

        if table.approx_bytes() >= mem_limit {
            flush_block(&blocks_dir, &mut block_id, &mut table, &pb)
                .map_err(|e| format!("Failed to write block: {}", e))?;
        }
    }

    if !table.is_empty() {
        flush_block(&blocks_dir, &mut block_id, &mut table, &pb)
            .map_err(|e| format!("Failed to write block: {}", e))?;
    }

    let docs_path = opts.out.join("docs.bin");
    docs.write_to(&docs_path)
        .map_err(|e| format!("Failed to write {}: {}", docs_path.display(), e))?;

    let lexicon_path = opts.out.join("lexicon.bin");
    let postings_path = opts.out.join("postings.bin");
    pb.set_message(format!("merging {} blocks...", block_id));
    let stats = merge_blocks(&blocks_dir, &lexicon_path, &postings_path)
        .map_err(|e| format!("Merge failed: {}", e))?;

    pb.finish_and_clear();

    let elapsed = started.elapsed().as_secs_f64();
    let kb = counters.total_bytes as f64 / 1024.0;
    let speed = if elapsed > 0.0 { kb / elapsed } else { 0.0 };
    let avg_unique = if doc_id > 0 {
        counters.unique_terms_sum as f64 / doc_id as f64
    } else {
        0.0
    };
    eprintln!("✅ Build complete");
    eprintln!(
        "   {} docs │ {:.1} KB │ {} tokens │ avg {:.1} unique terms/doc │ {:.2} sec │ {:.1} KB/s",
        doc_id, kb, counters.total_tokens, avg_unique, elapsed, speed
    );
    eprintln!(
        "   {} terms │ avg term len {:.3} │ {} postings bytes │ {} blocks",
        stats.term_count, stats.avg_term_len, stats.postings_bytes, block_id
    );

    Ok(())
}

fn flush_block(
    blocks_dir: &Path,
    block_id: &mut u32,
    table: &mut TermTable,
    pb: &ProgressBar,
) -> std::io::Result<()> {
    let path = blocks_dir.join(format!("block_{:04}.blk", *block_id));
    pb.println(format!(
        "[FLUSH] writing {} terms={}",
        path.display(),
        table.len()
    ));
    write_block(&path, table)?;
    *block_id += 1;
    Ok(())
}

/// Tokenise, stem, and accumulate one document. A file that cannot be
/// opened or read is a warning; the document simply contributes no postings.
fn process_document(
    txt_path: &Path,
    doc_id: u32,
    table: &mut TermTable,
    doc_set: &mut DocTermSet,
    counters: &mut BuildCounters,
    pb: &ProgressBar,
) {
    let file = match File::open(txt_path) {
        Ok(f) => f,
        Err(e) => {
            pb.println(format!("⚠️  cannot open {}: {}", txt_path.display(), e));
            return;
        }
    };

    doc_set.reset();
    let mut unique_in_doc: u64 = 0;
    let mut tokenizer = Tokenizer::new();
    let mut stem_buf = [0u8; MAX_TOKEN_LEN];
    let mut reader = file;
    let mut buf = vec![0u8; READ_BUF_BYTES];

    let mut consume = |token: &[u8],
                       table: &mut TermTable,
                       doc_set: &mut DocTermSet,
                       counters: &mut BuildCounters| {
        counters.total_tokens += 1;
        stem_buf[..token.len()].copy_from_slice(token);
        let stem_len = stem_word(&mut stem_buf[..token.len()]);
        let stem = &stem_buf[..stem_len];
        if stem.is_empty() {
            return;
        }
        if !doc_set.contains_or_add(stem) {
            table.insert(stem, doc_id);
            unique_in_doc += 1;
        }
    };

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) => {
                pb.println(format!("⚠️  read error on {}: {}", txt_path.display(), e));
                break;
            }
        };
        counters.total_bytes += n as u64;
        tokenizer.feed(&buf[..n], |tok| consume(tok, table, doc_set, counters));
    }
    tokenizer.finish(|tok| consume(tok, table, doc_set, counters));

    counters.unique_terms_sum += unique_in_doc;
}
