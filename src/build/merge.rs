// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! K-way merge of spill blocks into the final lexicon and postings.
//!
//! Every block is sorted, so the merge repeatedly takes the smallest current
//! term across all readers, unions the posting lists of the readers sitting
//! on that exact term, appends the union to `postings.bin`, and records the
//! term in the lexicon builder. Blocks never share a (term, doc) pair by
//! construction, but the union drops duplicates anyway and keeps the
//! strictly-increasing invariant unconditional.
//!
//! Cost is O(total_postings * K) with K readers; K is bounded by
//! build_mem / flush_mem and stays small.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::index::format::{LexiconHeader, LexiconRecord, PostingsHeader};

use super::block::BlockReader;
use super::term_table::Arena;

/// Figures reported after a merge.
#[derive(Debug)]
pub struct MergeStats {
    pub term_count: u32,
    pub avg_term_len: f64,
    pub postings_bytes: u64,
}

// ============================================================================
// LEXICON BUILDER
// ============================================================================

/// Accumulates `(term, postings location)` records and writes `lexicon.bin`.
pub struct LexiconBuilder {
    records: Vec<LexiconRecord>,
    pool: Arena,
    sum_term_len: u64,
}

impl LexiconBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            pool: Arena::with_capacity(1 << 20),
            sum_term_len: 0,
        }
    }

    pub fn add_term(&mut self, term: &[u8], postings_off: u64, postings_len: u32) {
        let term_off = self.pool.add(term);
        self.records.push(LexiconRecord {
            term_off,
            term_len: term.len() as u16,
            flags: 0,
            df: postings_len,
            postings_off,
            postings_len,
            reserved: 0,
        });
        self.sum_term_len += term.len() as u64;
    }

    pub fn term_count(&self) -> u32 {
        self.records.len() as u32
    }

    pub fn avg_term_len(&self) -> f64 {
        if self.records.is_empty() {
            0.0
        } else {
            self.sum_term_len as f64 / self.records.len() as f64
        }
    }

    /// Sort records by term bytes and emit `lexicon.bin`. The merge already
    /// produces terms in order, so the sort is an idempotent safety net.
    pub fn write_to(&mut self, path: &Path) -> io::Result<()> {
        let pool = std::mem::replace(&mut self.pool, Arena::with_capacity(0));
        self.records.sort_by(|a, b| {
            let ta = pool.get(a.term_off, a.term_len as usize);
            let tb = pool.get(b.term_off, b.term_len as usize);
            ta.cmp(tb)
        });
        self.pool = pool;

        let file = File::create(path)?;
        let mut w = BufWriter::new(file);
        LexiconHeader {
            term_count: self.records.len() as u32,
            string_pool_bytes: self.pool.used() as u64,
        }
        .write(&mut w)?;
        for rec in &self.records {
            rec.write(&mut w)?;
        }
        w.write_all(self.pool.bytes())?;
        w.flush()
    }
}

impl Default for LexiconBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// MERGE
// ============================================================================

/// Union of two sorted id lists, duplicates dropped.
pub fn union_sorted(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut out = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        let v = match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
                a[i - 1]
            }
            std::cmp::Ordering::Less => {
                i += 1;
                a[i - 1]
            }
            std::cmp::Ordering::Greater => {
                j += 1;
                b[j - 1]
            }
        };
        if out.last() != Some(&v) {
            out.push(v);
        }
    }
    for &v in &a[i..] {
        if out.last() != Some(&v) {
            out.push(v);
        }
    }
    for &v in &b[j..] {
        if out.last() != Some(&v) {
            out.push(v);
        }
    }
    out
}

/// Merge every `*.blk` file under `blocks_dir` into the final lexicon and
/// postings artifacts.
pub fn merge_blocks(
    blocks_dir: &Path,
    lexicon_path: &Path,
    postings_path: &Path,
) -> io::Result<MergeStats> {
    let mut block_paths: Vec<PathBuf> = std::fs::read_dir(blocks_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "blk"))
        .collect();
    if block_paths.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("no .blk files in {}", blocks_dir.display()),
        ));
    }
    // Directory order is arbitrary; sorting keeps rebuilds byte-identical.
    block_paths.sort();

    let mut readers = block_paths
        .iter()
        .map(|p| BlockReader::open(p))
        .collect::<io::Result<Vec<_>>>()?;

    let file = File::create(postings_path)?;
    let mut postings = BufWriter::new(file);
    PostingsHeader.write(&mut postings)?;
    let mut cursor = PostingsHeader::SIZE as u64;

    let mut lexicon = LexiconBuilder::new();
    let mut current_term = Vec::new();

    loop {
        let mut min_idx: Option<usize> = None;
        for (i, reader) in readers.iter().enumerate() {
            if !reader.is_live() {
                continue;
            }
            match min_idx {
                None => min_idx = Some(i),
                Some(m) if reader.term() < readers[m].term() => min_idx = Some(i),
                Some(_) => {}
            }
        }
        let Some(min_idx) = min_idx else { break };

        current_term.clear();
        current_term.extend_from_slice(readers[min_idx].term());
        let mut merged = readers[min_idx].doc_ids().to_vec();
        readers[min_idx].advance()?;

        for reader in &mut readers {
            if reader.is_live() && reader.term() == current_term.as_slice() {
                merged = union_sorted(&merged, reader.doc_ids());
                reader.advance()?;
            }
        }

        for &doc_id in &merged {
            postings.write_all(&doc_id.to_le_bytes())?;
        }
        lexicon.add_term(&current_term, cursor, merged.len() as u32);
        cursor += merged.len() as u64 * 4;
    }

    postings.flush()?;
    lexicon.write_to(lexicon_path)?;

    Ok(MergeStats {
        term_count: lexicon.term_count(),
        avg_term_len: lexicon.avg_term_len(),
        postings_bytes: cursor,
    })
}
