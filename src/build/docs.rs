// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Builder for the documents artifact.
//!
//! Append-only: each manifest record contributes one fixed-size record and
//! its title/url bytes in the string pool, in manifest order. The record
//! index is the document's internal id, the only identifier postings store.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::index::format::{DocRecord, DocsHeader};

use super::term_table::Arena;

pub struct DocsBuilder {
    records: Vec<DocRecord>,
    pool: Arena,
}

impl DocsBuilder {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            pool: Arena::with_capacity(1 << 20),
        }
    }

    /// Append a document, returning its internal id.
    pub fn add_doc(&mut self, title: &str, url: &str) -> u32 {
        let title_off = self.pool.add(title.as_bytes());
        let url_off = self.pool.add(url.as_bytes());
        self.records.push(DocRecord {
            title_off,
            title_len: title.len() as u32,
            url_off,
            url_len: url.len() as u32,
        });
        (self.records.len() - 1) as u32
    }

    pub fn doc_count(&self) -> u32 {
        self.records.len() as u32
    }

    /// Emit `docs.bin`: header, records, string pool.
    pub fn write_to(&self, path: &Path) -> io::Result<()> {
        let file = File::create(path)?;
        let mut w = BufWriter::new(file);

        DocsHeader {
            doc_count: self.records.len() as u32,
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

impl Default for DocsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
