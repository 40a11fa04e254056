// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Read-side access to a built index.
//!
//! [`Index::load`] reads the three artifacts whole into owned byte buffers,
//! validates magics and versions, then releases the file handles; a query
//! session touches only memory afterwards. Lookups hand out views into the
//! buffers; nothing is copied until the evaluator asks for an owned posting
//! list.

use std::io;
use std::path::Path;

use super::format::{DocRecord, DocsHeader, LexiconHeader, LexiconRecord, PostingsHeader};

/// A term's posting list as a view into the postings buffer.
///
/// The payload is little-endian `u32`s; alignment of the backing buffer is
/// arbitrary, so elements are decoded on access rather than transmuted.
#[derive(Clone, Copy)]
pub struct PostingList<'a> {
    bytes: &'a [u8],
}

impl<'a> PostingList<'a> {
    pub const EMPTY: PostingList<'static> = PostingList { bytes: &[] };

    pub fn len(&self) -> usize {
        self.bytes.len() / 4
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn get(&self, i: usize) -> u32 {
        let off = i * 4;
        u32::from_le_bytes([
            self.bytes[off],
            self.bytes[off + 1],
            self.bytes[off + 2],
            self.bytes[off + 3],
        ])
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + 'a {
        let bytes = self.bytes;
        (0..bytes.len() / 4).map(move |i| {
            u32::from_le_bytes([
                bytes[i * 4],
                bytes[i * 4 + 1],
                bytes[i * 4 + 2],
                bytes[i * 4 + 3],
            ])
        })
    }

    pub fn to_vec(&self) -> Vec<u32> {
        self.iter().collect()
    }
}

/// An index directory loaded into memory.
#[derive(Debug)]
pub struct Index {
    docs_buf: Vec<u8>,
    lexicon_buf: Vec<u8>,
    postings_buf: Vec<u8>,
    doc_count: u32,
    term_count: u32,
    doc_pool_off: usize,
    term_pool_off: usize,
}

impl Index {
    /// Load `docs.bin`, `lexicon.bin`, and `postings.bin` from `dir`.
    ///
    /// Bad magic, wrong version, or a file too small for its declared
    /// record array is an `InvalidData` error; the query process treats
    /// all of these as fatal.
    pub fn load(dir: &Path) -> io::Result<Self> {
        let docs_buf = std::fs::read(dir.join("docs.bin"))?;
        let lexicon_buf = std::fs::read(dir.join("lexicon.bin"))?;
        let postings_buf = std::fs::read(dir.join("postings.bin"))?;

        let docs_header = DocsHeader::read(&mut &docs_buf[..])?;
        let doc_pool_off = DocsHeader::SIZE + docs_header.doc_count as usize * DocRecord::SIZE;
        if docs_buf.len() < doc_pool_off {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "docs.bin truncated: record array exceeds file",
            ));
        }

        let lex_header = LexiconHeader::read(&mut &lexicon_buf[..])?;
        let term_pool_off =
            LexiconHeader::SIZE + lex_header.term_count as usize * LexiconRecord::SIZE;
        if lexicon_buf.len() < term_pool_off {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "lexicon.bin truncated: record array exceeds file",
            ));
        }

        PostingsHeader::read(&mut &postings_buf[..])?;

        Ok(Self {
            docs_buf,
            lexicon_buf,
            postings_buf,
            doc_count: docs_header.doc_count,
            term_count: lex_header.term_count,
            doc_pool_off,
            term_pool_off,
        })
    }

    pub fn doc_count(&self) -> u32 {
        self.doc_count
    }

    pub fn term_count(&self) -> u32 {
        self.term_count
    }

    /// Title and url bytes for an internal doc id.
    pub fn doc(&self, id: u32) -> Option<(&[u8], &[u8])> {
        if id >= self.doc_count {
            return None;
        }
        let rec_off = DocsHeader::SIZE + id as usize * DocRecord::SIZE;
        let rec = DocRecord::parse(&self.docs_buf[rec_off..rec_off + DocRecord::SIZE]);

        let title_start = self.doc_pool_off + rec.title_off as usize;
        let url_start = self.doc_pool_off + rec.url_off as usize;
        let title = self
            .docs_buf
            .get(title_start..title_start + rec.title_len as usize)?;
        let url = self
            .docs_buf
            .get(url_start..url_start + rec.url_len as usize)?;
        Some((title, url))
    }

    /// Lexicon record at a given index. Callers get indices from
    /// [`Self::find_term`], which keeps them in range.
    pub fn lexicon_record(&self, idx: usize) -> LexiconRecord {
        let off = LexiconHeader::SIZE + idx * LexiconRecord::SIZE;
        LexiconRecord::parse(&self.lexicon_buf[off..off + LexiconRecord::SIZE])
    }

    /// Term bytes of a lexicon record.
    pub fn term_bytes(&self, rec: &LexiconRecord) -> &[u8] {
        let start = self.term_pool_off + rec.term_off as usize;
        self.lexicon_buf
            .get(start..start + rec.term_len as usize)
            .unwrap_or(&[])
    }

    /// Binary search the sorted lexicon for an exact term.
    pub fn find_term(&self, term: &[u8]) -> Option<usize> {
        let mut lo = 0usize;
        let mut hi = self.term_count as usize;
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let rec = self.lexicon_record(mid);
            match term.cmp(self.term_bytes(&rec)) {
                std::cmp::Ordering::Equal => return Some(mid),
                std::cmp::Ordering::Less => hi = mid,
                std::cmp::Ordering::Greater => lo = mid + 1,
            }
        }
        None
    }

    /// Posting list of a lexicon record, as a view into the postings
    /// buffer. A record whose range falls outside the file yields the empty
    /// list rather than an error.
    pub fn postings(&self, rec: &LexiconRecord) -> PostingList<'_> {
        let start = rec.postings_off as usize;
        let byte_len = rec.postings_len as usize * 4;
        match start
            .checked_add(byte_len)
            .and_then(|end| self.postings_buf.get(start..end))
        {
            Some(bytes) => PostingList { bytes },
            None => PostingList::EMPTY,
        }
    }

    /// Owned posting list for a term, empty when the term is absent.
    pub fn term_postings(&self, term: &[u8]) -> Vec<u32> {
        match self.find_term(term) {
            Some(idx) => {
                let rec = self.lexicon_record(idx);
                self.postings(&rec).to_vec()
            }
            None => Vec::new(),
        }
    }
}
