// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! On-disk layouts for the three index artifacts and the spill blocks.
//!
//! Every multi-byte integer is little-endian and every structure is tightly
//! packed; the encode/decode pairs below are the single source of truth for
//! field order and widths. The headers carry a magic and a version so a
//! reader can reject a foreign or stale file in one comparison before
//! touching anything else.
//!
//! ```text
//! docs.bin      DOCS header │ DocRecord × doc_count │ string pool
//! lexicon.bin   LEXI header │ LexiconRecord × term_count (term-sorted) │ pool
//! postings.bin  POST header │ concatenated u32 doc-id arrays
//! *.blk         BLK1 header │ (term_len u16, df u32, term, doc_ids) × n
//! ```

use std::io::{self, Read, Write};

/// Magic bytes of the documents artifact.
pub const DOCS_MAGIC: [u8; 4] = *b"DOCS";
/// Magic bytes of the lexicon artifact.
pub const LEXICON_MAGIC: [u8; 4] = *b"LEXI";
/// Magic bytes of the postings artifact.
pub const POSTINGS_MAGIC: [u8; 4] = *b"POST";
/// Magic bytes of an intermediate spill block.
pub const BLOCK_MAGIC: [u8; 4] = *b"BLK1";

/// Format version shared by the three artifacts.
pub const VERSION: u32 = 1;

const RESERVED: [u8; 32] = [0; 32];

fn bad_magic(name: &str, got: [u8; 4]) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("invalid {} magic: {:?}", name, got),
    )
}

fn bad_version(name: &str, got: u32) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("unsupported {} version {} (expected {})", name, got, VERSION),
    )
}

// ============================================================================
// DOCUMENTS ARTIFACT
// ============================================================================

/// Header of `docs.bin` (52 bytes).
#[derive(Debug, Clone)]
pub struct DocsHeader {
    pub doc_count: u32,
    pub string_pool_bytes: u64,
}

impl DocsHeader {
    // 4 (magic) + 4 (version) + 4 (doc_count) + 8 (pool) + 32 (reserved)
    pub const SIZE: usize = 52;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&DOCS_MAGIC)?;
        w.write_all(&VERSION.to_le_bytes())?;
        w.write_all(&self.doc_count.to_le_bytes())?;
        w.write_all(&self.string_pool_bytes.to_le_bytes())?;
        w.write_all(&RESERVED)?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; Self::SIZE];
        r.read_exact(&mut buf)?;
        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != DOCS_MAGIC {
            return Err(bad_magic("docs.bin", magic));
        }
        let version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        if version != VERSION {
            return Err(bad_version("docs.bin", version));
        }
        Ok(Self {
            doc_count: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            string_pool_bytes: u64::from_le_bytes([
                buf[12], buf[13], buf[14], buf[15], buf[16], buf[17], buf[18], buf[19],
            ]),
        })
    }
}

/// Per-document record: offsets and lengths into the docs string pool.
#[derive(Debug, Clone, Copy)]
pub struct DocRecord {
    pub title_off: u64,
    pub title_len: u32,
    pub url_off: u64,
    pub url_len: u32,
}

impl DocRecord {
    pub const SIZE: usize = 24;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.title_off.to_le_bytes())?;
        w.write_all(&self.title_len.to_le_bytes())?;
        w.write_all(&self.url_off.to_le_bytes())?;
        w.write_all(&self.url_len.to_le_bytes())?;
        Ok(())
    }

    /// Decode one record from exactly `SIZE` bytes.
    pub fn parse(b: &[u8]) -> Self {
        debug_assert!(b.len() >= Self::SIZE);
        Self {
            title_off: u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
            title_len: u32::from_le_bytes([b[8], b[9], b[10], b[11]]),
            url_off: u64::from_le_bytes([b[12], b[13], b[14], b[15], b[16], b[17], b[18], b[19]]),
            url_len: u32::from_le_bytes([b[20], b[21], b[22], b[23]]),
        }
    }
}

// ============================================================================
// LEXICON ARTIFACT
// ============================================================================

/// Header of `lexicon.bin` (52 bytes).
#[derive(Debug, Clone)]
pub struct LexiconHeader {
    pub term_count: u32,
    pub string_pool_bytes: u64,
}

impl LexiconHeader {
    pub const SIZE: usize = 52;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&LEXICON_MAGIC)?;
        w.write_all(&VERSION.to_le_bytes())?;
        w.write_all(&self.term_count.to_le_bytes())?;
        w.write_all(&self.string_pool_bytes.to_le_bytes())?;
        w.write_all(&RESERVED)?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; Self::SIZE];
        r.read_exact(&mut buf)?;
        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != LEXICON_MAGIC {
            return Err(bad_magic("lexicon.bin", magic));
        }
        let version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        if version != VERSION {
            return Err(bad_version("lexicon.bin", version));
        }
        Ok(Self {
            term_count: u32::from_le_bytes([buf[8], buf[9], buf[10], buf[11]]),
            string_pool_bytes: u64::from_le_bytes([
                buf[12], buf[13], buf[14], buf[15], buf[16], buf[17], buf[18], buf[19],
            ]),
        })
    }
}

/// Per-term record of the lexicon (32 bytes).
///
/// `df` always equals `postings_len`; both are stored so either can be read
/// without decoding the other's context. Records are sorted by term bytes
/// (unsigned byte order, length as tiebreaker) to allow binary search.
#[derive(Debug, Clone, Copy)]
pub struct LexiconRecord {
    pub term_off: u64,
    pub term_len: u16,
    pub flags: u16,
    pub df: u32,
    pub postings_off: u64,
    pub postings_len: u32,
    pub reserved: u32,
}

impl LexiconRecord {
    pub const SIZE: usize = 32;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&self.term_off.to_le_bytes())?;
        w.write_all(&self.term_len.to_le_bytes())?;
        w.write_all(&self.flags.to_le_bytes())?;
        w.write_all(&self.df.to_le_bytes())?;
        w.write_all(&self.postings_off.to_le_bytes())?;
        w.write_all(&self.postings_len.to_le_bytes())?;
        w.write_all(&self.reserved.to_le_bytes())?;
        Ok(())
    }

    /// Decode one record from exactly `SIZE` bytes.
    pub fn parse(b: &[u8]) -> Self {
        debug_assert!(b.len() >= Self::SIZE);
        Self {
            term_off: u64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]),
            term_len: u16::from_le_bytes([b[8], b[9]]),
            flags: u16::from_le_bytes([b[10], b[11]]),
            df: u32::from_le_bytes([b[12], b[13], b[14], b[15]]),
            postings_off: u64::from_le_bytes([
                b[16], b[17], b[18], b[19], b[20], b[21], b[22], b[23],
            ]),
            postings_len: u32::from_le_bytes([b[24], b[25], b[26], b[27]]),
            reserved: u32::from_le_bytes([b[28], b[29], b[30], b[31]]),
        }
    }
}

// ============================================================================
// POSTINGS ARTIFACT
// ============================================================================

/// Header of `postings.bin` (40 bytes). The payload is raw concatenated
/// little-endian `u32` arrays addressed by lexicon records.
#[derive(Debug, Clone)]
pub struct PostingsHeader;

impl PostingsHeader {
    pub const SIZE: usize = 40;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&POSTINGS_MAGIC)?;
        w.write_all(&VERSION.to_le_bytes())?;
        w.write_all(&RESERVED)?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; Self::SIZE];
        r.read_exact(&mut buf)?;
        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != POSTINGS_MAGIC {
            return Err(bad_magic("postings.bin", magic));
        }
        let version = u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        if version != VERSION {
            return Err(bad_version("postings.bin", version));
        }
        Ok(Self)
    }
}

// ============================================================================
// SPILL BLOCKS
// ============================================================================

/// Header of an intermediate block file (8 bytes).
#[derive(Debug, Clone)]
pub struct BlockHeader {
    pub term_count: u32,
}

impl BlockHeader {
    pub const SIZE: usize = 8;

    pub fn write<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(&BLOCK_MAGIC)?;
        w.write_all(&self.term_count.to_le_bytes())?;
        Ok(())
    }

    pub fn read<R: Read>(r: &mut R) -> io::Result<Self> {
        let mut buf = [0u8; Self::SIZE];
        r.read_exact(&mut buf)?;
        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != BLOCK_MAGIC {
            return Err(bad_magic("block", magic));
        }
        Ok(Self {
            term_count: u32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]),
        })
    }
}
