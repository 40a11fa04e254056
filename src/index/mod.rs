// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The on-disk index: binary layouts and the read-side access layer.
//!
//! Three artifacts make up an index directory:
//! - **docs.bin**: per-document display data (title, url)
//! - **lexicon.bin**: sorted term records, binary-searchable
//! - **postings.bin**: concatenated sorted doc-id lists
//!
//! [`format`] owns the byte layouts; [`reader`] loads all three files into
//! memory and hands out validated views.

pub mod format;
pub mod reader;

pub use format::{
    BlockHeader, DocRecord, DocsHeader, LexiconHeader, LexiconRecord, PostingsHeader, VERSION,
};
pub use reader::{Index, PostingList};
