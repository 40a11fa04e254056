//! Boolean-query inverted index over a static text corpus.
//!
//! boolex ingests a JSON-lines manifest plus a directory of plain-text
//! documents, stems every token with a Porter stemmer, and builds an
//! on-disk inverted index with bounded memory: the in-memory term table
//! spills sorted blocks to disk, and a k-way merge produces the final
//! lexicon and postings. A line-oriented CLI then evaluates boolean
//! expressions (`&&`, `||`, `!`, parentheses, implicit AND) over the
//! sorted posting lists.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────┐    ┌──────────┐    ┌──────────────┐    ┌─────────────┐
//! │ tokenize  │───▶│  stem    │───▶│ build        │───▶│ index       │
//! │ (byte →   │    │ (Porter) │    │ (term table, │    │ (docs.bin,  │
//! │  tokens)  │    │          │    │  blocks,     │    │  lexicon.bin│
//! └───────────┘    └────┬─────┘    │  k-way merge)│    │ postings.bin│
//!                       │          └──────────────┘    └──────┬──────┘
//!                       │                                     │
//!                  ┌────▼──────────────────────────┐          │
//!                  │ query                         │◀─────────┘
//!                  │ (lexer → shunting yard → RPN  │
//!                  │  → AND/OR/NOT set algebra)    │
//!                  └───────────────────────────────┘
//! ```
//!
//! The builder and the query engine share the stemmer: both sides must
//! reduce a surface form to the same bytes or recall silently breaks.
//!
//! The system is deliberately narrow: no ranking, no phrase queries, no
//! incremental updates, ASCII only, single-threaded. One known degradation
//! is documented on [`build::term_table::DocTermSet`]: a document with more
//! distinct stems than the per-doc set holds may insert a (term, doc) pair
//! twice, which downstream stages absorb.

pub mod build;
pub mod index;
pub mod query;
pub mod stem;
pub mod tokenize;

pub use build::manifest::ManifestRecord;
pub use build::{run_build, BuildOptions};
pub use index::{Index, LexiconRecord, PostingList};
pub use query::{eval_postfix, parse_query, RpnItem};
pub use stem::{stem_in_place, stem_word};
pub use tokenize::{Tokenizer, MAX_TOKEN_LEN};
