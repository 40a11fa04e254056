// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query-line tokeniser.
//!
//! Same alphabet as the corpus tokeniser (maximal ASCII-alphanumeric runs,
//! lowercased, capped at 255 bytes) plus the operator characters. `&` and
//! `&&` both read as AND, `|` and `||` as OR. Any other byte is garbage and
//! is skipped without producing a token.

use crate::tokenize::MAX_TOKEN_LEN;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryToken {
    /// Lowercased term bytes, not yet stemmed.
    Term(Vec<u8>),
    And,
    Or,
    Not,
    LParen,
    RParen,
}

/// Iterator over the tokens of one query line.
pub struct QueryLexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> QueryLexer<'a> {
    pub fn new(line: &'a str) -> Self {
        Self {
            bytes: line.as_bytes(),
            pos: 0,
        }
    }
}

impl Iterator for QueryLexer<'_> {
    type Item = QueryToken;

    fn next(&mut self) -> Option<QueryToken> {
        loop {
            while self.pos < self.bytes.len()
                && matches!(self.bytes[self.pos], b' ' | b'\t' | b'\r' | b'\n')
            {
                self.pos += 1;
            }
            if self.pos >= self.bytes.len() {
                return None;
            }

            let c = self.bytes[self.pos];
            match c {
                b'(' => {
                    self.pos += 1;
                    return Some(QueryToken::LParen);
                }
                b')' => {
                    self.pos += 1;
                    return Some(QueryToken::RParen);
                }
                b'!' => {
                    self.pos += 1;
                    return Some(QueryToken::Not);
                }
                b'&' => {
                    self.pos += if self.bytes.get(self.pos + 1) == Some(&b'&') {
                        2
                    } else {
                        1
                    };
                    return Some(QueryToken::And);
                }
                b'|' => {
                    self.pos += if self.bytes.get(self.pos + 1) == Some(&b'|') {
                        2
                    } else {
                        1
                    };
                    return Some(QueryToken::Or);
                }
                _ if c.is_ascii_alphanumeric() => {
                    let mut term = Vec::new();
                    while self.pos < self.bytes.len()
                        && self.bytes[self.pos].is_ascii_alphanumeric()
                    {
                        if term.len() < MAX_TOKEN_LEN {
                            term.push(self.bytes[self.pos].to_ascii_lowercase());
                        }
                        self.pos += 1;
                    }
                    return Some(QueryToken::Term(term));
                }
                _ => {
                    // Garbage byte: skip and keep scanning.
                    self.pos += 1;
                }
            }
        }
    }
}
