// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Streaming ASCII tokeniser.
//!
//! Documents are read in fixed-size chunks, so a token can start in one read
//! and end in the next. The tokeniser keeps the partial token across `feed`
//! calls and hands complete tokens to a caller-supplied sink, already
//! lowercased. ASCII only: a token is a maximal run of `[0-9A-Za-z]`, every
//! other byte is a separator.

/// Maximum token length in bytes. Runs longer than this keep their first 255
/// bytes; the overflow is dropped and does not start a second token.
pub const MAX_TOKEN_LEN: usize = 255;

/// Incremental tokeniser over a byte stream.
pub struct Tokenizer {
    buf: [u8; MAX_TOKEN_LEN],
    len: usize,
    in_token: bool,
}

impl Tokenizer {
    pub fn new() -> Self {
        Self {
            buf: [0; MAX_TOKEN_LEN],
            len: 0,
            in_token: false,
        }
    }

    /// Scan one chunk, emitting every token that ends inside it.
    ///
    /// A token still open at the end of the chunk stays buffered for the
    /// next `feed` (or `finish`) call.
    pub fn feed(&mut self, chunk: &[u8], mut sink: impl FnMut(&[u8])) {
        for &byte in chunk {
            if byte.is_ascii_alphanumeric() {
                self.in_token = true;
                if self.len < MAX_TOKEN_LEN {
                    self.buf[self.len] = byte.to_ascii_lowercase();
                    self.len += 1;
                }
            } else if self.in_token {
                sink(&self.buf[..self.len]);
                self.len = 0;
                self.in_token = false;
            }
        }
    }

    /// Emit the pending partial token, if any, at end of input.
    pub fn finish(&mut self, mut sink: impl FnMut(&[u8])) {
        if self.in_token && self.len > 0 {
            sink(&self.buf[..self.len]);
        }
        self.len = 0;
        self.in_token = false;
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new()
    }
}
