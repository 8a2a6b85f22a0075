// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
//! Word-packed null tracking for chunk columns.
//!
//! A `NullMask` records, one bit per position, which slots of its owning
//! column hold NULL. Bits are packed 64 to a word so bulk clears and append
//! growth touch whole words. An unset bit means "not null"; [`NullMask::grow`]
//! zero-fills, so a freshly grown range is fully non-null before any source
//! bits are copied in.

const WORD_BITS: usize = 64;

#[derive(Clone, Debug, Default)]
pub struct NullMask {
    words: Vec<u64>,
    any_null: bool,
}

impl NullMask {
    pub fn new() -> Self {
        Self {
            words: Vec::new(),
            any_null: false,
        }
    }

    /// A mask addressing at least `len` positions, all non-null.
    pub fn with_len(len: usize) -> Self {
        Self {
            words: vec![0; len.div_ceil(WORD_BITS)],
            any_null: false,
        }
    }

    /// Number of positions addressable without growing.
    pub fn capacity(&self) -> usize {
        self.words.len() * WORD_BITS
    }

    /// Cheap: backed by a flag maintained on every mutation, not a word scan.
    pub fn has_nulls(&self) -> bool {
        self.any_null
    }

    pub fn is_null(&self, pos: usize) -> bool {
        self.words
            .get(pos / WORD_BITS)
            .map(|word| word & (1u64 << (pos % WORD_BITS)) != 0)
            .unwrap_or(false)
    }

    pub fn set_null(&mut self, pos: usize) {
        self.ensure_capacity(pos + 1);
        self.words[pos / WORD_BITS] |= 1u64 << (pos % WORD_BITS);
        self.any_null = true;
    }

    pub fn set_null_range(&mut self, start: usize, len: usize) {
        if len == 0 {
            return;
        }
        let end = start + len;
        self.ensure_capacity(end);
        let first = start / WORD_BITS;
        let last = (end - 1) / WORD_BITS;
        for word in first..=last {
            let lo = if word == first { start % WORD_BITS } else { 0 };
            let hi = if word == last {
                (end - 1) % WORD_BITS
            } else {
                WORD_BITS - 1
            };
            self.words[word] |= range_mask(lo, hi);
        }
        self.any_null = true;
    }

    /// Clears the whole mask to "no nulls". O(words). Callers that fully
    /// overwrite a column run this first so stale bits from a reused chunk
    /// cannot survive the overwrite.
    pub fn unset_all(&mut self) {
        for word in &mut self.words {
            *word = 0;
        }
        self.any_null = false;
    }

    /// Extends the mask for `added` appended positions by whole zeroed words.
    ///
    /// Append paths must grow before consulting the source's `has_nulls()`:
    /// the appended range has to be addressable (and read back as non-null)
    /// even when no source bit is ever transferred.
    pub fn grow(&mut self, added: usize) {
        let added_words = added.div_ceil(WORD_BITS);
        self.words.resize(self.words.len() + added_words, 0);
    }

    pub(crate) fn ensure_capacity(&mut self, positions: usize) {
        let words = positions.div_ceil(WORD_BITS);
        if self.words.len() < words {
            self.words.resize(words, 0);
        }
    }

    pub(crate) fn byte_size(&self) -> usize {
        self.words.capacity() * std::mem::size_of::<u64>()
    }
}

/// Mask with bits `lo..=hi` set, `hi < 64`.
fn range_mask(lo: usize, hi: usize) -> u64 {
    (u64::MAX >> (WORD_BITS - 1 - hi)) & (u64::MAX << lo)
}
