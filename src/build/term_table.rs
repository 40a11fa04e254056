// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory accumulation structures for the index builder.
//!
//! The builder's working set is one big open-addressed hash from stem bytes
//! to a growing posting list, plus a small per-document set that guarantees
//! each (stem, doc) pair is recorded at most once. Both tables hash with
//! FNV-1a and probe linearly; a slot with hash 0 is empty, and the hash
//! function remaps a real 0 to 1 so the sentinel is unambiguous.
//!
//! The term table tracks an approximate byte footprint so the build loop can
//! spill a sorted block to disk when it crosses the memory budget. The
//! accounting deliberately mirrors what is actually resident: slot array,
//! string arena, and posting-list capacities.

/// FNV-1a 64-bit over raw bytes. Zero is reserved as the empty-slot
/// sentinel, so a genuine zero hash is remapped to 1.
pub fn fnv1a_64(bytes: &[u8]) -> u64 {
    let mut h: u64 = 0xcbf2_9ce4_8422_2325;
    for &b in bytes {
        h ^= b as u64;
        h = h.wrapping_mul(0x0000_0100_0000_01b3);
    }
    if h == 0 {
        1
    } else {
        h
    }
}

// ============================================================================
// STRING ARENA
// ============================================================================

/// Append-only byte pool. Strings are stored NUL-terminated so the pool can
/// be written to disk as-is and offsets stay stable for the file layout.
pub struct Arena {
    buf: Vec<u8>,
}

impl Arena {
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
        }
    }

    /// Copy `s` into the pool and return its offset.
    pub fn add(&mut self, s: &[u8]) -> u64 {
        let off = self.buf.len() as u64;
        self.buf.extend_from_slice(s);
        self.buf.push(0);
        off
    }

    pub fn get(&self, off: u64, len: usize) -> &[u8] {
        &self.buf[off as usize..off as usize + len]
    }

    /// Bytes currently in the pool, NUL terminators included.
    pub fn used(&self) -> usize {
        self.buf.len()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn reset(&mut self) {
        self.buf.clear();
    }
}

// ============================================================================
// TERM TABLE
// ============================================================================

#[derive(Default)]
struct TermSlot {
    hash: u64,
    term_off: u64,
    term_len: u16,
    postings: Vec<u32>,
}

/// Open-addressed map from stem bytes to a sorted posting list.
///
/// Capacity is always a power of two; the table doubles at 70% load. Doc ids
/// arrive in non-decreasing order (documents are processed in manifest
/// order), so appending keeps each posting list strictly increasing as long
/// as same-doc repeats are dropped, which the tail check does, covering the
/// rare case where a saturated [`DocTermSet`] lets a repeat through.
pub struct TermTable {
    slots: Vec<TermSlot>,
    used: usize,
    arena: Arena,
}

impl TermTable {
    /// `capacity` must be a power of two.
    pub fn with_capacity(capacity: usize, arena_bytes: usize) -> Self {
        assert!(capacity.is_power_of_two());
        Self {
            slots: (0..capacity).map(|_| TermSlot::default()).collect(),
            used: 0,
            arena: Arena::with_capacity(arena_bytes),
        }
    }

    /// Number of distinct terms currently held.
    pub fn len(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.used == 0
    }

    fn grow_if_needed(&mut self) {
        if self.used * 10 < self.slots.len() * 7 {
            return;
        }
        let new_cap = self.slots.len() * 2;
        let old = std::mem::replace(
            &mut self.slots,
            (0..new_cap).map(|_| TermSlot::default()).collect(),
        );
        let mask = new_cap - 1;
        for slot in old {
            if slot.hash == 0 {
                continue;
            }
            let mut pos = slot.hash as usize & mask;
            while self.slots[pos].hash != 0 {
                pos = (pos + 1) & mask;
            }
            self.slots[pos] = slot;
        }
    }

    /// Record that `doc_id` contains `stem`. Appends only when the list tail
    /// is below `doc_id`, so repeats of the current document are no-ops.
    pub fn insert(&mut self, stem: &[u8], doc_id: u32) {
        if stem.is_empty() {
            return;
        }
        self.grow_if_needed();

        let h = fnv1a_64(stem);
        let mask = self.slots.len() - 1;
        let mut pos = h as usize & mask;
        loop {
            let slot = &self.slots[pos];
            if slot.hash == 0 {
                break;
            }
            if slot.hash == h
                && slot.term_len as usize == stem.len()
                && self.arena.get(slot.term_off, stem.len()) == stem
            {
                let postings = &mut self.slots[pos].postings;
                if postings.last().map_or(true, |&tail| tail < doc_id) {
                    postings.push(doc_id);
                }
                return;
            }
            pos = (pos + 1) & mask;
        }

        let term_off = self.arena.add(stem);
        let slot = &mut self.slots[pos];
        slot.hash = h;
        slot.term_off = term_off;
        slot.term_len = stem.len() as u16;
        slot.postings.push(doc_id);
        self.used += 1;
    }

    /// Approximate resident bytes: slot array + arena + posting capacities.
    /// The build loop compares this against its memory budget between
    /// documents.
    pub fn approx_bytes(&self) -> usize {
        let mut bytes = self.slots.len() * std::mem::size_of::<TermSlot>() + self.arena.used();
        for slot in &self.slots {
            if slot.hash != 0 {
                bytes += slot.postings.capacity() * std::mem::size_of::<u32>();
            }
        }
        bytes
    }

    /// All live entries as `(term, postings)`, sorted by term bytes.
    pub fn sorted_entries(&self) -> Vec<(&[u8], &[u32])> {
        let mut entries: Vec<(&[u8], &[u32])> = self
            .slots
            .iter()
            .filter(|s| s.hash != 0)
            .map(|s| {
                (
                    self.arena.get(s.term_off, s.term_len as usize),
                    s.postings.as_slice(),
                )
            })
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    /// Drop every entry and reset the arena. Slot capacity is kept so the
    /// next block starts with the same table size.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.hash = 0;
            slot.term_off = 0;
            slot.term_len = 0;
            slot.postings = Vec::new();
        }
        self.used = 0;
        self.arena.reset();
    }
}

// ============================================================================
// PER-DOCUMENT TERM SET
// ============================================================================

#[derive(Default, Clone)]
struct SetSlot {
    hash: u64,
    term_off: u64,
    term_len: u16,
}

/// Fixed-capacity set of stems seen in the document being processed.
///
/// The set never grows. Past 80% load it stops recording and answers "not
/// seen" for new stems, which can let a duplicate (stem, doc) reach the term
/// table; the table's tail check and the merge union both absorb that, so
/// saturation degrades work, not correctness.
pub struct DocTermSet {
    slots: Vec<SetSlot>,
    used: usize,
    arena: Arena,
}

impl DocTermSet {
    /// `capacity` must be a power of two.
    pub fn with_capacity(capacity: usize, arena_bytes: usize) -> Self {
        assert!(capacity.is_power_of_two());
        Self {
            slots: vec![SetSlot::default(); capacity],
            used: 0,
            arena: Arena::with_capacity(arena_bytes),
        }
    }

    /// Returns true when `stem` was already recorded for this document.
    /// Adds it otherwise. At saturation nothing is added and new stems
    /// report false.
    pub fn contains_or_add(&mut self, stem: &[u8]) -> bool {
        if stem.is_empty() {
            return true;
        }
        if self.used * 10 >= self.slots.len() * 8 {
            return false;
        }

        let h = fnv1a_64(stem);
        let mask = self.slots.len() - 1;
        let mut pos = h as usize & mask;
        loop {
            let slot = &self.slots[pos];
            if slot.hash == 0 {
                break;
            }
            if slot.hash == h
                && slot.term_len as usize == stem.len()
                && self.arena.get(slot.term_off, stem.len()) == stem
            {
                return true;
            }
            pos = (pos + 1) & mask;
        }

        let term_off = self.arena.add(stem);
        let slot = &mut self.slots[pos];
        slot.hash = h;
        slot.term_off = term_off;
        slot.term_len = stem.len() as u16;
        self.used += 1;
        false
    }

    /// Forget everything between documents.
    pub fn reset(&mut self) {
        self.slots.fill(SetSlot::default());
        self.used = 0;
        self.arena.reset();
    }
}
