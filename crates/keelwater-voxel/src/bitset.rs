//! Word-packed boolean set for per-voxel classification layers.
//!
//! Bits are packed 64 to a `u64` word, bit `i` living in word `i / 64` at
//! offset `i % 64`. Besides O(1) get/set, the set supports "next set index"
//! queries that skip whole zero words, so walking a sparse layer costs time
//! proportional to the number of set bits plus `len / 64`.

use serde::{Deserialize, Serialize};

const WORD_BITS: usize = 64;

/// A fixed-length set of bits stored in `u64` words.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BitSet {
    /// Raw storage. Bits past `len` in the last word are always zero.
    words: Vec<u64>,
    /// Total number of logical bits.
    len: usize,
}

impl BitSet {
    /// Creates a set of `len` bits, all cleared.
    pub fn new(len: usize) -> Self {
        Self {
            words: vec![0u64; len.div_ceil(WORD_BITS)],
            len,
        }
    }

    /// Creates a set of `len` bits with the given indices set.
    ///
    /// Indices `>= len` are ignored.
    pub fn from_indices(len: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(len);
        for i in indices {
            if i < len {
                set.insert(i);
            }
        }
        set
    }

    /// Returns the bit at `index`. Out-of-range indices read as `false`.
    pub fn contains(&self, index: usize) -> bool {
        if index >= self.len {
            return false;
        }
        (self.words[index / WORD_BITS] >> (index % WORD_BITS)) & 1 != 0
    }

    /// Sets the bit at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len` in debug builds; ignored in release.
    pub fn insert(&mut self, index: usize) {
        debug_assert!(index < self.len, "index out of bounds");
        if index < self.len {
            self.words[index / WORD_BITS] |= 1u64 << (index % WORD_BITS);
        }
    }

    /// Clears every bit, keeping the length.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Returns the smallest set index `>= from`, or `None`.
    pub fn next_set_bit(&self, from: usize) -> Option<usize> {
        if from >= self.len {
            return None;
        }
        let mut word_index = from / WORD_BITS;
        let mut word = self.words[word_index] & (u64::MAX << (from % WORD_BITS));
        loop {
            if word != 0 {
                let index = word_index * WORD_BITS + word.trailing_zeros() as usize;
                return (index < self.len).then_some(index);
            }
            word_index += 1;
            if word_index >= self.words.len() {
                return None;
            }
            word = self.words[word_index];
        }
    }

    /// Iterates set indices in ascending order.
    pub fn ones(&self) -> Ones<'_> {
        Ones {
            set: self,
            next: 0,
        }
    }

    /// Returns the number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns the number of logical bits.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the set has no bits at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Ascending iterator over the set indices of a [`BitSet`].
pub struct Ones<'a> {
    set: &'a BitSet,
    next: usize,
}

impl Iterator for Ones<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.set.next_set_bit(self.next)?;
        self.next = index + 1;
        Some(index)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
