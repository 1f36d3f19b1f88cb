use std::fmt;

use crate::conf::{num_blocks, Block, BLOCK_BITS, FULL_BLOCK};
use crate::fixed_bitset::FixedBitset;
use crate::rnumber::RNumber;

/// Reversible sparse bitset.
///
/// The bitset holds one [`RNumber`] per 64-bit block plus an index
/// permutation whose first `limit` entries name the non-empty blocks.
/// Applying a mask with [`Bitset::intersect`] only touches blocks in that
/// prefix and swap-removes blocks it empties, so every operation costs time
/// proportional to the currently non-empty blocks rather than the total.
/// [`Bitset::reverse`] restores the previous state in the same time.
///
/// See <https://arxiv.org/abs/1604.06641>.
pub struct Bitset {
    level: usize,
    max_level: usize,
    blocks: Vec<RNumber>,
    indices: Vec<usize>,
    limit: RNumber,
}

impl Bitset {
    /// Creates an all-ones bitset over `num_bits` bits that supports up to
    /// `max_level` nested intersections.
    pub fn new(num_bits: usize, max_level: usize) -> Self {
        let num_blocks = num_blocks(num_bits);
        let mut blocks = vec![RNumber::new(max_level + 1, FULL_BLOCK); num_blocks];
        if num_bits % BLOCK_BITS != 0 {
            // mask the tail block down to the trailing partial width
            let last_block = (1 << (num_bits % BLOCK_BITS)) - 1;
            blocks[num_blocks - 1].set(last_block);
        }
        Self {
            level: 0,
            max_level,
            blocks,
            indices: (0..num_blocks).collect(),
            limit: RNumber::new(max_level + 1, num_blocks as Block),
        }
    }

    /// Number of masks currently applied.
    pub fn level(&self) -> usize {
        self.level
    }

    pub fn count(&self) -> u32 {
        self.active_blocks().map(RNumber::count_bits).sum()
    }

    pub fn count_intersection(&self, other: &FixedBitset) -> u32 {
        self.active_indices()
            .map(|idx| self.blocks[idx].count_bits_at_intersection(other.get_block(idx)))
            .sum()
    }

    pub fn is_subset(&self, other: &FixedBitset) -> bool {
        self.active_indices()
            .all(|idx| self.blocks[idx].is_subset(other.get_block(idx)))
    }

    /// Applies `other` as a mask. Reversible.
    pub fn intersect(&mut self, other: &FixedBitset) {
        debug_assert!(self.level < self.max_level);
        let mut limit = self.limit.get() as usize;
        for i in (0..limit).rev() {
            let idx = self.indices[i];
            self.blocks[idx].intersect(other.get_block(idx));
            if self.blocks[idx].is_empty() {
                limit -= 1;
                self.indices.swap(i, limit);
            }
        }
        self.limit.update(limit as Block);
        self.level += 1;
    }

    /// Undoes the last `intersect`.
    ///
    /// The limit is reversed first; the restored prefix then names every
    /// block the matching `intersect` advanced, including blocks it emptied
    /// and swapped out of view, so reversing exactly that prefix restores
    /// the full prior state.
    pub fn reverse(&mut self) {
        debug_assert!(self.level > 0);
        self.limit.reverse();
        for i in 0..self.limit.get() as usize {
            self.blocks[self.indices[i]].reverse();
        }
        self.level -= 1;
    }

    /// Rewinds to the initial all-ones state.
    pub fn reset(&mut self) {
        self.limit.reset();
        for block in &mut self.blocks {
            block.reset();
        }
        self.level = 0;
    }

    /// Weighted sum of the active blocks, in wrapping 64-bit arithmetic.
    /// Wrap-around is deliberate: the sum is a hash, not a quantity.
    pub fn sum_of_blocks(&self, block_weights: &[Block]) -> Block {
        self.active_indices().fold(0, |sum, idx| {
            sum.wrapping_add(self.blocks[idx].get().wrapping_mul(block_weights[idx]))
        })
    }

    fn active_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.indices[..self.limit.get() as usize].iter().copied()
    }

    fn active_blocks(&self) -> impl Iterator<Item = &RNumber> {
        self.active_indices().map(|idx| &self.blocks[idx])
    }
}

impl fmt::Debug for Bitset {
    /// Renders the active `(index: block)` prefix, e.g. `[ (0: 7) (2: 1) ]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ ")?;
        for idx in self.active_indices() {
            write!(f, "({}: {}) ", idx, self.blocks[idx].get())?;
        }
        write!(f, "]")
    }
}
