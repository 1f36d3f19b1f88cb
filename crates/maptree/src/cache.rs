use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::conf::Block;
use crate::subproblem::Subproblem;

/// Number of 64-bit fingerprint values in a cache key.
pub const NUM_HASH_VALUES: usize = 2;

const BLOCK_MULT_BASE: [Block; NUM_HASH_VALUES] = [377424577268497867, 285989758769553131];
const DEPTH_MULT: Block = 234902547182092241;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CacheKey {
    hashed_bitset: [Block; NUM_HASH_VALUES],
    depth: usize,
}

impl Hash for CacheKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut hash = (self.depth as Block).wrapping_mul(DEPTH_MULT);
        for value in self.hashed_bitset {
            hash ^= value;
        }
        state.write_u64(hash);
    }
}

/// Subproblem cache keyed by bitset fingerprints and depth.
///
/// A key is two weighted block sums of the subproblem's bitset (weights are
/// powers of fixed 64-bit bases, in wrapping arithmetic) plus its depth. The
/// cache is approximate: two distinct subproblems whose 128-bit fingerprints
/// collide at equal depth alias to one entry. With the number of lookups a
/// search performs this is vanishingly unlikely, and accepting it buys graph
/// sharing; do not use this cache where exact identity is required.
pub struct ApproxBitsetCache<V> {
    entries: HashMap<CacheKey, V>,
    block_mults: [Vec<Block>; NUM_HASH_VALUES],
}

impl<V: Copy> ApproxBitsetCache<V> {
    pub fn new(num_blocks: usize) -> Self {
        let block_mults = BLOCK_MULT_BASE.map(|base| {
            let mut mults = Vec::with_capacity(num_blocks);
            let mut mult = base;
            for _ in 0..num_blocks {
                mults.push(mult);
                mult = mult.wrapping_mul(base);
            }
            mults
        });
        Self {
            entries: HashMap::new(),
            block_mults,
        }
    }

    /// Stores `value` for the subproblem, overwriting any previous entry
    /// under the same key.
    pub fn put(&mut self, subproblem: &Subproblem<'_>, value: V) {
        let key = self.construct_key(subproblem);
        self.entries.insert(key, value);
    }

    pub fn get(&self, subproblem: &Subproblem<'_>) -> Option<V> {
        self.entries.get(&self.construct_key(subproblem)).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn construct_key(&self, subproblem: &Subproblem<'_>) -> CacheKey {
        let mut hashed_bitset = [0; NUM_HASH_VALUES];
        for (hash, mults) in hashed_bitset.iter_mut().zip(&self.block_mults) {
            *hash = subproblem.bitset().sum_of_blocks(mults);
        }
        CacheKey {
            hashed_bitset,
            depth: subproblem.depth(),
        }
    }
}
