/// Storage unit of every bitset in the crate.
pub type Block = u64;

pub const BLOCK_BITS: usize = 64;
pub const FULL_BLOCK: Block = Block::MAX;

/// Number of blocks needed to hold `num_bits` bits.
pub fn num_blocks(num_bits: usize) -> usize {
    num_bits.div_ceil(BLOCK_BITS)
}
