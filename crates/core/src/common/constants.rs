//! Global simulator constants.

/// Width of every simulated memory address in bits.
///
/// Tag, index, and offset widths of a geometry always sum to this value.
pub const ADDRESS_WIDTH: u32 = 32;

/// Number of bytes in one KiB, used when presenting cache sizes.
pub const KIB: usize = 1024;

/// Rank held by blocks that have never been populated.
///
/// Invalid blocks are aged on every miss like valid ones, so their rank only
/// moves further below zero and never collides with a live LRU position.
pub const INVALID_RANK: i64 = -1;
