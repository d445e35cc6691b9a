//! Cache block (one replacement-policy slot).

use crate::common::constants::INVALID_RANK;

/// Replacement state of one cache line slot.
///
/// Blocks are created invalid and are only ever overwritten in place. The tag is
/// meaningless while the block is invalid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub(super) tag: u32,
    pub(super) valid: bool,
    /// Recency position within the set: `associativity - 1` is most recent,
    /// `0` is the eviction candidate. Negative only while invalid.
    pub(super) rank: i64,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            tag: 0,
            valid: false,
            rank: INVALID_RANK,
        }
    }
}

impl Block {
    /// Tag currently held by this slot.
    pub const fn tag(&self) -> u32 {
        self.tag
    }

    /// Whether the slot holds a live line.
    pub const fn is_valid(&self) -> bool {
        self.valid
    }

    /// Recency rank; higher means more recently used.
    pub const fn rank(&self) -> i64 {
        self.rank
    }

    /// Whether this slot is live and holds `tag`.
    #[inline(always)]
    pub(super) const fn holds(&self, tag: u32) -> bool {
        self.valid && self.tag == tag
    }

    /// Overwrites the slot with a new line ranked `rank`.
    #[inline(always)]
    pub(super) const fn fill(&mut self, tag: u32, rank: i64) {
        self.tag = tag;
        self.valid = true;
        self.rank = rank;
    }
}
