//! Rank-based Least Recently Used (LRU) bookkeeping.
//!
//! Every block of a set carries an integer rank instead of living in an explicit
//! recency list. Once a set is full its valid ranks are a permutation of
//! `0..associativity`: `associativity - 1` is the most recently used line and `0`
//! the victim. While a set is filling, valid ranks occupy the contiguous top of that
//! range and invalid blocks sit below zero.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per access for both promotion and ageing, W = ways.
//! - **Space Complexity:** One `i64` per block, no per-set list.
//! - **Best Case:** Small associativities, where the scan stays in one cache line.
//! - **Worst Case:** Highly associative sets, where a move-to-front list would win.

use super::block::Block;

/// Where a missing tag was placed within its set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Placement {
    /// Way that received the tag.
    pub way: usize,
    /// Tag that was overwritten, if a valid line was evicted.
    pub evicted: Option<u32>,
}

/// Rank given to a freshly placed block before the set is aged.
#[inline(always)]
pub(super) const fn insertion_rank(associativity: usize) -> i64 {
    associativity as i64
}

/// Hit-path update: closes the gap left by the hit block and promotes it to
/// most recently used.
///
/// Blocks ranked strictly above the hit block move down by one; blocks below it
/// are untouched.
pub(super) fn promote(set: &mut [Block], way: usize) {
    let top = insertion_rank(set.len()) - 1;
    let current = set[way].rank;
    for block in set.iter_mut() {
        if block.rank > current {
            block.rank -= 1;
        }
    }
    set[way].rank = top;
}

/// Miss-path update: ages every block in the set by one step, valid or not.
pub(super) fn age(set: &mut [Block]) {
    for block in set.iter_mut() {
        block.rank -= 1;
    }
}

/// Places `tag` in the set, preferring an invalid slot over evicting rank 0.
///
/// The placed block gets rank `associativity`; the caller ages the set
/// afterwards so it settles at `associativity - 1`.
///
/// Returns `None` only if the set is full and no block holds rank 0, which means
/// the rank permutation has been corrupted.
pub(super) fn place(set: &mut [Block], tag: u32) -> Option<Placement> {
    let rank = insertion_rank(set.len());

    if let Some(way) = set.iter().position(|b| !b.valid) {
        set[way].fill(tag, rank);
        return Some(Placement { way, evicted: None });
    }

    let way = set.iter().position(|b| b.rank == 0)?;
    let evicted = set[way].tag;
    set[way].fill(tag, rank);
    Some(Placement {
        way,
        evicted: Some(evicted),
    })
}

/// Whether the valid ranks of `set` occupy exactly the top
/// `valid_count` positions of `0..associativity`, each once.
pub(super) fn ranks_are_contiguous(set: &[Block]) -> bool {
    let ways = set.len() as i64;
    let mut seen = vec![false; set.len()];
    let mut valid = 0i64;
    for block in set.iter().filter(|b| b.valid) {
        valid += 1;
        let Ok(slot) = usize::try_from(block.rank) else {
            return false;
        };
        if slot >= set.len() || seen[slot] {
            return false;
        }
        seen[slot] = true;
    }
    (ways - valid..ways).all(|r| seen[r as usize])
}
