//! Set-Associative Cache Simulator.
//!
//! This module implements the structural cache model. It covers address
//! decomposition, set-associative lookup, rank-based LRU replacement, and hit/miss
//! accounting. Data content, write policy, and latency are not modelled: an access
//! is classified as a hit or a miss and nothing else.

/// Cache block (replacement slot) state.
pub mod block;
/// Validated geometry and address decomposition.
pub mod geometry;
/// Rank-based LRU bookkeeping.
mod lru;

pub use self::block::Block;
pub use self::geometry::CacheGeometry;

use crate::common::addr::Address;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Classification of one access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessOutcome {
    /// The tag was found among the valid blocks of its set.
    Hit,
    /// The tag was absent and has now been placed in its set.
    Miss,
}

impl AccessOutcome {
    /// Returns `true` for `Hit`.
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

impl From<AccessOutcome> for bool {
    fn from(outcome: AccessOutcome) -> Self {
        outcome.is_hit()
    }
}

/// Set-associative cache with LRU replacement.
///
/// Owns `num_sets * associativity` blocks, stored set after set, plus two
/// monotonically increasing counters. One instance is driven by one sequential
/// access stream; LRU state depends on the full order of prior accesses.
#[derive(Clone, Debug)]
pub struct Cache {
    geometry: CacheGeometry,
    blocks: Vec<Block>,
    hits: u64,
    misses: u64,
}

impl Cache {
    /// Creates an empty cache.
    ///
    /// Every block starts invalid with a zero tag; both counters start at zero.
    ///
    /// # Arguments
    ///
    /// * `cache_size_bytes` - Total capacity in bytes (power of two).
    /// * `block_size_bytes` - Block size in bytes (power of two).
    /// * `associativity` - Blocks per set (power of two, at most
    ///   `cache_size_bytes / block_size_bytes`).
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the geometry is rejected; see `CacheGeometry::new`.
    pub fn new(
        cache_size_bytes: usize,
        block_size_bytes: usize,
        associativity: usize,
    ) -> Result<Self, ConfigError> {
        let geometry = CacheGeometry::new(cache_size_bytes, block_size_bytes, associativity)?;
        Ok(Self::with_geometry(geometry))
    }

    /// Creates an empty cache from a configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration is rejected.
    pub fn from_config(config: &CacheConfig) -> Result<Self, ConfigError> {
        config.geometry().map(Self::with_geometry)
    }

    /// Creates an empty cache from an already validated geometry.
    pub fn with_geometry(geometry: CacheGeometry) -> Self {
        tracing::debug!(
            size = geometry.cache_size_bytes(),
            block = geometry.block_size_bytes(),
            ways = geometry.associativity(),
            sets = geometry.num_sets(),
            tag_bits = geometry.tag_bits(),
            index_bits = geometry.index_bits(),
            offset_bits = geometry.offset_bits(),
            "cache created"
        );
        Self {
            blocks: vec![Block::default(); geometry.num_sets() * geometry.associativity()],
            geometry,
            hits: 0,
            misses: 0,
        }
    }

    /// Accesses the cache for the specified address.
    ///
    /// On a hit the matching block is promoted to most recently used. On a miss
    /// the tag is placed in an invalid block if the set has one, otherwise it
    /// replaces the least recently used block; the whole set is then aged by one
    /// step. Exactly one counter is incremented.
    ///
    /// # Arguments
    ///
    /// * `addr` - The 32-bit address to look up.
    ///
    /// # Returns
    ///
    /// `AccessOutcome::Hit` or `AccessOutcome::Miss`.
    ///
    /// # Panics
    ///
    /// Panics if a full set has no block of rank 0. That can only happen if the
    /// rank permutation of the set was corrupted, which the update rules never do.
    pub fn access(&mut self, addr: Address) -> AccessOutcome {
        let fields = self.geometry.decompose(addr);
        let index = fields.index;
        let set = self.set_mut(index);

        if let Some(way) = set.iter().position(|b| b.holds(fields.tag)) {
            lru::promote(set, way);
            self.hits += 1;
            return AccessOutcome::Hit;
        }

        let Some(placement) = lru::place(set, fields.tag) else {
            panic!("set {index} is full but holds no LRU victim: {set:?}");
        };
        lru::age(set);
        if let Some(evicted) = placement.evicted {
            tracing::trace!(
                set = index,
                way = placement.way,
                evicted,
                tag = fields.tag,
                "evict"
            );
        }
        self.misses += 1;
        AccessOutcome::Miss
    }

    /// Returns whether the address is resident, without touching LRU state or counters.
    pub fn contains(&self, addr: Address) -> bool {
        let fields = self.geometry.decompose(addr);
        self.set(fields.index).iter().any(|b| b.holds(fields.tag))
    }

    /// Number of hits since construction.
    pub const fn hit_count(&self) -> u64 {
        self.hits
    }

    /// Number of misses since construction.
    pub const fn miss_count(&self) -> u64 {
        self.misses
    }

    /// Snapshot of both counters.
    pub const fn stats(&self) -> CacheStats {
        CacheStats::new(self.hits, self.misses)
    }

    /// The validated geometry this cache was built with.
    pub const fn geometry(&self) -> &CacheGeometry {
        &self.geometry
    }

    /// Blocks of one set, in way order.
    ///
    /// # Panics
    ///
    /// Panics if `index >= num_sets`.
    pub fn set(&self, index: usize) -> &[Block] {
        let ways = self.geometry.associativity();
        &self.blocks[index * ways..(index + 1) * ways]
    }

    fn set_mut(&mut self, index: usize) -> &mut [Block] {
        let ways = self.geometry.associativity();
        &mut self.blocks[index * ways..(index + 1) * ways]
    }

    /// Checks that every set's valid ranks form a contiguous top-aligned
    /// permutation, the condition under which rank 0 is the true LRU victim.
    ///
    /// Intended for tests and debugging; it walks every block.
    pub fn ranks_consistent(&self) -> bool {
        self.blocks
            .chunks_exact(self.geometry.associativity())
            .all(lru::ranks_are_contiguous)
    }
}
