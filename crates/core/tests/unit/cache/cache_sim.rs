//! Cache Engine Unit Tests.
//!
//! Verifies the set-associative cache through its public entry points: cold
//! misses, warm hits, filling before evicting, LRU victim choice, set isolation,
//! and counter behaviour.
//!
//! Addresses are built from explicit (tag, set) pairs so each scenario states
//! which set it lands in.

use cachesim_core::cache::{AccessOutcome, Cache};
use cachesim_core::common::Address;
use cachesim_core::config::CacheConfig;
use pretty_assertions::assert_eq;

use crate::common::{address, init_tracing};

use AccessOutcome::{Hit, Miss};

/// 256 bytes, 4-byte blocks, 2-way: 32 sets.
fn two_way() -> Cache {
    Cache::new(256, 4, 2).unwrap()
}

/// 256 bytes, 4-byte blocks, 4-way: 16 sets.
fn four_way() -> Cache {
    Cache::new(256, 4, 4).unwrap()
}

fn tags_in_set(cache: &Cache, index: usize) -> Vec<u32> {
    let mut tags: Vec<u32> = cache
        .set(index)
        .iter()
        .filter(|b| b.is_valid())
        .map(|b| b.tag())
        .collect();
    tags.sort_unstable();
    tags
}

// ══════════════════════════════════════════════════════════
// 1. Construction
// ══════════════════════════════════════════════════════════

#[test]
fn new_cache_is_empty() {
    let cache = four_way();
    assert_eq!(cache.hit_count(), 0);
    assert_eq!(cache.miss_count(), 0);
    for index in 0..cache.geometry().num_sets() {
        assert!(cache.set(index).iter().all(|b| !b.is_valid()));
        assert_eq!(cache.set(index).len(), 4);
    }
}

#[test]
fn from_config_matches_new() {
    let cache = Cache::from_config(&CacheConfig::new(256, 4, 2)).unwrap();
    assert_eq!(cache.geometry(), two_way().geometry());
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    assert!(Cache::new(256, 4, 3).is_err());
    assert!(Cache::from_config(&CacheConfig::new(100, 4, 1)).is_err());
}

// ══════════════════════════════════════════════════════════
// 2. Cold Miss, Warm Hit
// ══════════════════════════════════════════════════════════

/// 1 MiB, 4-byte blocks, 4-way: the same address twice is one miss then one hit.
#[test]
fn same_address_twice_misses_then_hits() {
    init_tracing();
    let mut cache = Cache::new(1024 * 1024, 4, 4).unwrap();
    let g = cache.geometry();
    assert_eq!(
        (g.num_sets(), g.offset_bits(), g.index_bits(), g.tag_bits()),
        (65536, 2, 16, 14)
    );

    let addr = Address::new(0x1fff_ff50);
    assert_eq!(cache.access(addr), Miss);
    assert_eq!(cache.access(addr), Hit);
    assert_eq!((cache.miss_count(), cache.hit_count()), (1, 1));
}

#[test]
fn different_offset_in_same_block_hits() {
    let mut cache = Cache::new(4096, 64, 2).unwrap();
    assert_eq!(cache.access(Address::new(0x1000)), Miss);
    assert_eq!(cache.access(Address::new(0x1000 + 32)), Hit);
    assert_eq!(cache.access(Address::new(0x1000 + 63)), Hit);
    assert_eq!(cache.access(Address::new(0x1000 + 64)), Miss);
}

#[test]
fn repeated_hits_stay_hits() {
    let mut cache = two_way();
    let a = address(cache.geometry(), 5, 3);
    assert_eq!(cache.access(a), Miss);
    for _ in 0..10 {
        assert_eq!(cache.access(a), Hit);
    }
    assert_eq!((cache.hit_count(), cache.miss_count()), (10, 1));
}

// ══════════════════════════════════════════════════════════
// 3. Filling Before Evicting
// ══════════════════════════════════════════════════════════

/// Fewer distinct tags than ways: every tag takes a fresh block, nothing leaves.
#[test]
fn partially_filled_set_never_evicts() {
    let mut cache = four_way();
    let g = *cache.geometry();

    for (n, tag) in [11u32, 22, 33].into_iter().enumerate() {
        assert_eq!(cache.access(address(&g, tag, 7)), Miss);
        let valid = cache.set(7).iter().filter(|b| b.is_valid()).count();
        assert_eq!(valid, n + 1);
    }
    assert_eq!(tags_in_set(&cache, 7), vec![11, 22, 33]);

    for tag in [11u32, 22, 33] {
        assert_eq!(cache.access(address(&g, tag, 7)), Hit);
    }
    assert!(cache.ranks_consistent());
}

/// The fourth tag of a 4-way set still fills the last invalid block.
#[test]
fn last_invalid_block_is_used_before_eviction() {
    let mut cache = four_way();
    let g = *cache.geometry();
    for tag in 1..=4 {
        assert_eq!(cache.access(address(&g, tag, 0)), Miss);
    }
    assert_eq!(tags_in_set(&cache, 0), vec![1, 2, 3, 4]);
}

// ══════════════════════════════════════════════════════════
// 4. LRU Victim Choice
// ══════════════════════════════════════════════════════════

/// Associativity 2: X, Y, X, Z evicts Y, not X.
#[test]
fn reaccessed_line_survives_two_way_eviction() {
    let mut cache = two_way();
    let g = *cache.geometry();
    let (x, y, z) = (address(&g, 1, 4), address(&g, 2, 4), address(&g, 3, 4));

    assert_eq!(cache.access(x), Miss);
    assert_eq!(cache.access(y), Miss);
    assert_eq!(cache.access(x), Hit);
    assert_eq!(cache.access(z), Miss);

    assert_eq!(tags_in_set(&cache, 4), vec![1, 3]);
    assert!(cache.contains(x));
    assert!(!cache.contains(y));
    assert_eq!(cache.access(x), Hit);
    assert_eq!(cache.access(y), Miss);
}

/// Associativity A: A distinct tags, re-access the first, insert one more.
/// The second tag is now LRU and is the one evicted.
#[test]
fn full_sequence_evicts_second_tag() {
    let mut cache = four_way();
    let g = *cache.geometry();
    let tags: Vec<Address> = (10..14).map(|t| address(&g, t, 9)).collect();

    for &a in &tags {
        assert_eq!(cache.access(a), Miss);
    }
    assert_eq!(cache.access(tags[0]), Hit);
    assert_eq!(cache.access(address(&g, 99, 9)), Miss);

    assert!(cache.contains(tags[0]));
    assert!(!cache.contains(tags[1]));
    assert!(cache.contains(tags[2]));
    assert!(cache.contains(tags[3]));
    assert_eq!(tags_in_set(&cache, 9), vec![10, 12, 13, 99]);
}

/// Evictions proceed in recency order when nothing is re-accessed.
#[test]
fn evictions_follow_insertion_order_without_hits() {
    let mut cache = four_way();
    let g = *cache.geometry();
    for tag in 0..4 {
        let _ = cache.access(address(&g, tag, 2));
    }
    for (victim, newcomer) in (0..4).zip(4..8) {
        let _ = cache.access(address(&g, newcomer, 2));
        assert!(!cache.contains(address(&g, victim, 2)));
        assert!(cache.contains(address(&g, newcomer, 2)));
    }
}

/// A+1 tags cycled through one set never hit under LRU.
#[test]
fn cyclic_pattern_larger_than_set_thrashes() {
    let mut cache = two_way();
    let g = *cache.geometry();
    let cycle: Vec<Address> = (0..3).map(|t| address(&g, t, 0)).collect();
    for _ in 0..5 {
        for &a in &cycle {
            assert_eq!(cache.access(a), Miss);
        }
    }
    assert_eq!(cache.hit_count(), 0);
    assert_eq!(cache.miss_count(), 15);
}

#[test]
fn direct_mapped_conflicts_replace_each_other() {
    let mut cache = Cache::new(64, 4, 1).unwrap();
    let g = *cache.geometry();
    let (a, b) = (address(&g, 1, 3), address(&g, 2, 3));
    assert_eq!(cache.access(a), Miss);
    assert_eq!(cache.access(b), Miss);
    assert_eq!(cache.access(a), Miss);
    assert_eq!(cache.access(a), Hit);
}

/// Hitting the most recent line leaves the other ranks untouched.
#[test]
fn hit_on_most_recent_line_keeps_order() {
    let mut cache = four_way();
    let g = *cache.geometry();
    for tag in 0..4 {
        let _ = cache.access(address(&g, tag, 1));
    }
    let before: Vec<i64> = cache.set(1).iter().map(|b| b.rank()).collect();
    assert_eq!(cache.access(address(&g, 3, 1)), Hit);
    let after: Vec<i64> = cache.set(1).iter().map(|b| b.rank()).collect();
    assert_eq!(before, after);
    assert_eq!(after, vec![0, 1, 2, 3]);
}

// ══════════════════════════════════════════════════════════
// 5. Set Isolation
// ══════════════════════════════════════════════════════════

#[test]
fn traffic_in_one_set_does_not_disturb_another() {
    let mut cache = two_way();
    let g = *cache.geometry();
    let resident = [address(&g, 1, 0), address(&g, 2, 0)];
    for &a in &resident {
        let _ = cache.access(a);
    }
    let snapshot = cache.set(0).to_vec();

    for tag in 0..50 {
        let _ = cache.access(address(&g, tag, 1));
    }
    assert_eq!(cache.set(0), snapshot.as_slice());
    for &a in &resident {
        assert_eq!(cache.access(a), Hit);
    }
}

// ══════════════════════════════════════════════════════════
// 6. Counters
// ══════════════════════════════════════════════════════════

#[test]
fn counters_are_idempotent_between_accesses() {
    let mut cache = two_way();
    let _ = cache.access(Address::new(0));
    let _ = cache.access(Address::new(0));
    let first = (cache.hit_count(), cache.miss_count());
    for _ in 0..3 {
        assert_eq!((cache.hit_count(), cache.miss_count()), first);
    }
    assert_eq!(cache.stats().hits, first.0);
    assert_eq!(cache.stats().misses, first.1);
}

#[test]
fn contains_does_not_touch_counters_or_ranks() {
    let mut cache = two_way();
    let g = *cache.geometry();
    let a = address(&g, 7, 5);
    let _ = cache.access(a);
    let ranks: Vec<i64> = cache.set(5).iter().map(|b| b.rank()).collect();

    assert!(cache.contains(a));
    assert!(!cache.contains(address(&g, 8, 5)));
    assert_eq!(cache.stats().accesses(), 1);
    let after: Vec<i64> = cache.set(5).iter().map(|b| b.rank()).collect();
    assert_eq!(ranks, after);
}

#[test]
fn access_outcome_converts_to_bool() {
    assert!(bool::from(Hit));
    assert!(!bool::from(Miss));
    assert!(Hit.is_hit());
}
