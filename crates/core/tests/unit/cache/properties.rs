//! Cache Property Tests.
//!
//! Random access sequences against small geometries, checking counter
//! conservation and agreement with a move-to-front LRU oracle.

use cachesim_core::cache::Cache;
use cachesim_core::common::Address;
use proptest::prelude::*;

use crate::common::ReferenceLru;

/// Small geometries so random traces revisit sets often.
fn geometry() -> impl Strategy<Value = (usize, usize, usize)> {
    prop_oneof![
        Just((64, 4, 1)),
        Just((64, 4, 2)),
        Just((64, 4, 4)),
        Just((256, 8, 8)),
        Just((128, 16, 8)),
        Just((1024, 4, 16)),
    ]
}

/// Addresses drawn from a narrow window to force conflicts and reuse.
fn trace(max_len: usize) -> impl Strategy<Value = Vec<Address>> {
    prop::collection::vec((0u32..2048).prop_map(Address::new), 0..max_len)
}

proptest! {
    #[test]
    fn hits_plus_misses_equals_accesses((size, block, assoc) in geometry(), addrs in trace(400)) {
        let mut cache = Cache::new(size, block, assoc).unwrap();
        for &addr in &addrs {
            let _ = cache.access(addr);
        }
        prop_assert_eq!(cache.hit_count() + cache.miss_count(), addrs.len() as u64);
    }

    #[test]
    fn cold_miss_then_hit((size, block, assoc) in geometry(), raw in any::<u32>()) {
        let mut cache = Cache::new(size, block, assoc).unwrap();
        let addr = Address::new(raw);
        prop_assert!(!cache.access(addr).is_hit());
        prop_assert!(cache.access(addr).is_hit());
        prop_assert_eq!((cache.hit_count(), cache.miss_count()), (1, 1));
    }

    #[test]
    fn counters_only_grow_by_one((size, block, assoc) in geometry(), addrs in trace(200)) {
        let mut cache = Cache::new(size, block, assoc).unwrap();
        for &addr in &addrs {
            let before = cache.stats();
            let hit = cache.access(addr).is_hit();
            let after = cache.stats();
            prop_assert_eq!(after.hits, before.hits + u64::from(hit));
            prop_assert_eq!(after.misses, before.misses + u64::from(!hit));
        }
    }

    #[test]
    fn matches_move_to_front_lru((size, block, assoc) in geometry(), addrs in trace(400)) {
        let mut cache = Cache::new(size, block, assoc).unwrap();
        let mut oracle = ReferenceLru::new(*cache.geometry());
        for &addr in &addrs {
            let expected = oracle.access(addr);
            prop_assert_eq!(cache.access(addr).is_hit(), expected, "address {}", addr);
        }
        for index in 0..cache.geometry().num_sets() {
            let mut resident: Vec<u32> = cache
                .set(index)
                .iter()
                .filter(|b| b.is_valid())
                .map(|b| b.tag())
                .collect();
            let mut expected = oracle.resident(index);
            resident.sort_unstable();
            expected.sort_unstable();
            prop_assert_eq!(resident, expected);
        }
    }

    #[test]
    fn ranks_stay_contiguous((size, block, assoc) in geometry(), addrs in trace(300)) {
        let mut cache = Cache::new(size, block, assoc).unwrap();
        for &addr in &addrs {
            let _ = cache.access(addr);
            prop_assert!(cache.ranks_consistent());
        }
    }

    #[test]
    fn accessed_address_is_resident((size, block, assoc) in geometry(), addrs in trace(200)) {
        let mut cache = Cache::new(size, block, assoc).unwrap();
        for &addr in &addrs {
            let _ = cache.access(addr);
            prop_assert!(cache.contains(addr));
        }
    }
}
