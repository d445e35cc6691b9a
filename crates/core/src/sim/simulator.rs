//! Single-configuration replay.

use crate::cache::Cache;
use crate::common::addr::Address;
use crate::common::error::ConfigError;
use crate::config::CacheConfig;
use crate::stats::CacheStats;

/// Feeds every address of `trace`, in order, to `cache`.
///
/// The cache keeps any state it already had; counters accumulate.
pub fn replay(cache: &mut Cache, trace: &[Address]) -> CacheStats {
    for &addr in trace {
        let _ = cache.access(addr);
    }
    cache.stats()
}

/// Builds a fresh cache for `config` and replays `trace` through it.
///
/// # Errors
///
/// Returns a `ConfigError` if the configuration is rejected; no address is
/// processed in that case.
pub fn simulate(config: &CacheConfig, trace: &[Address]) -> Result<CacheStats, ConfigError> {
    let mut cache = Cache::from_config(config)?;
    let stats = replay(&mut cache, trace);
    tracing::info!(
        size = config.size_bytes,
        block = config.block_bytes,
        ways = config.associativity,
        hits = stats.hits,
        misses = stats.misses,
        "run complete"
    );
    Ok(stats)
}
