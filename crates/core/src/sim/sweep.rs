//! Parameter sweeps.
//!
//! A sweep varies one field of a base `CacheConfig` over a list of values and
//! replays the same trace against a fresh cache for each value.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::simulator::replay;
use crate::cache::Cache;
use crate::common::addr::Address;
use crate::common::constants::KIB;
use crate::common::error::ConfigError;
use crate::config::{CacheConfig, SweepConfig};
use crate::stats::CacheStats;

/// Configuration field varied by a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepParameter {
    /// Total capacity; block size and associativity held.
    CacheSize,
    /// Block size; capacity and associativity held.
    BlockSize,
    /// Ways per set; capacity and block size held.
    Associativity,
}

impl SweepParameter {
    /// All sweepable parameters, in experiment order.
    pub const ALL: [Self; 3] = [Self::CacheSize, Self::BlockSize, Self::Associativity];

    /// Column heading for the varied value.
    pub const fn label(self) -> &'static str {
        match self {
            Self::CacheSize => "Cache Size (in kb)",
            Self::BlockSize => "Block Size",
            Self::Associativity => "Associativity",
        }
    }

    /// File name of the exported report for this sweep.
    pub const fn export_file_name(self) -> &'static str {
        match self {
            Self::CacheSize => "Changing_CacheSize.json",
            Self::BlockSize => "Changing_BlockSize.json",
            Self::Associativity => "Changing_Associativity.json",
        }
    }

    /// Returns `base` with this parameter set to `value`.
    pub const fn apply(self, base: &CacheConfig, value: usize) -> CacheConfig {
        let mut config = *base;
        match self {
            Self::CacheSize => config.size_bytes = value,
            Self::BlockSize => config.block_bytes = value,
            Self::Associativity => config.associativity = value,
        }
        config
    }

    /// The value as presented in tables: cache sizes in KiB, others unchanged.
    pub const fn display_value(self, value: usize) -> usize {
        match self {
            Self::CacheSize => value / KIB,
            Self::BlockSize | Self::Associativity => value,
        }
    }

    /// The configured values for this sweep.
    pub fn values(self, sweep: &SweepConfig) -> &[usize] {
        match self {
            Self::CacheSize => &sweep.cache_sizes,
            Self::BlockSize => &sweep.block_sizes,
            Self::Associativity => &sweep.associativities,
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CacheSize => "cache-size",
            Self::BlockSize => "block-size",
            Self::Associativity => "associativity",
        })
    }
}

/// Outcome of one configuration within a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Raw value of the varied parameter (bytes or ways).
    pub value: usize,
    /// Hit count.
    pub hits: u64,
    /// Miss count.
    pub misses: u64,
    /// Hit rate in percent; `None` for an empty trace.
    pub hit_rate: Option<f64>,
    /// Miss rate in percent; `None` for an empty trace.
    pub miss_rate: Option<f64>,
}

impl SweepPoint {
    /// Builds a point from the varied value and the run's counters.
    pub fn new(value: usize, stats: CacheStats) -> Self {
        Self {
            value,
            hits: stats.hits,
            misses: stats.misses,
            hit_rate: stats.hit_percent(),
            miss_rate: stats.miss_percent(),
        }
    }

    /// Counters of this point.
    pub const fn stats(&self) -> CacheStats {
        CacheStats::new(self.hits, self.misses)
    }
}

/// Replays `trace` once per value, each time on a fresh cache whose `parameter`
/// is set to that value and whose other fields come from `base`.
///
/// Every configuration is validated before the first replay starts.
///
/// # Errors
///
/// Returns the `ConfigError` of the first value that yields an invalid geometry.
pub fn run_sweep(
    parameter: SweepParameter,
    values: &[usize],
    base: &CacheConfig,
    trace: &[Address],
) -> Result<Vec<SweepPoint>, ConfigError> {
    let geometries = values
        .iter()
        .map(|&value| parameter.apply(base, value).geometry())
        .collect::<Result<Vec<_>, _>>()?;

    let points = values
        .iter()
        .zip(geometries)
        .map(|(&value, geometry)| {
            let mut cache = Cache::with_geometry(geometry);
            let stats = replay(&mut cache, trace);
            tracing::info!(
                %parameter,
                value,
                hits = stats.hits,
                misses = stats.misses,
                "sweep point"
            );
            SweepPoint::new(value, stats)
        })
        .collect();
    Ok(points)
}
