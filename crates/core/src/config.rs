//! Configuration system for the cache simulator.
//!
//! This module defines all configuration structures used to parameterize
//! experiments. It provides:
//! 1. **Defaults:** The fixed experiment geometry and the sweep ranges.
//! 2. **Structures:** Cache geometry, sweep ranges, and the list of trace files.
//! 3. **Loading:** JSON deserialization where every field falls back to its default.
//!
//! Validation happens when a `CacheConfig` is turned into a `CacheGeometry`, so a
//! configuration file with an impossible geometry loads fine and is rejected only
//! when that geometry is actually simulated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::CacheGeometry;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache capacity (1 MiB).
    pub const CACHE_SIZE: usize = 1024 * 1024;

    /// Default block size in bytes.
    pub const BLOCK_SIZE: usize = 4;

    /// Default associativity (4-way).
    pub const ASSOCIATIVITY: usize = 4;

    /// Cache-size sweep: 2^7 ..= 2^12 KiB (128 KiB to 4 MiB).
    pub const CACHE_SIZE_EXPONENTS: std::ops::RangeInclusive<u32> = 7..=12;

    /// Block-size sweep: 2^0 ..= 2^7 bytes.
    pub const BLOCK_SIZE_EXPONENTS: std::ops::RangeInclusive<u32> = 0..=7;

    /// Associativity sweep: 2^0 ..= 2^6 ways.
    pub const ASSOCIATIVITY_EXPONENTS: std::ops::RangeInclusive<u32> = 0..=6;

    /// Trace files replayed when none are given.
    pub const TRACE_FILES: &[&str] = &[
        "TraceFiles/gcc.trace",
        "TraceFiles/gzip.trace",
        "TraceFiles/mcf.trace",
        "TraceFiles/swim.trace",
        "TraceFiles/twolf.trace",
    ];
}

/// Root configuration structure containing all experiment settings.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.cache.size_bytes, 1024 * 1024);
/// assert_eq!(config.traces.len(), 5);
/// ```
///
/// Deserializing from JSON; omitted fields keep their defaults:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let json = r#"{
///     "cache": { "size_bytes": 65536, "associativity": 8 },
///     "sweep": { "block_sizes": [16, 32, 64] },
///     "traces": ["traces/ls.trace"]
/// }"#;
///
/// let config = Config::from_json_str(json).unwrap();
/// assert_eq!(config.cache.size_bytes, 65536);
/// assert_eq!(config.cache.block_bytes, 4);
/// assert_eq!(config.cache.associativity, 8);
/// assert_eq!(config.sweep.block_sizes, vec![16, 32, 64]);
/// assert_eq!(config.sweep.associativities.len(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Geometry for single runs and the base of every sweep.
    pub cache: CacheConfig,
    /// Values visited by each parameter sweep.
    pub sweep: SweepConfig,
    /// Trace files replayed by each experiment.
    pub traces: Vec<PathBuf>,
}

impl Config {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the document is malformed or names an
    /// unknown field.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read and
    /// `ConfigError::Parse` if its contents are not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }
}

/// Geometry of one simulated cache.
///
/// Plain values; call `geometry()` to validate and derive bit widths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CacheConfig {
    /// Total capacity in bytes.
    pub size_bytes: usize,
    /// Block (line) size in bytes.
    pub block_bytes: usize,
    /// Blocks per set; 1 is direct-mapped.
    pub associativity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            size_bytes: defaults::CACHE_SIZE,
            block_bytes: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
        }
    }
}

impl CacheConfig {
    /// Creates a configuration from its three parameters.
    pub const fn new(size_bytes: usize, block_bytes: usize, associativity: usize) -> Self {
        Self {
            size_bytes,
            block_bytes,
            associativity,
        }
    }

    /// Validates the configuration and derives its field widths.
    ///
    /// # Errors
    ///
    /// Returns the `ConfigError` describing the first violated constraint.
    pub fn geometry(&self) -> Result<CacheGeometry, ConfigError> {
        CacheGeometry::new(self.size_bytes, self.block_bytes, self.associativity)
    }
}

/// Values visited by the three parameter sweeps.
///
/// Each sweep varies one field of the base `CacheConfig` and keeps the other two.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// Cache capacities in bytes.
    pub cache_sizes: Vec<usize>,
    /// Block sizes in bytes.
    pub block_sizes: Vec<usize>,
    /// Associativities in ways.
    pub associativities: Vec<usize>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            cache_sizes: defaults::CACHE_SIZE_EXPONENTS
                .map(|e| 1024 * (1usize << e))
                .collect(),
            block_sizes: defaults::BLOCK_SIZE_EXPONENTS.map(|e| 1usize << e).collect(),
            associativities: defaults::ASSOCIATIVITY_EXPONENTS
                .map(|e| 1usize << e)
                .collect(),
        }
    }
}

/// Returns the trace files replayed when a configuration names none.
pub fn default_traces() -> Vec<PathBuf> {
    defaults::TRACE_FILES.iter().map(PathBuf::from).collect()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            sweep: SweepConfig::default(),
            traces: default_traces(),
        }
    }
}
