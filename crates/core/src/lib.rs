//! Trace-driven set-associative cache simulator library.
//!
//! This crate models the structural behaviour of a hardware cache against a stream
//! of 32-bit memory addresses. It provides:
//! 1. **Engine:** Address decomposition, set-associative lookup, rank-based LRU
//!    replacement, and hit/miss accounting (`cache`).
//! 2. **Configuration:** Validated cache geometry and JSON-loadable experiment settings.
//! 3. **Harness:** Trace decoding, single runs, and parameter sweeps (`sim`).
//! 4. **Reporting:** Statistics snapshots, grid tables, and JSON export.

/// Set-associative cache engine (cache, blocks, LRU bookkeeping).
pub mod cache;
/// Common types and constants (addresses, address width, errors).
pub mod common;
/// Simulator configuration (defaults, geometry validation, sweep ranges).
pub mod config;
/// Experiment tables and JSON report export.
pub mod report;
/// Trace decoding, single-configuration runs, and parameter sweeps.
pub mod sim;
/// Hit/miss statistics snapshots.
pub mod stats;

/// The cache engine; construct with `Cache::new` or `Cache::from_config`.
pub use crate::cache::{AccessOutcome, Cache};
/// A 32-bit memory address fed to the engine.
pub use crate::common::Address;
/// Root configuration type; use `Config::default()` or load from JSON.
pub use crate::config::Config;
/// Hit/miss counter snapshot.
pub use crate::stats::CacheStats;
