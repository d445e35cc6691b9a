//! Simulation harness.
//!
//! This module drives the cache engine from recorded traces. It provides:
//! 1. **Trace decoding:** Text traces into ordered address lists.
//! 2. **Single runs:** One configuration replayed over one trace.
//! 3. **Sweeps:** One configuration parameter varied over a list of values.
//!
//! Every run builds its own `Cache`, so runs share no mutable state.

/// Single-configuration replay.
pub mod simulator;
/// Parameter sweeps.
pub mod sweep;
/// Trace file decoding.
pub mod trace;

pub use simulator::{replay, simulate};
pub use sweep::{SweepParameter, SweepPoint, run_sweep};
pub use trace::{load_trace, parse_trace};
