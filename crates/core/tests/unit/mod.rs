//! # Unit Components
//!
//! Tests grouped by the library module they exercise.

/// Address parsing, field split, and error display.
pub mod common;





/// Hit/miss statistics snapshots.
pub mod stats;
