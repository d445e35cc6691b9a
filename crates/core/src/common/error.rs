//! Error definitions for the cache simulator.
//!
//! This module defines every recoverable failure the simulator reports. It provides:
//! 1. **Configuration Errors:** Geometry rejected at construction, before any access.
//! 2. **Address Errors:** Textual addresses that cannot become a 32-bit pattern.
//! 3. **Trace Errors:** I/O and per-line decoding failures while reading a trace.
//!
//! Internal consistency failures of the replacement policy are not represented
//! here; they indicate a bug and panic instead.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejection of a cache configuration.
///
/// Raised by `CacheGeometry::new` and by configuration-file loading. This is the
/// only user-facing failure mode of the engine itself.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size or associativity field was zero.
    #[error("{field} must be positive")]
    Zero {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A field that must be an exact power of two was not.
    #[error("{field} must be a power of two, got {value}")]
    NotPowerOfTwo {
        /// Name of the offending field.
        field: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// The associativity asks for more blocks per set than the cache holds.
    #[error("associativity {associativity} exceeds the {blocks} blocks available in the cache")]
    AssociativityTooLarge {
        /// Requested blocks per set.
        associativity: usize,
        /// Total blocks in the cache (`cache_size_bytes / block_size_bytes`).
        blocks: usize,
    },

    /// Index and offset fields together need more bits than an address carries.
    #[error("geometry needs {required} index+offset bits but addresses are {width} bits wide")]
    AddressTooNarrow {
        /// Bits required by index and offset.
        required: u32,
        /// Available address width.
        width: u32,
    },

    /// A configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A configuration document was not valid JSON for `Config`.
    #[error("cannot deserialize config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure converting text into a 32-bit address.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    /// The token was empty (or only a radix prefix).
    #[error("empty address")]
    Empty,

    /// The token contained a character that is not a digit of its radix.
    #[error("invalid digit in address `{token}`")]
    InvalidDigit {
        /// The rejected token.
        token: String,
    },

    /// The token does not describe exactly a 32-bit pattern.
    #[error("address `{token}` is not 32 bits wide")]
    Width {
        /// The rejected token.
        token: String,
    },
}

/// Failure reading or decoding a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// The trace could not be opened or read.
    #[error("cannot read trace {path}: {source}")]
    Io {
        /// Path of the trace file (empty for in-memory readers).
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A non-blank line has no address field.
    #[error("line {line}: missing address field")]
    MissingAddress {
        /// 1-based line number.
        line: usize,
    },

    /// The address field could not be decoded.
    #[error("line {line}: {source}")]
    Address {
        /// 1-based line number.
        line: usize,
        /// Decoding failure.
        #[source]
        source: AddressError,
    },
}

/// Any failure surfaced by the simulation harness.
#[derive(Debug, Error)]
pub enum SimError {
    /// Rejected configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Unreadable or malformed trace.
    #[error(transparent)]
    Trace(#[from] TraceError),

    /// Report could not be written.
    #[error("cannot write report {path}: {source}")]
    Export {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Report could not be serialized.
    #[error("cannot serialize report: {0}")]
    Serialize(#[from] serde_json::Error),
}
