//! Trace file decoding.
//!
//! A trace holds one memory reference per line as whitespace-separated fields:
//!
//! ```text
//! l 0x1fffff50 1
//! s 0x1fffff4c 2
//! ```
//!
//! The second field is the hexadecimal address. The access kind and any trailing
//! fields are ignored since data and write semantics are not modelled. Blank lines
//! and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::common::addr::Address;
use crate::common::error::TraceError;

/// Decodes one trace line; `Ok(None)` for lines carrying no reference.
fn parse_line(line: &str, number: usize) -> Result<Option<Address>, TraceError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let token = trimmed
        .split_whitespace()
        .nth(1)
        .ok_or(TraceError::MissingAddress { line: number })?;
    Address::from_hex(token)
        .map(Some)
        .map_err(|source| TraceError::Address {
            line: number,
            source,
        })
}

fn parse_lines<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Address>, TraceError> {
    let mut addresses = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(addr) = parse_line(&line, i + 1)? {
            addresses.push(addr);
        }
    }
    Ok(addresses)
}

/// Decodes a whole trace from a reader, preserving reference order.
///
/// # Errors
///
/// Returns `TraceError::Io` on a read failure, `MissingAddress` for a line with a
/// single field, and `Address` for an undecodable address token. Line numbers are
/// 1-based.
pub fn parse_trace<R: BufRead>(reader: R) -> Result<Vec<Address>, TraceError> {
    parse_lines(reader, Path::new(""))
}

/// Reads and decodes a trace file.
///
/// The trace is decoded once so it can be replayed against many configurations.
///
/// # Errors
///
/// Returns `TraceError::Io` if the file cannot be opened or read, and the
/// decoding errors of `parse_trace` otherwise.
pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<Address>, TraceError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TraceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let addresses = parse_lines(BufReader::new(file), path)?;
    tracing::debug!(path = %path.display(), references = addresses.len(), "trace loaded");
    Ok(addresses)
}

/// Short display name of a trace: its file stem, or the full path if it has none.
pub fn trace_name(path: &Path) -> String {
    path.file_stem().map_or_else(
        || path.display().to_string(),
        |stem| stem.to_string_lossy().into_owned(),
    )
}
