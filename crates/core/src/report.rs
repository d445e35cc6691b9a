//! Experiment tables and JSON export.
//!
//! Sweep results are shown as grid tables on the terminal and exported as one
//! JSON document per experiment, holding one entry per trace.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::common::error::SimError;
use crate::config::CacheConfig;
use crate::sim::sweep::{SweepParameter, SweepPoint};

/// Column headings following the varied-parameter column.
const COUNTER_HEADERS: [&str; 4] = ["Hit count", "Miss count", "Hit Rate", "Miss Rate"];

/// Sweep results for one trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceReport {
    /// Trace name (file stem).
    pub trace: String,
    /// One point per swept value, in sweep order.
    pub points: Vec<SweepPoint>,
}

/// Results of one sweep experiment across all traces.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentReport {
    /// Parameter that was varied.
    pub parameter: SweepParameter,
    /// Configuration supplying the fields that were held.
    pub base: CacheConfig,
    /// Per-trace results, in replay order.
    pub traces: Vec<TraceReport>,
}

impl ExperimentReport {
    /// Creates an empty report.
    pub const fn new(parameter: SweepParameter, base: CacheConfig) -> Self {
        Self {
            parameter,
            base,
            traces: Vec::new(),
        }
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Serialize` if serialization fails or the writer rejects
    /// the output.
    pub fn write_json<W: Write>(&self, writer: W) -> Result<(), SimError> {
        serde_json::to_writer_pretty(writer, self)?;
        Ok(())
    }

    /// Writes the report to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `SimError::Export` if the file cannot be created or flushed and
    /// `SimError::Serialize` if serialization fails.
    pub fn export(&self, path: &Path) -> Result<(), SimError> {
        let export_err = |source| SimError::Export {
            path: path.to_path_buf(),
            source,
        };
        let mut writer = BufWriter::new(File::create(path).map_err(export_err)?);
        self.write_json(&mut writer)?;
        writer.write_all(b"\n").map_err(export_err)?;
        writer.flush().map_err(export_err)?;
        tracing::info!(path = %path.display(), traces = self.traces.len(), "report exported");
        Ok(())
    }
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_string(), |r| format!("{r:.6}"))
}

/// Renders sweep points as a grid table.
///
/// Columns are the varied parameter (cache sizes in KiB), hit count, miss count,
/// hit rate and miss rate (percent, six decimals).
pub fn render_table(parameter: SweepParameter, points: &[SweepPoint]) -> String {
    let mut headers = vec![parameter.label()];
    headers.extend(COUNTER_HEADERS);
    let rows: Vec<Vec<String>> = points
        .iter()
        .map(|p| {
            vec![
                parameter.display_value(p.value).to_string(),
                p.hits.to_string(),
                p.misses.to_string(),
                format_rate(p.hit_rate),
                format_rate(p.miss_rate),
            ]
        })
        .collect();
    render_grid(&headers, &rows)
}

fn grid_rule(widths: &[usize], fill: char) -> String {
    let mut line = String::from("+");
    for &width in widths {
        line.extend(std::iter::repeat_n(fill, width + 2));
        line.push('+');
    }
    line
}

fn grid_row<'a>(widths: &[usize], mut cells: impl Iterator<Item = &'a str>) -> String {
    let mut line = String::from("|");
    for &width in widths {
        let cell = cells.next().unwrap_or("");
        let pad = width.saturating_sub(cell.chars().count());
        line.push(' ');
        line.push_str(cell);
        line.extend(std::iter::repeat_n(' ', pad));
        line.push_str(" |");
    }
    line
}

/// Renders a grid table with a `=` rule under the header row.
///
/// Rows shorter than the header are padded with empty cells; extra cells are
/// dropped.
pub fn render_grid(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = Vec::with_capacity(rows.len() * 2 + 3);
    out.push(grid_rule(&widths, '-'));
    out.push(grid_row(&widths, headers.iter().copied()));
    out.push(grid_rule(&widths, '='));
    for row in rows {
        out.push(grid_row(&widths, row.iter().map(String::as_str)));
        out.push(grid_rule(&widths, '-'));
    }
    if rows.is_empty() {
        out.push(grid_rule(&widths, '-'));
    }
    out.join("\n")
}
