//! Experiment drivers shared by the subcommands and the interactive menu.

use std::io::Write;
use std::path::Path;

use cachesim_core::config::Config;
use cachesim_core::report::{ExperimentReport, TraceReport, render_table};
use cachesim_core::sim::trace::trace_name;
use cachesim_core::sim::{SweepParameter, load_trace, run_sweep as sweep_trace, simulate};

use crate::CliError;

/// The configured value list of one sweep, for command-line overrides.
pub fn values_mut(config: &mut Config, parameter: SweepParameter) -> &mut Vec<usize> {
    match parameter {
        SweepParameter::CacheSize => &mut config.sweep.cache_sizes,
        SweepParameter::BlockSize => &mut config.sweep.block_sizes,
        SweepParameter::Associativity => &mut config.sweep.associativities,
    }
}

/// Replays every configured trace through `config.cache` and prints hit and
/// miss rates per trace.
///
/// The geometry is validated before the first trace is read.
pub fn run_fixed<W: Write>(config: &Config, out: &mut W) -> Result<(), CliError> {
    let _ = config.cache.geometry()?;
    for path in &config.traces {
        let trace = load_trace(path)?;
        let stats = simulate(&config.cache, &trace)?;
        let name = path.display();
        match (stats.hit_percent(), stats.miss_percent()) {
            (Some(hit), Some(miss)) => {
                writeln!(out, "Hit Rate for {name}: {hit:.6}%")?;
                writeln!(out, "Miss Rate for {name}: {miss:.6}%")?;
            }
            _ => writeln!(out, "{name}: trace holds no references")?,
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Runs one sweep over every configured trace, printing a table per trace and
/// optionally exporting the collected report as JSON.
pub fn run_sweep<W: Write>(
    config: &Config,
    parameter: SweepParameter,
    export: Option<&Path>,
    out: &mut W,
) -> Result<ExperimentReport, CliError> {
    let values = parameter.values(&config.sweep);
    let mut report = ExperimentReport::new(parameter, config.cache);

    for path in &config.traces {
        let trace = load_trace(path)?;
        let points = sweep_trace(parameter, values, &config.cache, &trace)?;

        writeln!(out, "{}", path.display())?;
        writeln!(out)?;
        writeln!(out, "{}", render_table(parameter, &points))?;
        writeln!(out)?;

        report.traces.push(TraceReport {
            trace: trace_name(path),
            points,
        });
    }

    if let Some(path) = export {
        report.export(path)?;
        writeln!(out, "Report written to {}", path.display())?;
    }
    Ok(report)
}
