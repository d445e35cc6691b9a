//! Interactive experiment menu.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use cachesim_core::config::Config;
use cachesim_core::sim::SweepParameter;

use crate::{CliError, experiments};

const MENU: &str = "\nOptions:
1. Part A: Analyze cache simulation with fixed cache size, block size, and associativity
2. Part B: Analyze cache performance with varying cache sizes
3. Part C: Analyze cache performance with varying block sizes
4. Part D: Analyze cache performance with varying associativities
-1. Exit";

/// One parsed menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Fixed,
    Sweep(SweepParameter),
    Exit,
}

fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim() {
        "1" => Some(Choice::Fixed),
        "2" => Some(Choice::Sweep(SweepParameter::CacheSize)),
        "3" => Some(Choice::Sweep(SweepParameter::BlockSize)),
        "4" => Some(Choice::Sweep(SweepParameter::Associativity)),
        "-1" => Some(Choice::Exit),
        _ => None,
    }
}

/// Runs the menu loop until `-1` or end of input.
///
/// A failing experiment is reported and the menu is shown again; only terminal
/// I/O errors end the loop early.
pub fn run_menu<R: BufRead, W: Write>(
    config: &Config,
    mut input: R,
    mut out: W,
) -> Result<(), CliError> {
    writeln!(out, "Cache Simulation")?;
    let mut line = String::new();
    loop {
        writeln!(out, "{MENU}")?;
        write!(out, "Please enter your choice: ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }

        let result = match parse_choice(&line) {
            Some(Choice::Fixed) => experiments::run_fixed(config, &mut out),
            Some(Choice::Sweep(parameter)) => {
                let export = PathBuf::from(parameter.export_file_name());
                experiments::run_sweep(config, parameter, Some(&export), &mut out).map(|_| ())
            }
            Some(Choice::Exit) => {
                writeln!(out, "Exiting...")?;
                return Ok(());
            }
            None => {
                writeln!(
                    out,
                    "Invalid choice. Please enter a number between 1 and 4, or -1 to exit."
                )?;
                continue;
            }
        };

        match result {
            Err(CliError::Io(e)) => return Err(CliError::Io(e)),
            Err(e) => {
                tracing::warn!(error = %e, "experiment failed");
                writeln!(out, "[!] {e}")?;
            }
            Ok(()) => {}
        }
    }
}
