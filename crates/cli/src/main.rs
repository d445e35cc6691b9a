//! Cache simulator CLI.
//!
//! This binary replays memory traces through the set-associative cache model. It performs:
//! 1. **Run:** One fixed configuration over every trace, reporting hit and miss rates.
//! 2. **Sweep:** Cache size, block size, or associativity varied over a range, tabulated
//!    per trace and exported as JSON.
//! 3. **Menu:** The interactive experiment menu (default when no subcommand is given).

mod experiments;
mod menu;

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cachesim_core::common::error::{ConfigError, SimError, TraceError};
use cachesim_core::config::Config;
use cachesim_core::sim::SweepParameter;

/// Errors surfaced to `main`.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Rejected configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Unreadable or malformed trace.
    #[error(transparent)]
    Trace(#[from] TraceError),
    /// Simulation or export failure.
    #[error(transparent)]
    Sim(#[from] SimError),
    /// Terminal I/O failure.
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay memory traces through a set-associative LRU cache and report hit/miss statistics.\n\nTrace lines look like `l 0x1fffff50 1`; the second field is the address.\n\nExamples:\n  cachesim run TraceFiles/gcc.trace\n  cachesim run --size 65536 --block 16 --assoc 8 TraceFiles/*.trace\n  cachesim sweep block-size --export blocks.json\n  cachesim --config experiments.json menu"
)]
struct Cli {
    /// JSON configuration file; omitted fields use built-in defaults.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay traces through one fixed cache configuration.
    Run {
        /// Cache capacity in bytes.
        #[arg(long)]
        size: Option<usize>,

        /// Block size in bytes.
        #[arg(long)]
        block: Option<usize>,

        /// Associativity (blocks per set).
        #[arg(long)]
        assoc: Option<usize>,

        /// Trace files; defaults to the configured list.
        traces: Vec<PathBuf>,
    },

    /// Vary one cache parameter and tabulate the results per trace.
    Sweep {
        /// Parameter to vary.
        #[arg(value_enum)]
        parameter: SweepArg,

        /// Override the swept values (comma-separated; bytes or ways).
        #[arg(long, value_delimiter = ',')]
        values: Vec<usize>,

        /// JSON report path; defaults to `Changing_<Parameter>.json`.
        #[arg(long, conflicts_with = "no_export")]
        export: Option<PathBuf>,

        /// Skip writing the JSON report.
        #[arg(long)]
        no_export: bool,

        /// Trace files; defaults to the configured list.
        traces: Vec<PathBuf>,
    },

    /// Interactive experiment menu.
    Menu,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SweepArg {
    CacheSize,
    BlockSize,
    Associativity,
}

impl From<SweepArg> for SweepParameter {
    fn from(arg: SweepArg) -> Self {
        match arg {
            SweepArg::CacheSize => Self::CacheSize,
            SweepArg::BlockSize => Self::BlockSize,
            SweepArg::Associativity => Self::Associativity,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = dispatch(cli) {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v` when set.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<Config, ConfigError> {
    match path {
        Some(path) => Config::from_json_file(path),
        None => Ok(Config::default()),
    }
}

fn dispatch(cli: Cli) -> Result<(), CliError> {
    let mut config = load_config(cli.config.as_ref())?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Some(Commands::Run {
            size,
            block,
            assoc,
            traces,
        }) => {
            if let Some(size) = size {
                config.cache.size_bytes = size;
            }
            if let Some(block) = block {
                config.cache.block_bytes = block;
            }
            if let Some(assoc) = assoc {
                config.cache.associativity = assoc;
            }
            if !traces.is_empty() {
                config.traces = traces;
            }
            experiments::run_fixed(&config, &mut out)?;
        }
        Some(Commands::Sweep {
            parameter,
            values,
            export,
            no_export,
            traces,
        }) => {
            let parameter = SweepParameter::from(parameter);
            if !values.is_empty() {
                *experiments::values_mut(&mut config, parameter) = values;
            }
            if !traces.is_empty() {
                config.traces = traces;
            }
            let export = if no_export {
                None
            } else {
                Some(export.unwrap_or_else(|| PathBuf::from(parameter.export_file_name())))
            };
            let _report = experiments::run_sweep(&config, parameter, export.as_deref(), &mut out)?;
        }
        Some(Commands::Menu) | None => {
            // The menu prompts interactively, so it writes straight to stdout.
            drop(out);
            let stdin = io::stdin();
            menu::run_menu(&config, stdin.lock(), io::stdout().lock())?;
            return Ok(());
        }
    }
    out.flush()?;
    Ok(())
}
