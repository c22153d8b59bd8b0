use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use chargelog::export::PadPolicy;
use chargelog::record::InstrumentRevision;

mod config;
mod info;
mod oxidation;
mod process;

pub use config::Config;
pub use process::ProcessArgs;

/// chargelog - battery cycler log analysis
#[derive(Parser)]
#[command(name = "chargelog")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Instrument firmware revision of the input export.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum RevisionArg {
    /// Current firmware (18 header lines)
    #[default]
    Sd8,
    /// Older firmware
    Sd8Legacy,
}

/// Fill value for short columns of the exported table.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum PadArg {
    /// Literal "0" cells
    #[default]
    Zero,
    /// Empty cells
    Empty,
}

impl From<RevisionArg> for InstrumentRevision {
    fn from(arg: RevisionArg) -> Self {
        match arg {
            RevisionArg::Sd8 => InstrumentRevision::Sd8,
            RevisionArg::Sd8Legacy => InstrumentRevision::Sd8Legacy,
        }
    }
}

impl From<PadArg> for PadPolicy {
    fn from(arg: PadArg) -> Self {
        match arg {
            PadArg::Zero => PadPolicy::Zero,
            PadArg::Empty => PadPolicy::Empty,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one cycler log and write plots, table and history row
    Process(ProcessArgs),

    /// Show header fields and record counts of a cycler log
    Info {
        /// Input cycler log
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Instrument firmware revision
        #[arg(long, value_enum)]
        revision: Option<RevisionArg>,
    },

    /// Compute oxidation degree from exported tables
    Oxidation {
        /// Exported table, or a directory of them
        #[arg(value_name = "PATH", default_value = "./result")]
        path: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Process(args) => process::run(args),
        Commands::Info {
            file,
            config,
            revision,
        } => info::run(file, config, revision.map(InstrumentRevision::from)),
        Commands::Oxidation { path } => oxidation::run(path),
    }
}
