//! # chargelog
//!
//! Command-line front end for analyzing charge/discharge logs exported by a
//! battery cycler.
//!
//! ## Usage
//!
//! ```bash
//! # Process the first log waiting in ./untreated
//! chargelog process
//!
//! # Process a specific log with custom cycles
//! chargelog process run.csv --cycles 1,5,10 --memo "new binder"
//!
//! # Inspect a log without writing anything
//! chargelog info run.csv
//!
//! # Oxidation degree from previously exported tables
//! chargelog oxidation ./result
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
