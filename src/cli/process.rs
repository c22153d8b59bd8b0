use anyhow::{bail, Context, Result};
use clap::Args;
use log::info;
use std::path::PathBuf;

use chargelog::export::PadPolicy;
use chargelog::metadata::RunMetadata;
use chargelog::pipeline::{AnalysisConfig, Analyzer, OutputDirs, OutputOptions, OutputWriter};
use chargelog::record::{InstrumentRevision, RecordParser};

use super::{Config, PadArg, RevisionArg};

/// Arguments of the `process` subcommand
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Cycler log to process (defaults to the first *.csv in the import directory)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// Load settings from a TOML config file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pattern drawn as charge/discharge curves
    #[arg(long)]
    pub cd_pattern: Option<u32>,

    /// Pattern that probes internal resistance
    #[arg(long)]
    pub ir_pattern: Option<u32>,

    /// Cycles to aggregate, comma separated
    #[arg(long, value_delimiter = ',')]
    pub cycles: Option<Vec<u32>>,

    /// Instrument firmware revision
    #[arg(long, value_enum)]
    pub revision: Option<RevisionArg>,

    /// Fill value for short columns of the exported table
    #[arg(long, value_enum)]
    pub pad: Option<PadArg>,

    /// Abort when the resistance fit cannot be computed
    #[arg(long)]
    pub strict_resistance: bool,

    /// Skip plot rendering
    #[arg(long)]
    pub no_plots: bool,

    /// Leave the input log where it is
    #[arg(long)]
    pub keep_input: bool,

    /// Free-text memo for the history log
    #[arg(long, default_value = "")]
    pub memo: String,

    /// Free-text notes for the history log
    #[arg(long, default_value = "")]
    pub others: String,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Directory of unprocessed logs
    #[arg(long, value_name = "DIR")]
    pub import_dir: Option<PathBuf>,

    /// Directory of exported tables and the history log
    #[arg(long, value_name = "DIR")]
    pub result_dir: Option<PathBuf>,

    /// Directory of rendered plots
    #[arg(long, value_name = "DIR")]
    pub figure_dir: Option<PathBuf>,

    /// Directory processed logs are moved to
    #[arg(long, value_name = "DIR")]
    pub rawdata_dir: Option<PathBuf>,
}

impl ProcessArgs {
    /// Merge CLI flags over the config file over built-in defaults.
    fn resolve(&self, config: &Config) -> Result<(AnalysisConfig, OutputDirs, OutputOptions)> {
        let defaults = AnalysisConfig::default();
        let layout = config.layout(self.revision.map(InstrumentRevision::from))?;

        let cycles = self
            .cycles
            .clone()
            .or_else(|| config.analysis.cycles.clone())
            .unwrap_or(defaults.cycles);
        if cycles.is_empty() {
            bail!("At least one cycle must be requested");
        }

        let analysis = AnalysisConfig {
            cd_pattern: self
                .cd_pattern
                .or(config.analysis.cd_pattern)
                .unwrap_or(defaults.cd_pattern),
            ir_pattern: self
                .ir_pattern
                .or(config.analysis.ir_pattern)
                .unwrap_or(defaults.ir_pattern),
            cycles,
            layout,
            strict_resistance: self.strict_resistance
                || config.analysis.strict_resistance.unwrap_or(false),
        };

        let base = OutputDirs::default();
        let paths = &config.paths;
        let dirs = OutputDirs {
            import_dir: pick(&self.import_dir, &paths.import_dir, base.import_dir),
            result_dir: pick(&self.result_dir, &paths.result_dir, base.result_dir),
            figure_dir: pick(&self.figure_dir, &paths.figure_dir, base.figure_dir),
            rawdata_dir: pick(&self.rawdata_dir, &paths.rawdata_dir, base.rawdata_dir),
        };

        let options = OutputOptions {
            pad: self
                .pad
                .map(PadPolicy::from)
                .or(config.analysis.pad)
                .unwrap_or_default(),
            plots: !self.no_plots,
            relocate_input: !self.keep_input,
        };

        Ok((analysis, dirs, options))
    }
}

fn pick(cli: &Option<PathBuf>, file: &Option<PathBuf>, fallback: PathBuf) -> PathBuf {
    cli.clone().or_else(|| file.clone()).unwrap_or(fallback)
}

/// Analyze one log and place every output on disk
pub fn run(args: ProcessArgs) -> Result<()> {
    let config = Config::load(args.config.as_deref())?;
    let (analysis, dirs, options) = args.resolve(&config)?;
    let writer = OutputWriter::new(dirs, options);

    let input = match &args.input {
        Some(path) => path.clone(),
        None => writer
            .find_input()
            .with_context(|| {
                format!(
                    "Failed to list import directory: {}",
                    writer.dirs().import_dir.display()
                )
            })?
            .with_context(|| {
                format!("No *.csv file in {}", writer.dirs().import_dir.display())
            })?,
    };
    if !input.exists() {
        bail!("Input file does not exist: {}", input.display());
    }

    info!("chargelog - cycler log analysis");
    info!("===============================");
    info!("Input: {}", input.display());

    let metadata = RunMetadata::now()
        .with_memo(args.memo.as_str())
        .with_others(args.others.as_str());
    let log = RecordParser::new(analysis.layout.clone())
        .parse_file(&input)
        .with_context(|| format!("Failed to parse {}", input.display()))?;
    let report = Analyzer::with_config(analysis)
        .analyze_log(log, metadata)
        .context("Analysis failed")?;

    let written = writer.write(&report, &input).context("Failed to write outputs")?;

    if args.json {
        println!("{}", report.to_json().context("Failed to serialize report")?);
    } else {
        #[cfg(feature = "colorized_output")]
        {
            println!("{}", report.format_colored());
        }

        #[cfg(not(feature = "colorized_output"))]
        {
            println!("{}", report);
        }
    }

    info!("Table: {}", written.table.display());
    info!("History: {}", written.history.display());
    for figure in &written.figures {
        info!("Figure: {}", figure.display());
    }
    if let Some(moved) = &written.relocated_input {
        info!("Input moved to {}", moved.display());
    }

    Ok(())
}
