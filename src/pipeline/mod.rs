//! # Pipeline Module
//!
//! Runs one cycler log start to finish:
//!
//! ```text
//! parse ─► aggregate series ─► discharge capacity + oxidation degree  (metadata update 1)
//!       └► resistance borders ─► line fit                             (metadata update 2)
//! ```
//!
//! [`Analyzer`] is the pure part: file content in, [`RunReport`] out.
//! [`OutputWriter`] places the report on disk (plots, exported table, history
//! row) and moves the processed input out of the import directory.
//!
//! ## Failure policy
//!
//! Parse errors and an undefined oxidation ratio abort the run. A resistance
//! fit that cannot be computed drops the resistance stage with a warning,
//! unless [`AnalysisConfig::strict_resistance`] is set.

mod config;
mod error;
mod outputs;
mod report;


use log::{info, warn};
use std::path::Path;

use crate::analysis::{
    oxidation_degree, LinearFit, ResistanceExtractor, SeriesAggregator,
};
use crate::metadata::RunMetadata;
use crate::record::{MeasurementRecord, ParsedLog, RecordParser};

pub use config::AnalysisConfig;
pub use error::PipelineError;
pub use outputs::{OutputDirs, OutputOptions, OutputWriter, WrittenOutputs};
pub use report::{ResistanceResult, RunReport};

/// Runs the analysis stages over one log
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalysisConfig,
}

impl Analyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Parse and analyze a log file
    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<RunReport, PipelineError> {
        let metadata = RunMetadata::now();
        let log = self.parser().parse_file(path)?;
        self.analyze_log(log, metadata)
    }

    /// Parse and analyze decoded log content
    pub fn analyze_str(&self, content: &str, metadata: RunMetadata) -> Result<RunReport, PipelineError> {
        let log = self.parser().parse_str(content)?;
        self.analyze_log(log, metadata)
    }

    /// Analyze an already parsed log
    ///
    /// `metadata` is the run's initial value (timestamp, memo); header fields
    /// and computed results are layered onto it.
    pub fn analyze_log(&self, log: ParsedLog, metadata: RunMetadata) -> Result<RunReport, PipelineError> {
        let ParsedLog { header, records } = log;
        info!(
            "Analyzing {} records (cd pattern {}, ir pattern {}, cycles {:?})",
            records.len(),
            self.config.cd_pattern,
            self.config.ir_pattern,
            self.config.cycles
        );

        let aggregator = SeriesAggregator::new(self.config.cd_pattern, self.config.cycles.clone());
        let series = aggregator.aggregate(&records);
        let discharge_capacity = aggregator.max_discharge_capacity(&records);
        let oxidation = oxidation_degree(&series)?;

        let mut metadata = metadata
            .with_header(&header)
            .with_capacity_results(discharge_capacity, oxidation);

        let resistance = self.resistance_stage(&records)?;
        if let Some(result) = &resistance {
            info!(
                "Internal resistance {:.4} kOhm, segment {:.4} mV ({} samples)",
                result.fit.slope,
                result.fit.intercept,
                result.samples.len()
            );
            metadata = metadata.with_internal_resistance(result.fit.slope);
        }

        Ok(RunReport {
            metadata,
            cycles: self.config.cycles.clone(),
            series,
            resistance,
            record_count: records.len(),
        })
    }

    fn parser(&self) -> RecordParser {
        RecordParser::new(self.config.layout.clone())
    }

    fn resistance_stage(
        &self,
        records: &[MeasurementRecord],
    ) -> Result<Option<ResistanceResult>, PipelineError> {
        let extractor = ResistanceExtractor::new(self.config.ir_pattern);
        if !extractor.pattern_present(records) {
            info!(
                "No records of pattern {}; skipping resistance stage",
                self.config.ir_pattern
            );
            return Ok(None);
        }

        let samples = extractor.extract(records);
        match LinearFit::from_samples(&samples) {
            Ok(fit) => Ok(Some(ResistanceResult { samples, fit })),
            Err(e) if !self.config.strict_resistance => {
                warn!("Dropping resistance stage: {}", e);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
