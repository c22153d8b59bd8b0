//! # chargelog - Charge/Discharge Cycler Log Reduction
//!
//! `chargelog` reduces the fixed-column CSV export of a charge/discharge cycler
//! (Hokuto Denko SD8 family) into per-cycle voltage/capacity curves, a
//! least-squares internal-resistance estimate and an "oxidation degree"
//! capacity-retention ratio.
//!
//! ## Key Features
//!
//! - **Positional Record Parsing**: Header metadata is taken from fixed line
//!   indices and data rows from fixed column positions, with the column layout
//!   selected per instrument firmware revision.
//!
//! - **Order-Preserving Pipeline**: Records keep the chronological order of the
//!   source file; mode transitions ("borders") are detected by adjacency.
//!
//! - **Explicit Absence**: Quantities that cannot be computed are `None`, never a
//!   disguised `0.0`.
//!
//! - **Sma4-Ready Export**: Ragged per-cycle series are reshaped into a
//!   rectangular, padded CSV table plus an append-only run-history log.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use chargelog::pipeline::{AnalysisConfig, Analyzer};
//!
//! let analyzer = Analyzer::with_config(AnalysisConfig::default());
//! let report = analyzer.analyze_path("untreated/run.csv")?;
//!
//! println!("{}", report);
//! if let Some(ir) = report.metadata.internal_resistance {
//!     println!("Internal resistance: {ir} kOhm");
//! }
//! # Ok::<(), chargelog::pipeline::PipelineError>(())
//! ```
//!
//! ## Architecture
//!
//! Data flows strictly left to right:
//!
//! ```text
//! record ──► analysis::series      ──► analysis::oxidation, export::table
//!        └─► analysis::resistance ──► analysis::fit
//! ```
//!
//! - [`record`]: Column layouts, header fields and the measurement record parser
//! - [`metadata`]: The per-run metadata value written to the history log
//! - [`analysis`]: Series aggregation, border detection, line fit, oxidation degree
//! - [`export`]: Rectangular table export, history log, exported-table readback
//! - [`plot`]: PNG rendering of resistance and charge/discharge curves
//! - [`pipeline`]: End-to-end run orchestration and output placement

// Documentation lints - enforce complete documentation for publication
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod analysis;
pub mod export;
pub mod metadata;
pub mod pipeline;
#[cfg(feature = "plotting")]
pub mod plot;
pub mod record;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::analysis::{
        oxidation_degree, AnalysisError, LinearFit, NamedSeries, ResistanceExtractor,
        ResistanceSample, SeriesAggregator,
    };
    pub use crate::export::{ExportError, HistoryLog, PadPolicy, TableExporter};
    pub use crate::metadata::RunMetadata;
    pub use crate::pipeline::{AnalysisConfig, Analyzer, PipelineError, RunReport};
    pub use crate::record::{
        ColumnLayout, InstrumentRevision, MeasurementRecord, Mode, ParseError, RecordParser,
    };
}
