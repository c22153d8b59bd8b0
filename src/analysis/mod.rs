//! # Analysis Module
//!
//! Everything that derives numbers from the ordered record stream:
//!
//! - [`SeriesAggregator`]: per-cycle charge/discharge capacity and voltage series
//!   for the cycling pattern, plus the peak discharge capacity.
//! - [`ResistanceExtractor`]: Charge→Rest borders of the resistance pattern,
//!   turned into (current, voltage drop) samples.
//! - [`LinearFit`]: ordinary least squares of voltage drop against current; the
//!   slope is the internal resistance.
//! - [`oxidation_degree`]: capacity-retention ratio of the first two requested
//!   cycles.
//!
//! All functions here are pure: they borrow the record stream and return owned
//! results.

mod error;
mod fit;
mod oxidation;
mod resistance;
mod series;


pub use error::AnalysisError;
pub use fit::LinearFit;
pub use oxidation::oxidation_degree;
pub use resistance::{ResistanceExtractor, ResistanceSample, MICRO_PER_MILLI};
pub use series::{NamedSeries, SeriesAggregator, SeriesKind, SERIES_PER_CYCLE};
