//! # Export Module
//!
//! Flat-file outputs of a run:
//!
//! - [`TableExporter`]: reshapes ragged [`NamedSeries`](crate::analysis::NamedSeries)
//!   into a rectangular grid (label row + padded value rows) and writes it as CSV
//!   for the Sma4 analysis tool.
//! - [`HistoryLog`]: append-only run-history CSV with a fixed column header.
//! - [`ExportedTable`]: reads a previously exported grid back to recompute the
//!   oxidation degree from its columns.
//!
//! ## Padding
//!
//! Series shorter than the longest one are padded. [`PadPolicy::Zero`] writes the
//! literal `0` the Sma4 tool expects; consumers must know each series' real
//! length to avoid reading padding as data. [`PadPolicy::Empty`] writes empty
//! cells instead.

mod error;
mod history;
mod readback;
mod table;

#[cfg(test)]
mod tests;

pub use error::ExportError;
pub use history::{HistoryLog, HISTORY_FILE_NAME};
pub use readback::ExportedTable;
pub use table::{PadPolicy, TableExporter, PAD_ZERO};
