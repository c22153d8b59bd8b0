use log::info;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::analysis::NamedSeries;
use crate::metadata::format_value;

use super::ExportError;

/// Padding literal for [`PadPolicy::Zero`]
pub const PAD_ZERO: &str = "0";

/// How cells past the end of a shorter series are filled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadPolicy {
    /// The literal `0`, as the Sma4 tool expects
    #[default]
    Zero,
    /// An empty cell
    Empty,
}

impl PadPolicy {
    /// Cell text used for padding
    pub fn literal(&self) -> &'static str {
        match self {
            PadPolicy::Zero => PAD_ZERO,
            PadPolicy::Empty => "",
        }
    }
}

/// Reshapes ragged series into a rectangular table
#[derive(Debug, Clone, Copy, Default)]
pub struct TableExporter {
    pad: PadPolicy,
}

impl TableExporter {
    /// Create an exporter with the given padding policy
    pub fn new(pad: PadPolicy) -> Self {
        Self { pad }
    }

    /// Padding policy in use
    pub fn pad(&self) -> PadPolicy {
        self.pad
    }

    /// Build the grid
    ///
    /// Row 0 holds the labels. Row `k >= 1` holds element `k - 1` of every
    /// series, or the padding literal where a series is shorter. The grid is
    /// `1 + max(len)` rows tall and exactly `series.len()` columns wide.
    pub fn grid(&self, series: &[NamedSeries]) -> Vec<Vec<String>> {
        let height = series.iter().map(NamedSeries::len).max().unwrap_or(0);

        let mut grid = Vec::with_capacity(height + 1);
        grid.push(series.iter().map(|s| s.label().to_string()).collect());
        for k in 0..height {
            grid.push(
                series
                    .iter()
                    .map(|s| match s.data().get(k) {
                        Some(&value) => format_value(value),
                        None => self.pad.literal().to_string(),
                    })
                    .collect(),
            );
        }
        grid
    }

    /// Write the grid as CSV, returning the number of rows written
    pub fn write_csv<W: Write>(&self, series: &[NamedSeries], writer: W) -> Result<usize, ExportError> {
        if series.is_empty() {
            return Err(ExportError::EmptyTable);
        }

        let grid = self.grid(series);
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &grid {
            csv_writer.write_record(row)?;
        }
        csv_writer.flush()?;
        Ok(grid.len())
    }

    /// Write the grid to a CSV file, replacing any existing file
    pub fn write_file<P: AsRef<Path>>(&self, series: &[NamedSeries], path: P) -> Result<usize, ExportError> {
        let path = path.as_ref();
        let rows = self.write_csv(series, File::create(path)?)?;
        info!("Wrote {} table rows to {}", rows, path.display());
        Ok(rows)
    }
}
