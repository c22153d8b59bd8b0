use std::io::Read;
use std::path::Path;

use super::ExportError;

/// Column of the first cycle's charge capacity in an exported table
const CHARGE_CAPACITY_COLUMN: usize = 0;
/// Column of the first cycle's discharge capacity in an exported table
const DISCHARGE_CAPACITY_COLUMN: usize = 2;

/// Column peaks of a previously exported table
///
/// Peaks start at 0.0 and only numeric cells raise them, so the label row, empty
/// cells and zero padding never contribute.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExportedTable {
    peaks: Vec<f64>,
}

impl ExportedTable {
    /// Read an exported table file
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        Self::from_reader(std::fs::File::open(path)?)
    }

    /// Read an exported table
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut peaks: Vec<f64> = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            if peaks.len() < record.len() {
                peaks.resize(record.len(), 0.0);
            }
            for (peak, cell) in peaks.iter_mut().zip(record.iter()) {
                if let Ok(value) = cell.parse::<f64>() {
                    *peak = peak.max(value);
                }
            }
        }

        Ok(Self { peaks })
    }

    /// Peak of a column, `None` if the table has no such column
    pub fn column_peak(&self, column: usize) -> Option<f64> {
        self.peaks.get(column).copied()
    }

    /// `1 - peak(charge capacity) / peak(discharge capacity)` of the first exported cycle
    ///
    /// `None` when either column is missing or the discharge peak is zero.
    pub fn oxidation_degree(&self) -> Option<f64> {
        let charge = self.column_peak(CHARGE_CAPACITY_COLUMN)?;
        let discharge = self.column_peak(DISCHARGE_CAPACITY_COLUMN)?;
        if discharge == 0.0 {
            return None;
        }
        Some(1.0 - charge / discharge)
    }
}
