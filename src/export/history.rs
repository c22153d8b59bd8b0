use log::{debug, info};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use crate::metadata::{RunMetadata, HISTORY_COLUMNS};

use super::ExportError;

/// File name of the history log inside the result directory
pub const HISTORY_FILE_NAME: &str = "edit_history.csv";

/// Append-only run-history CSV
#[derive(Debug, Clone)]
pub struct HistoryLog {
    path: PathBuf,
}

impl HistoryLog {
    /// History log at an explicit path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// History log named [`HISTORY_FILE_NAME`] inside `dir`
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::new(dir.as_ref().join(HISTORY_FILE_NAME))
    }

    /// Path of the log file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one row, writing the column header first if the file is new or empty
    pub fn append(&self, metadata: &RunMetadata) -> Result<(), ExportError> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let is_new = file.metadata()?.len() == 0;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        if is_new {
            debug!("Starting history log {}", self.path.display());
            writer.write_record(HISTORY_COLUMNS)?;
        }
        writer.write_record(metadata.history_row())?;
        writer.flush()?;

        info!("Appended run {} to {}", metadata.timestamp, self.path.display());
        Ok(())
    }

    /// Read every recorded row, header excluded
    pub fn read_rows(&self) -> Result<Vec<Vec<String>>, ExportError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_path(&self.path)?;

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record?.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}
