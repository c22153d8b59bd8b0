/// Errors that can occur while writing or reading flat-file outputs
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error during file operations
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV writing or reading error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// There are no series to export
    #[error("Nothing to export: the series list is empty")]
    EmptyTable,
}
