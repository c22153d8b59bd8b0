/// Errors that can occur while parsing a cycler log
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// I/O error reading the log file
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Delimited-text tokenizing error
    #[error("CSV parsing error: {0}")]
    CsvError(#[from] csv::Error),

    /// A data row could not be cast into a measurement record
    #[error("Malformed record at line {line}: {reason} (row: {content:?})")]
    MalformedRecord {
        /// 1-based line number in the source file
        line: usize,
        /// What failed to parse
        reason: String,
        /// The offending row, re-joined
        content: String,
    },
}
