/// Errors that can end a processing run
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The input file could not be parsed
    #[error("Parse error: {0}")]
    ParseError(#[from] crate::record::ParseError),

    /// A derived quantity could not be computed
    #[error("Analysis error: {0}")]
    AnalysisError(#[from] crate::analysis::AnalysisError),

    /// A flat-file output could not be written
    #[error("Export error: {0}")]
    ExportError(#[from] crate::export::ExportError),

    /// I/O error while placing outputs
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
