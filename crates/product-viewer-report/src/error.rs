use thiserror::Error;

/// Errors raised while generating or writing a report
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Output directory does not exist: {0}")]
    MissingOutputDir(String),
}
