//! Error handling for the resume analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeAnalyzerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("DOCX extraction error: {0}")]
    DocxExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl ResumeAnalyzerError {
    /// True for failures raised while reading a resume document, as opposed to
    /// configuration or usage errors.
    pub fn is_extraction_failure(&self) -> bool {
        matches!(
            self,
            ResumeAnalyzerError::PdfExtraction(_) | ResumeAnalyzerError::DocxExtraction(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, ResumeAnalyzerError>;
