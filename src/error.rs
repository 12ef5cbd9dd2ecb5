//! Error handling for the resume gap tool

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResumeGapError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Rewrite service error: {0}")]
    Rewrite(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Document rendering error: {0}")]
    Rendering(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),

    #[error("Server error: {0}")]
    Server(String),
}

pub type Result<T> = std::result::Result<T, ResumeGapError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for ResumeGapError {
    fn from(err: anyhow::Error) -> Self {
        ResumeGapError::Server(err.to_string())
    }
}

impl From<reqwest::Error> for ResumeGapError {
    fn from(err: reqwest::Error) -> Self {
        ResumeGapError::Network(err.to_string())
    }
}

impl ResumeGapError {
    /// Stable machine-readable code used by the HTTP layer
    pub fn code(&self) -> &'static str {
        match self {
            ResumeGapError::Io(_) => "IO_ERROR",
            ResumeGapError::PdfExtraction(_) => "PDF_EXTRACTION_ERROR",
            ResumeGapError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ResumeGapError::InvalidInput(_) => "INVALID_INPUT",
            ResumeGapError::Configuration(_) => "CONFIGURATION_ERROR",
            ResumeGapError::Rewrite(_) => "REWRITE_ERROR",
            ResumeGapError::Network(_) => "NETWORK_ERROR",
            ResumeGapError::Rendering(_) => "RENDERING_ERROR",
            ResumeGapError::Serialization(_) => "SERIALIZATION_ERROR",
            ResumeGapError::OutputFormatting(_) => "OUTPUT_FORMATTING_ERROR",
            ResumeGapError::Server(_) => "SERVER_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ResumeGapError::InvalidInput("job text is required".to_string());
        assert_eq!(err.to_string(), "Invalid input: job text is required");
        assert_eq!(err.code(), "INVALID_INPUT");
    }

    #[test]
    fn test_anyhow_conversion() {
        let err: ResumeGapError = anyhow::anyhow!("address in use").into();
        assert!(matches!(err, ResumeGapError::Server(_)));
    }
}
