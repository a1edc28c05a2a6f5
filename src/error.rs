use std::fmt;

use thiserror::Error;

/// Why a call to the analysis service did not produce a response body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The request exceeded the configured timeout
    TimedOut,
    /// The service could not be reached at all
    Unreachable(String),
    /// The service answered with a non-success HTTP status
    Status(u16),
    /// The service answered, but the body was not JSON
    InvalidResponse(String),
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestFailure::TimedOut => write!(
                f,
                "Request timed out. Please check the analysis service connection and try again."
            ),
            RequestFailure::Unreachable(url) => write!(
                f,
                "Could not connect to the analysis service at {}. Please ensure it is running.",
                url
            ),
            RequestFailure::Status(status) => {
                write!(f, "Server responded with status {}", status)
            }
            RequestFailure::InvalidResponse(detail) => {
                write!(f, "Server returned an unreadable response: {}", detail)
            }
        }
    }
}

/// Errors that can occur while analyzing a food label
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Normalized OCR text is too short to analyze
    #[error("Not enough text found in image. Please ensure the label is clearly visible or use text mode.")]
    InsufficientText,

    /// The OCR collaborator failed or returned nothing
    #[error("Could not extract text from image ({0}). Please try a clearer image or use text mode.")]
    NoTextRecognized(String),

    /// Text mode was invoked with blank input
    #[error("Please provide ingredient text to analyze.")]
    EmptyInput,

    /// Network, timeout or status failure talking to the analysis service
    #[error("Analysis failed: {0}")]
    AnalysisRequestFailed(RequestFailure),

    /// The service answered, but no known field held analysis text
    #[error("No analysis data received from server")]
    NoAnalysisData,

    /// Analysis text was present but no ingredient could be parsed from it
    #[error("Could not parse ingredient analysis. Please check the response format.")]
    NoIngredientsParsed,

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
