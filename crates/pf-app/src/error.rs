//! Error types for the pf-app service layer.

use std::path::PathBuf;

/// Application error type wrapping the backend crates' errors behind one
/// interface for the CLI.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Failed to read signal file: {path}")]
    SignalFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write signal file: {path}")]
    SignalFileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported signal file extension: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: PathBuf },

    #[error("Failed to parse signal file: {0}")]
    Parse(String),

    #[error("Signal file validation failed: {0}")]
    Validation(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for pf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl From<pf_signals::SignalError> for AppError {
    fn from(err: pf_signals::SignalError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<pf_analysis::AnalysisError> for AppError {
    fn from(err: pf_analysis::AnalysisError) -> Self {
        AppError::Analysis(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}
