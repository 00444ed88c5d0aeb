//! Error types for the dupescan library

use thiserror::Error;

/// Result type alias for dupescan operations
pub type Result<T> = std::result::Result<T, DupeScanError>;

/// Main error type for listing and reporting operations
#[derive(Error, Debug)]
pub enum DupeScanError {
    /// Error occurred while listing objects in the storage backend
    #[error("Failed to list objects: {0}")]
    ListError(String),

    /// Error occurred while writing the duplicate report
    #[error("Failed to write report: {0}")]
    WriteError(String),

    /// IO error wrapper
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Missing or invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
