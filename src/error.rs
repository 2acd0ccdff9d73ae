//! Error types for dynamodb-export
//!
//! This module defines the error hierarchy covering:
//! - DynamoDB connection and scan errors
//! - Record cleaning errors
//! - Configuration and CLI errors
//!
//! Design philosophy:
//! - Use thiserror for structured error types in library code
//! - Errors should be actionable - include context about what to do
//! - Preserve error chains for debugging
//!
//! There is no retry or partial-result recovery: the first error aborts
//! the run and surfaces with its full chain.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for the dynamodb-export application
#[derive(Error, Debug)]
pub enum ExportError {
    /// DynamoDB scan errors
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    /// Record cleaning errors
    #[error("Clean error: {0}")]
    Clean(#[from] CleanError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// CSV serialization errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O errors (file operations, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// DynamoDB connection and scan errors
#[derive(Error, Debug)]
pub enum ScanError {
    /// Failed to resolve table metadata
    #[error("Failed to describe table '{table}': {reason}")]
    DescribeFailed { table: String, reason: String },

    /// Table exists but returned no description
    #[error("Table '{table}' has no description")]
    MissingDescription { table: String },

    /// Scan request failed
    #[error("Failed to scan table '{table}': {reason}")]
    ScanFailed { table: String, reason: String },
}

/// Record cleaning errors
#[derive(Error, Debug)]
pub enum CleanError {
    /// A field the cleaning step unconditionally removes was absent.
    /// Removal assumes presence; a record without it fails the run.
    #[error("Record is missing required field '{field}'")]
    MissingField { field: String },
}

/// Configuration and CLI errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Unknown output format
    #[error("Invalid format '{format}': expected 'csv' or 'json'")]
    InvalidFormat { format: String },

    /// Output path error
    #[error("Invalid output path '{path}': {reason}")]
    InvalidOutputPath { path: PathBuf, reason: String },
}

/// Result type alias for ExportError
pub type Result<T> = std::result::Result<T, ExportError>;

/// Result type alias for ScanError
pub type ScanResult<T> = std::result::Result<T, ScanError>;

/// Result type alias for CleanError
pub type CleanResult<T> = std::result::Result<T, CleanError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let clean_err = CleanError::MissingField {
            field: "audiourl".into(),
        };
        let export_err: ExportError = clean_err.into();
        assert!(matches!(export_err, ExportError::Clean(_)));
    }

    #[test]
    fn test_scan_error_display() {
        let err = ScanError::ScanFailed {
            table: "orders".into(),
            reason: "connection refused".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("orders"));
        assert!(msg.contains("connection refused"));
    }
}
