//! Error types for the shelfsight report pipeline.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - CSV parsing errors
//! - [`DatasetError`] - dataset boundary errors (empty input, mode selection)
//! - [`ReportError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.
//!
//! Missing or malformed field values are deliberately NOT errors: the
//! dataset boundary nulls them out and reports them as data
//! ([`crate::dataset::FieldIssue`], [`crate::dataset::SkippedRow`]), in
//! keeping with the aggregations' null-tolerant semantics.

use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode with the detected encoding.
    #[error("Failed to decode content: {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Dataset Boundary Errors
// =============================================================================

/// Errors at the dataset boundary.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Dataset has zero rows.
    #[error("Dataset is empty")]
    EmptyDataset,

    /// Unrecognized chart mode token.
    #[error("Unknown chart mode: '{0}' (expected \"Stockout Risk\", \"Sales Trend\" or \"Cluster Analysis\")")]
    UnknownMode(String),

    /// JSON deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Report Errors (top-level)
// =============================================================================

/// Top-level report orchestration errors.
///
/// This is the main error type returned by [`crate::transform::pipeline::report_from_csv`].
/// It wraps all lower-level errors and adds pipeline-specific variants.
#[derive(Debug, Error)]
pub enum ReportError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Dataset boundary error.
    #[error("Dataset error: {0}")]
    Dataset(#[from] DatasetError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Rows were parsed but none survived coercion.
    #[error("All {0} rows were skipped during coercion")]
    AllRowsSkipped(usize),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for dataset boundary operations.
pub type DatasetResult<T> = Result<T, DatasetError>;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
