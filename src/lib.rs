//! # Shelfsight - retail sales dashboard analytics
//!
//! Shelfsight turns a flat table of retail transaction records into the
//! chart-ready datasets behind a three-mode sales dashboard: stockout
//! risk by SKU, sales trend by date, and a cluster scatter projection.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  CSV / JSON │────▶│   Parser    │────▶│   Dataset   │────▶│  Transform  │
//! │   (input)   │     │ (auto-enc)  │     │  (coerce)   │     │ (1 of 3)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shelfsight::{report_from_csv, ChartMode, ReportOptions};
//! use std::path::Path;
//!
//! fn main() {
//!     let options = ReportOptions::new(ChartMode::StockoutRisk);
//!     let report = report_from_csv(Path::new("transactions.csv"), &options).unwrap();
//!     println!("{} SKUs at risk", report.data.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (TransactionRecord, ChartMode, derived rows)
//! - [`parser`] - CSV parsing with auto-detection
//! - [`dataset`] - Typed coercion boundary and the embedded sample dataset
//! - [`transform`] - The three aggregations, dispatch, and the report pipeline
//! - [`validation`] - Record schema validation
//! - [`insights`] - Static insights text

// Core modules
pub mod error;
pub mod models;

// Parsing
pub mod parser;

// Dataset boundary
pub mod dataset;

// Transformation
pub mod transform;

// Validation
pub mod validation;

// Static insights
pub mod insights;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    CsvError,
    CsvResult,
    DatasetError,
    DatasetResult,
    ReportError,
    ReportResult,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    ChartMode,
    ClusterPoint,
    LeadTime,
    RiskBySku,
    TransactionRecord,
    TrendPoint,
    ALL_MODES,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{
    decode_bytes,
    parse_table,
    read_table,
    read_table_bytes,
    sniff_delimiter,
    sniff_encoding,
    SourceTable,
};

// =============================================================================
// Re-exports - Dataset boundary
// =============================================================================

pub use dataset::{
    coerce_rows,
    records_from_json,
    sample_csv,
    sample_records,
    CoercionResult,
    FieldIssue,
    SkippedRow,
};

// =============================================================================
// Re-exports - Transforms
// =============================================================================

pub use transform::{
    cluster_points,
    risk_by_sku,
    run_mode,
    sales_trend,
    ChartData,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    report_from_bytes,
    report_from_csv,
    report_from_records,
    DashboardReport,
    DatasetInfo,
    ReportOptions,
};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{is_valid, is_valid_record, validate, validate_record};

// =============================================================================
// Re-exports - Insights
// =============================================================================

pub use insights::{insights_markdown, INSIGHTS, INSIGHTS_HEADING};
