//! High-level report pipeline.
//!
//! Combines all the steps behind one call: parsing, coercion at the
//! dataset boundary, schema validation, and the selected aggregation.
//!
//! # Example
//!
//! ```rust,ignore
//! use shelfsight::{report_from_csv, ChartMode, ReportOptions};
//! use std::path::Path;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = ReportOptions::new(ChartMode::SalesTrend);
//!     let report = report_from_csv(Path::new("transactions.csv"), &options)?;
//!     println!("{} derived rows", report.data.len());
//!     Ok(())
//! }
//! ```

use serde::Serialize;
use std::path::Path;

use crate::dataset::{coerce_rows, CoercionResult};
use crate::error::{DatasetError, ReportError, ReportResult};
use crate::models::{ChartMode, TransactionRecord};
use crate::parser::{read_table, read_table_bytes, SourceTable};
use crate::transform::{run_mode, ChartData};
use crate::validation::validate_record;

/// Options for building a report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Which chart mode to aggregate for.
    pub mode: ChartMode,
    /// Skip the schema validation step.
    pub skip_validation: bool,
}

impl ReportOptions {
    pub fn new(mode: ChartMode) -> Self {
        Self {
            mode,
            skip_validation: false,
        }
    }
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self::new(ChartMode::StockoutRisk)
    }
}

/// A chart-ready report for one mode.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport {
    /// The selected mode, serialized as its selector token.
    pub mode: ChartMode,
    /// Chart header for the presenter.
    pub title: &'static str,
    /// The derived rows for the selected mode.
    pub data: ChartData,
    /// Source parsing metadata, absent for in-memory datasets.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dataset: Option<DatasetInfo>,
    /// Records that passed schema validation.
    pub valid_count: usize,
    /// Records that failed schema validation (still aggregated).
    pub invalid_count: usize,
    /// Validation errors, capped: (record index, messages).
    pub validation_errors: Vec<(usize, Vec<String>)>,
    /// Rows dropped at the dataset boundary.
    pub skipped: usize,
}

/// Source table information.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetInfo {
    pub encoding: String,
    pub delimiter: char,
    pub headers: Vec<String>,
    pub row_count: usize,
    pub record_count: usize,
}

/// Build a report from a CSV file.
///
/// This is the main entry point. It:
/// 1. Parses the CSV with encoding/delimiter auto-detection
/// 2. Coerces rows into typed records at the dataset boundary
/// 3. Validates records against the embedded schema (unless skipped)
/// 4. Runs the transform selected by `options.mode`
pub fn report_from_csv(path: &Path, options: &ReportOptions) -> ReportResult<DashboardReport> {
    let table = read_table(path)?;
    report_from_table(table, options)
}

/// Build a report from CSV bytes.
pub fn report_from_bytes(bytes: &[u8], options: &ReportOptions) -> ReportResult<DashboardReport> {
    let table = read_table_bytes(bytes)?;
    report_from_table(table, options)
}

/// Build a report from records already past the dataset boundary.
///
/// The dataset is taken as given: no parsing, no validation counts, and
/// an empty dataset yields an empty (not erroneous) report, matching the
/// transforms themselves.
pub fn report_from_records(records: &[TransactionRecord], mode: ChartMode) -> DashboardReport {
    DashboardReport {
        mode,
        title: mode.title(),
        data: run_mode(records, mode),
        dataset: None,
        valid_count: records.len(),
        invalid_count: 0,
        validation_errors: Vec::new(),
        skipped: 0,
    }
}

fn report_from_table(table: SourceTable, options: &ReportOptions) -> ReportResult<DashboardReport> {
    log::info!(
        "parsed {} rows ({}, '{}' delimited)",
        table.row_count(),
        table.encoding,
        table.delimiter,
    );

    if table.rows.is_empty() {
        return Err(DatasetError::EmptyDataset.into());
    }

    let CoercionResult {
        records,
        issues,
        skipped,
    } = coerce_rows(&table.rows);

    if records.is_empty() {
        return Err(ReportError::AllRowsSkipped(table.row_count()));
    }

    for issue in &issues {
        log::debug!(
            "row {}: field '{}' value '{}' nulled ({})",
            issue.row,
            issue.field,
            issue.value,
            issue.message,
        );
    }

    let (valid_count, invalid_count, validation_errors) = if options.skip_validation {
        (records.len(), 0, Vec::new())
    } else {
        validate_records(&records)?
    };

    if invalid_count > 0 {
        log::warn!("{invalid_count} of {} records failed validation", records.len());
    }

    let data = run_mode(&records, options.mode);
    log::info!("mode '{}': {} derived rows", options.mode, data.len());

    Ok(DashboardReport {
        mode: options.mode,
        title: options.mode.title(),
        data,
        dataset: Some(DatasetInfo {
            encoding: table.encoding,
            delimiter: table.delimiter,
            headers: table.headers,
            row_count: table.rows.len(),
            record_count: records.len(),
        }),
        valid_count,
        invalid_count,
        validation_errors,
        skipped: skipped.len(),
    })
}

/// Validate records against the embedded schema, keeping the first few
/// error details.
fn validate_records(
    records: &[TransactionRecord],
) -> ReportResult<(usize, usize, Vec<(usize, Vec<String>)>)> {
    let mut valid = 0;
    let mut invalid = 0;
    let mut errors = Vec::new();

    for (i, record) in records.iter().enumerate() {
        let value = serde_json::to_value(record)?;
        match validate_record(&value) {
            Ok(()) => valid += 1,
            Err(messages) => {
                invalid += 1;
                if errors.len() < 10 {
                    errors.push((i, messages));
                }
            }
        }
    }

    Ok((valid, invalid, errors))
}
