//! The dataset boundary: raw parsed rows become typed records here.
//!
//! Coercion is null-tolerant by design. A field that is absent, blank, or
//! unparseable becomes `None` (with the incident recorded as a
//! [`FieldIssue`]); only a row missing one of its required keys
//! (`TransactionID`, `Date`, `StoreID`, `SKU_ID`) is skipped, with the
//! skip recorded rather than raised. Nothing in this module returns an
//! error for bad data — the caller decides what to do with an empty or
//! partial result.
//!
//! The embedded sample dataset backs the CLI when no input file is
//! given, so the dashboard has data to chart out of the box.

use serde_json::{Map, Value};

use crate::error::DatasetResult;
use crate::models::{LeadTime, TransactionRecord};
use crate::parser::read_table_bytes;

/// Result of coercing raw rows into typed records.
#[derive(Debug, Default)]
pub struct CoercionResult {
    /// Successfully coerced records, in input order.
    pub records: Vec<TransactionRecord>,
    /// Field-level incidents: the value was dropped to null, the row kept.
    pub issues: Vec<FieldIssue>,
    /// Rows dropped for missing required keys or an unusable date.
    pub skipped: Vec<SkippedRow>,
}

/// A field value that could not be interpreted and was nulled out.
#[derive(Debug, Clone)]
pub struct FieldIssue {
    pub row: usize,
    pub field: String,
    pub value: String,
    pub message: String,
}

/// A row that was skipped entirely.
#[derive(Debug, Clone)]
pub struct SkippedRow {
    pub row: usize,
    pub reason: String,
    pub missing_fields: Vec<String>,
}

impl CoercionResult {
    /// Summary line for logs.
    pub fn summary(&self) -> String {
        format!(
            "Coerced: {} records, {} field issues, {} rows skipped",
            self.records.len(),
            self.issues.len(),
            self.skipped.len()
        )
    }
}

/// Coerce raw row objects into typed transaction records.
///
/// Accepts both string-valued rows (CSV parsing) and natively typed rows
/// (JSON input); every field reader understands both shapes.
pub fn coerce_rows(rows: &[Value]) -> CoercionResult {
    let mut result = CoercionResult::default();

    for (index, row) in rows.iter().enumerate() {
        let Some(obj) = row.as_object() else {
            result.skipped.push(SkippedRow {
                row: index,
                reason: "row is not an object".into(),
                missing_fields: Vec::new(),
            });
            continue;
        };

        match coerce_row(obj, index, &mut result.issues) {
            Ok(record) => result.records.push(record),
            Err(skip) => result.skipped.push(skip),
        }
    }

    if !result.skipped.is_empty() {
        log::warn!(
            "{} of {} rows skipped during coercion",
            result.skipped.len(),
            rows.len()
        );
    }

    result
}

/// Coerce records from a JSON array (e.g. a previously exported dataset).
pub fn records_from_json(json: &str) -> DatasetResult<CoercionResult> {
    let rows: Vec<Value> = serde_json::from_str(json)?;
    Ok(coerce_rows(&rows))
}

fn coerce_row(
    obj: &Map<String, Value>,
    index: usize,
    issues: &mut Vec<FieldIssue>,
) -> Result<TransactionRecord, SkippedRow> {
    let mut reader = FieldReader {
        obj,
        index,
        issues,
    };

    // Required keys first; collect all misses so the skip names every one.
    let transaction_id = reader.string_field("TransactionID");
    let store_id = reader.string_field("StoreID");
    let sku_id = reader.string_field("SKU_ID");
    let date_raw = reader.string_field("Date");

    let (transaction_id, store_id, sku_id, date_raw) =
        match (transaction_id, store_id, sku_id, date_raw) {
            (Some(t), Some(s), Some(k), Some(d)) => (t, s, k, d),
            (t, s, k, d) => {
                let missing: Vec<String> = [
                    ("TransactionID", t.is_none()),
                    ("StoreID", s.is_none()),
                    ("SKU_ID", k.is_none()),
                    ("Date", d.is_none()),
                ]
                .iter()
                .filter(|(_, absent)| *absent)
                .map(|(name, _)| name.to_string())
                .collect();

                return Err(SkippedRow {
                    row: index,
                    reason: format!("Missing: {}", missing.join(", ")),
                    missing_fields: missing,
                });
            }
        };

    let Some(date) = parse_date(&date_raw) else {
        return Err(SkippedRow {
            row: index,
            reason: format!("Unusable date '{date_raw}' (expected YYYY-MM-DD)"),
            missing_fields: vec!["Date".into()],
        });
    };

    let mut record = TransactionRecord::new(transaction_id, date, store_id, sku_id);

    record.quantity_sold = reader.u32_field("QuantitySold");
    record.unit_price = reader.f64_field("UnitPrice");
    record.revenue = reader.f64_field("Revenue");
    record.promotion_id = reader.string_field("PromotionID");
    record.promotion_type = reader.string_field("PromotionType");
    record.foot_traffic_count = reader.u32_field("FootTrafficCount");
    record.current_stock_level = reader.u32_field("CurrentStockLevel");
    record.restock_date = reader.date_field("RestockDate");
    record.last_restock_date = reader.date_field("LastRestockDate");
    record.stockout_days = reader.u32_field("StockoutDays");
    record.supplier_id = reader.string_field("SupplierID");
    record.supplier_name = reader.string_field("SupplierName");
    record.lead_time = reader.lead_time_field("LeadTime");
    record.stockout_risk_score = reader.f64_field("StockoutRiskScore");
    record.recommended_restock_quantity = reader.u32_field("RecommendedRestockQuantity");
    record.recommended_restock_date = reader.date_field("RecommendedRestockDate");
    record.cluster_id = reader.string_field("ClusterID");
    record.performance_issue = reader.string_field("PerformanceIssue");
    record.anomaly_flag = reader.flag_field("AnomalyFlag");
    record.anomaly_type = reader.string_field("AnomalyType");

    Ok(record)
}

fn parse_date(raw: &str) -> Option<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Reads one raw row, recording an issue whenever a value is nulled out.
struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    index: usize,
    issues: &'a mut Vec<FieldIssue>,
}

impl FieldReader<'_> {
    /// The raw field value, with JSON null folded into absence.
    fn raw(&self, field: &str) -> Option<&Value> {
        self.obj.get(field).filter(|v| !v.is_null())
    }

    fn issue(&mut self, field: &str, value: &Value, message: impl Into<String>) {
        self.issues.push(FieldIssue {
            row: self.index,
            field: field.to_string(),
            value: value_preview(value),
            message: message.into(),
        });
    }

    fn string_field(&mut self, field: &str) -> Option<String> {
        match self.raw(field)? {
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            other => Some(value_preview(other)),
        }
    }

    fn u32_field(&mut self, field: &str) -> Option<u32> {
        let value = self.raw(field)?.clone();
        match &value {
            Value::Number(n) => match n.as_u64().and_then(|v| u32::try_from(v).ok()) {
                Some(v) => Some(v),
                None => {
                    self.issue(field, &value, "not a non-negative integer");
                    None
                }
            },
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<u32>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        self.issue(field, &value, "not a non-negative integer");
                        None
                    }
                }
            }
            _ => {
                self.issue(field, &value, "not a number");
                None
            }
        }
    }

    fn f64_field(&mut self, field: &str) -> Option<f64> {
        let value = self.raw(field)?.clone();
        match &value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return None;
                }
                match trimmed.parse::<f64>() {
                    Ok(v) => Some(v),
                    Err(_) => {
                        self.issue(field, &value, "not a number");
                        None
                    }
                }
            }
            _ => {
                self.issue(field, &value, "not a number");
                None
            }
        }
    }

    fn date_field(&mut self, field: &str) -> Option<chrono::NaiveDate> {
        let raw = self.string_field(field)?;
        match parse_date(&raw) {
            Some(date) => Some(date),
            None => {
                let value = Value::String(raw);
                self.issue(field, &value, "not an ISO date");
                None
            }
        }
    }

    fn lead_time_field(&mut self, field: &str) -> Option<LeadTime> {
        let raw = self.string_field(field)?;
        match raw.parse::<LeadTime>() {
            Ok(lead_time) => Some(lead_time),
            Err(message) => {
                let value = Value::String(raw);
                self.issue(field, &value, message);
                None
            }
        }
    }

    /// Boolean-as-integer: `1`/`true` set the flag, everything else clears it.
    fn flag_field(&mut self, field: &str) -> bool {
        match self.raw(field) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().is_some_and(|v| v != 0),
            Some(Value::String(s)) => matches!(s.trim(), "1" | "true" | "True"),
            _ => false,
        }
    }
}

fn value_preview(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// =============================================================================
// Embedded sample dataset
// =============================================================================

/// The embedded sample dataset, as CSV text.
pub fn sample_csv() -> &'static str {
    include_str!("../../data/sample_transactions.csv")
}

/// The embedded sample dataset, coerced into typed records.
pub fn sample_records() -> Vec<TransactionRecord> {
    let table = read_table_bytes(sample_csv().as_bytes()).expect("Invalid embedded sample dataset");
    let result = coerce_rows(&table.rows);
    debug_assert!(result.skipped.is_empty(), "embedded sample rows must all coerce");
    result.records
}
