//! JSON Schema validation for transaction records.
//!
//! Records are validated against a JSON Schema Draft 7 description of the
//! dataset row format, embedded at compile time from
//! `schemas/transaction-record.json`.
//!
//! Validation is advisory, in keeping with the dataset's null-tolerant
//! aggregation semantics: the pipeline counts and reports invalid records,
//! it does not refuse them.
//!
//! # Example
//!
//! ```rust,ignore
//! use serde_json::json;
//! use shelfsight::{is_valid_record, validate_record};
//!
//! let record = json!({
//!     "TransactionID": "T0001",
//!     "Date": "2023-01-01",
//!     "StoreID": "S001",
//!     "SKU_ID": "P001",
//!     "StockoutRiskScore": 0.85
//! });
//! assert!(validate_record(&record).is_ok());
//! ```

use once_cell::sync::Lazy;
use serde_json::Value;

static RECORD_SCHEMA: Lazy<Value> = Lazy::new(|| {
    serde_json::from_str(include_str!("../../schemas/transaction-record.json"))
        .expect("Invalid embedded schema")
});

static RECORD_VALIDATOR: Lazy<jsonschema::Validator> = Lazy::new(|| {
    jsonschema::draft7::new(&RECORD_SCHEMA).expect("Invalid embedded schema")
});

/// Validate a JSON object against a JSON schema.
///
/// # Returns
/// * `Ok(())` if valid
/// * `Err(Vec<String>)` with one message per violation
pub fn validate(schema: &Value, data: &Value) -> Result<(), Vec<String>> {
    let validator = jsonschema::draft7::new(schema)
        .map_err(|e| vec![format!("Invalid schema: {}", e)])?;

    let errors: Vec<String> = validator
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Boolean-only variant of [`validate`].
pub fn is_valid(schema: &Value, data: &Value) -> bool {
    jsonschema::draft7::is_valid(schema, data)
}

/// Validate a record object against the transaction record schema.
pub fn validate_record(data: &Value) -> Result<(), Vec<String>> {
    let errors: Vec<String> = RECORD_VALIDATOR
        .iter_errors(data)
        .map(|e| e.to_string())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Quick check against the transaction record schema.
pub fn is_valid_record(data: &Value) -> bool {
    RECORD_VALIDATOR.is_valid(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_record() -> Value {
        json!({
            "TransactionID": "T0001",
            "Date": "2023-01-01",
            "StoreID": "S001",
            "SKU_ID": "P001"
        })
    }

    #[test]
    fn test_minimal_record_valid() {
        assert!(validate_record(&minimal_record()).is_ok());
    }

    #[test]
    fn test_full_record_valid() {
        let record = json!({
            "TransactionID": "T0001",
            "Date": "2023-01-01",
            "StoreID": "S001",
            "SKU_ID": "P001",
            "QuantitySold": 5,
            "UnitPrice": 50.0,
            "Revenue": 250.0,
            "PromotionID": "PR001",
            "PromotionType": "Discount",
            "FootTrafficCount": 250,
            "CurrentStockLevel": 15,
            "RestockDate": "2023-01-06",
            "LastRestockDate": "2022-12-30",
            "StockoutDays": 0,
            "SupplierID": "SUP001",
            "SupplierName": "Supplier A",
            "LeadTime": "5 days",
            "StockoutRiskScore": 0.85,
            "RecommendedRestockQuantity": 50,
            "RecommendedRestockDate": "2023-01-04",
            "ClusterID": "C1",
            "PerformanceIssue": "Low Conversion Rate",
            "AnomalyFlag": 0,
            "AnomalyType": ""
        });
        assert!(validate_record(&record).is_ok());
    }

    #[test]
    fn test_missing_required_key_invalid() {
        let record = json!({
            "TransactionID": "T0001",
            "Date": "2023-01-01",
            "StoreID": "S001"
        });
        let errors = validate_record(&record).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("SKU_ID")));
    }

    #[test]
    fn test_negative_quantity_invalid() {
        let mut record = minimal_record();
        record["QuantitySold"] = json!(-3);
        assert!(!is_valid_record(&record));
    }

    #[test]
    fn test_malformed_date_invalid() {
        let mut record = minimal_record();
        record["Date"] = json!("01/01/2023");
        assert!(!is_valid_record(&record));
    }

    #[test]
    fn test_risk_score_unbounded() {
        // Scores outside [0, 1] are a convention violation, not a schema one
        let mut record = minimal_record();
        record["StockoutRiskScore"] = json!(1.7);
        assert!(is_valid_record(&record));
    }

    #[test]
    fn test_generic_validate() {
        let schema = json!({
            "type": "object",
            "required": ["name"],
            "properties": { "name": { "type": "string" } }
        });

        assert!(validate(&schema, &json!({ "name": "test" })).is_ok());
        assert!(validate(&schema, &json!({ "age": 42 })).is_err());
    }
}
