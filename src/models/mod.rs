//! Domain models for the shelfsight report pipeline.
//!
//! This module contains the core data structures used throughout the pipeline:
//!
//! - [`TransactionRecord`] - one row of the sales dataset, explicitly typed
//! - [`ChartMode`] - the dashboard selector (one of three chart modes)
//! - [`LeadTime`] - supplier lead time, `"5 days"` on the wire
//! - [`RiskBySku`] / [`TrendPoint`] / [`ClusterPoint`] - derived chart rows

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Chart Mode
// =============================================================================

/// The dashboard chart selector.
///
/// The presenter picks exactly one mode per render pass; the mode token
/// strings are the literal sidebar labels of the dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ChartMode {
    /// Average stockout risk per SKU (bar chart).
    #[serde(rename = "Stockout Risk")]
    StockoutRisk,
    /// Revenue and quantity sold over time (line chart).
    #[serde(rename = "Sales Trend")]
    SalesTrend,
    /// Foot traffic vs revenue scatter, colored by cluster.
    #[serde(rename = "Cluster Analysis")]
    ClusterAnalysis,
}

/// All modes, in sidebar order.
pub const ALL_MODES: [ChartMode; 3] = [
    ChartMode::StockoutRisk,
    ChartMode::SalesTrend,
    ChartMode::ClusterAnalysis,
];

impl ChartMode {
    /// Parse a mode from its selector token.
    ///
    /// Accepts the literal sidebar labels plus kebab-case and short CLI
    /// aliases. Returns `None` for anything else.
    pub fn from_token(token: &str) -> Option<Self> {
        let normalized = token.trim().to_lowercase();
        match normalized.as_str() {
            "stockout risk" | "stockout-risk" | "stockout" | "risk" => Some(Self::StockoutRisk),
            "sales trend" | "sales-trend" | "sales" | "trend" => Some(Self::SalesTrend),
            "cluster analysis" | "cluster-analysis" | "cluster" | "clusters" => {
                Some(Self::ClusterAnalysis)
            }
            _ => None,
        }
    }

    /// The canonical selector token.
    pub fn token(&self) -> &'static str {
        match self {
            Self::StockoutRisk => "Stockout Risk",
            Self::SalesTrend => "Sales Trend",
            Self::ClusterAnalysis => "Cluster Analysis",
        }
    }

    /// The chart header shown above the rendered figure.
    pub fn title(&self) -> &'static str {
        match self {
            Self::StockoutRisk => "Predictive Stockout Risk Model",
            Self::SalesTrend => "Sales Trend Analysis",
            Self::ClusterAnalysis => "Root Cause Analysis via Clustering",
        }
    }
}

impl fmt::Display for ChartMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

// =============================================================================
// Lead Time
// =============================================================================

static LEAD_TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\s*(\d+)\s*(?:days?)?\s*$").expect("invalid lead time regex"));

/// Supplier lead time in whole days.
///
/// The source data carries lead times as strings like `"5 days"`; this
/// newtype keeps that wire format while exposing a numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LeadTime(pub u32);

impl LeadTime {
    /// Lead time in days.
    pub fn days(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LeadTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 1 {
            write!(f, "1 day")
        } else {
            write!(f, "{} days", self.0)
        }
    }
}

impl FromStr for LeadTime {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = LEAD_TIME_RE
            .captures(s)
            .ok_or_else(|| format!("not a lead time: '{s}'"))?;
        let days = captures[1]
            .parse::<u32>()
            .map_err(|e| format!("lead time out of range: {e}"))?;
        Ok(LeadTime(days))
    }
}

impl TryFrom<String> for LeadTime {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LeadTime> for String {
    fn from(value: LeadTime) -> Self {
        value.to_string()
    }
}

// =============================================================================
// Transaction Record
// =============================================================================

/// One row of the sales dataset.
///
/// Serde field names match the source column names exactly, so serialized
/// records round-trip with the dataset's own format. Fields that feed
/// aggregations ([`StockoutRiskScore`](Self::stockout_risk_score),
/// [`Revenue`](Self::revenue), [`QuantitySold`](Self::quantity_sold),
/// [`FootTrafficCount`](Self::foot_traffic_count)) are optional: a missing
/// value is null, never an error, and the transforms define what null means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique transaction identifier.
    #[serde(rename = "TransactionID")]
    pub transaction_id: String,
    /// Transaction date (group key for the sales trend).
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    /// Store identifier.
    #[serde(rename = "StoreID")]
    pub store_id: String,
    /// Product identifier (group key for stockout risk).
    #[serde(rename = "SKU_ID")]
    pub sku_id: String,
    #[serde(rename = "QuantitySold", default, skip_serializing_if = "Option::is_none")]
    pub quantity_sold: Option<u32>,
    #[serde(rename = "UnitPrice", default, skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<f64>,
    /// Expected to equal quantity x price, but never enforced.
    #[serde(rename = "Revenue", default, skip_serializing_if = "Option::is_none")]
    pub revenue: Option<f64>,
    #[serde(rename = "PromotionID", default, skip_serializing_if = "Option::is_none")]
    pub promotion_id: Option<String>,
    #[serde(rename = "PromotionType", default, skip_serializing_if = "Option::is_none")]
    pub promotion_type: Option<String>,
    #[serde(rename = "FootTrafficCount", default, skip_serializing_if = "Option::is_none")]
    pub foot_traffic_count: Option<u32>,
    #[serde(rename = "CurrentStockLevel", default, skip_serializing_if = "Option::is_none")]
    pub current_stock_level: Option<u32>,
    #[serde(rename = "RestockDate", default, skip_serializing_if = "Option::is_none")]
    pub restock_date: Option<NaiveDate>,
    #[serde(rename = "LastRestockDate", default, skip_serializing_if = "Option::is_none")]
    pub last_restock_date: Option<NaiveDate>,
    #[serde(rename = "StockoutDays", default, skip_serializing_if = "Option::is_none")]
    pub stockout_days: Option<u32>,
    #[serde(rename = "SupplierID", default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
    #[serde(rename = "SupplierName", default, skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,
    #[serde(rename = "LeadTime", default, skip_serializing_if = "Option::is_none")]
    pub lead_time: Option<LeadTime>,
    /// Risk score in [0, 1] by convention, not enforced.
    #[serde(rename = "StockoutRiskScore", default, skip_serializing_if = "Option::is_none")]
    pub stockout_risk_score: Option<f64>,
    #[serde(rename = "RecommendedRestockQuantity", default, skip_serializing_if = "Option::is_none")]
    pub recommended_restock_quantity: Option<u32>,
    #[serde(rename = "RecommendedRestockDate", default, skip_serializing_if = "Option::is_none")]
    pub recommended_restock_date: Option<NaiveDate>,
    /// Cluster label assigned upstream; null means unassigned.
    #[serde(rename = "ClusterID", default, skip_serializing_if = "Option::is_none")]
    pub cluster_id: Option<String>,
    #[serde(rename = "PerformanceIssue", default, skip_serializing_if = "Option::is_none")]
    pub performance_issue: Option<String>,
    /// Anomaly marker, `0`/`1` in the source data.
    #[serde(rename = "AnomalyFlag", default, deserialize_with = "bool_from_int")]
    pub anomaly_flag: bool,
    #[serde(rename = "AnomalyType", default, skip_serializing_if = "Option::is_none")]
    pub anomaly_type: Option<String>,
}

/// Accept `true`/`false` as well as the source data's `0`/`1`.
fn bool_from_int<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BoolOrInt {
        Bool(bool),
        Int(i64),
    }

    match BoolOrInt::deserialize(deserializer)? {
        BoolOrInt::Bool(b) => Ok(b),
        BoolOrInt::Int(i) => Ok(i != 0),
    }
}

impl TransactionRecord {
    /// Create a record with the required keys set and everything else null.
    pub fn new(
        transaction_id: impl Into<String>,
        date: NaiveDate,
        store_id: impl Into<String>,
        sku_id: impl Into<String>,
    ) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            date,
            store_id: store_id.into(),
            sku_id: sku_id.into(),
            quantity_sold: None,
            unit_price: None,
            revenue: None,
            promotion_id: None,
            promotion_type: None,
            foot_traffic_count: None,
            current_stock_level: None,
            restock_date: None,
            last_restock_date: None,
            stockout_days: None,
            supplier_id: None,
            supplier_name: None,
            lead_time: None,
            stockout_risk_score: None,
            recommended_restock_quantity: None,
            recommended_restock_date: None,
            cluster_id: None,
            performance_issue: None,
            anomaly_flag: false,
            anomaly_type: None,
        }
    }
}

// =============================================================================
// Derived Chart Rows
// =============================================================================

/// One bar of the stockout risk chart: a SKU and its mean risk score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskBySku {
    #[serde(rename = "SKU_ID")]
    pub sku_id: String,
    #[serde(rename = "AverageRisk")]
    pub average_risk: f64,
}

/// One point of the sales trend chart: a date and its revenue/quantity sums.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "TotalRevenue")]
    pub total_revenue: f64,
    #[serde(rename = "TotalQuantitySold")]
    pub total_quantity_sold: u64,
}

/// One point of the cluster scatter: a four-field projection of an input row.
///
/// Nulls are serialized explicitly so every point has the same shape; the
/// presenter may bucket null cluster ids under "unassigned".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClusterPoint {
    #[serde(rename = "FootTrafficCount")]
    pub foot_traffic_count: Option<u32>,
    #[serde(rename = "Revenue")]
    pub revenue: Option<f64>,
    #[serde(rename = "QuantitySold")]
    pub quantity_sold: Option<u32>,
    #[serde(rename = "ClusterID")]
    pub cluster_id: Option<String>,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_from_token() {
        assert_eq!(ChartMode::from_token("Stockout Risk"), Some(ChartMode::StockoutRisk));
        assert_eq!(ChartMode::from_token("sales trend"), Some(ChartMode::SalesTrend));
        assert_eq!(ChartMode::from_token("cluster-analysis"), Some(ChartMode::ClusterAnalysis));
        assert_eq!(ChartMode::from_token("risk"), Some(ChartMode::StockoutRisk));
        assert_eq!(ChartMode::from_token("Pie Chart"), None);
    }

    #[test]
    fn test_mode_token_roundtrip() {
        for mode in ALL_MODES {
            assert_eq!(ChartMode::from_token(mode.token()), Some(mode));
        }
    }

    #[test]
    fn test_mode_titles() {
        assert_eq!(ChartMode::StockoutRisk.title(), "Predictive Stockout Risk Model");
        assert_eq!(ChartMode::ClusterAnalysis.title(), "Root Cause Analysis via Clustering");
    }

    #[test]
    fn test_lead_time_parse() {
        assert_eq!("5 days".parse::<LeadTime>(), Ok(LeadTime(5)));
        assert_eq!("1 day".parse::<LeadTime>(), Ok(LeadTime(1)));
        assert_eq!("12".parse::<LeadTime>(), Ok(LeadTime(12)));
        assert!("soon".parse::<LeadTime>().is_err());
    }

    #[test]
    fn test_lead_time_display() {
        assert_eq!(LeadTime(5).to_string(), "5 days");
        assert_eq!(LeadTime(1).to_string(), "1 day");
    }

    #[test]
    fn test_record_serialization_uses_source_columns() {
        let mut record = TransactionRecord::new(
            "T0001",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            "S001",
            "P001",
        );
        record.stockout_risk_score = Some(0.85);
        record.lead_time = Some(LeadTime(5));

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["TransactionID"], "T0001");
        assert_eq!(json["SKU_ID"], "P001");
        assert_eq!(json["StockoutRiskScore"], 0.85);
        assert_eq!(json["LeadTime"], "5 days");
        // Null optionals are omitted entirely
        assert!(json.get("PromotionID").is_none());
    }

    #[test]
    fn test_record_anomaly_flag_from_int() {
        let json = r#"{
            "TransactionID": "T0002",
            "Date": "2023-01-02",
            "StoreID": "S002",
            "SKU_ID": "P003",
            "AnomalyFlag": 1,
            "AnomalyType": "Spike"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert!(record.anomaly_flag);
        assert_eq!(record.anomaly_type.as_deref(), Some("Spike"));
    }
}
