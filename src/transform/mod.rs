//! Aggregation transforms.
//!
//! One pure function per chart mode, plus the mode dispatch and the
//! high-level report pipeline:
//! - Risk: average stockout risk per SKU
//! - Trend: revenue/quantity sums per date
//! - Cluster: four-field scatter projection
//! - Pipeline: parse, coerce, validate, aggregate

pub mod cluster;
pub mod pipeline;
pub mod risk;
pub mod trend;

pub use cluster::cluster_points;
pub use pipeline::*;
pub use risk::risk_by_sku;
pub use trend::sales_trend;

use serde::Serialize;

use crate::models::{ChartMode, ClusterPoint, RiskBySku, TransactionRecord, TrendPoint};

/// The derived table for one chart mode.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ChartData {
    StockoutRisk(Vec<RiskBySku>),
    SalesTrend(Vec<TrendPoint>),
    ClusterAnalysis(Vec<ClusterPoint>),
}

impl ChartData {
    /// Number of derived rows.
    pub fn len(&self) -> usize {
        match self {
            Self::StockoutRisk(rows) => rows.len(),
            Self::SalesTrend(rows) => rows.len(),
            Self::ClusterAnalysis(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Run exactly one transform, selected by mode.
///
/// This is the selector-driven render branch: nothing is cached or shared
/// between calls, and the other two transforms do not run.
pub fn run_mode(records: &[TransactionRecord], mode: ChartMode) -> ChartData {
    match mode {
        ChartMode::StockoutRisk => ChartData::StockoutRisk(risk_by_sku(records)),
        ChartMode::SalesTrend => ChartData::SalesTrend(sales_trend(records)),
        ChartMode::ClusterAnalysis => ChartData::ClusterAnalysis(cluster_points(records)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::sample_records;
    use crate::models::ALL_MODES;

    #[test]
    fn test_run_mode_dispatch() {
        let records = sample_records();

        assert!(matches!(
            run_mode(&records, ChartMode::StockoutRisk),
            ChartData::StockoutRisk(_)
        ));
        assert!(matches!(
            run_mode(&records, ChartMode::SalesTrend),
            ChartData::SalesTrend(_)
        ));
        assert!(matches!(
            run_mode(&records, ChartMode::ClusterAnalysis),
            ChartData::ClusterAnalysis(_)
        ));
    }

    #[test]
    fn test_empty_dataset_yields_empty_results() {
        for mode in ALL_MODES {
            let data = run_mode(&[], mode);
            assert!(data.is_empty(), "{mode} should be empty for an empty dataset");
        }
    }
}
