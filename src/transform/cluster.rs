//! Cluster scatter projection.

use crate::models::{ClusterPoint, TransactionRecord};

/// Project every record onto the four scatter fields.
///
/// A pure projection: one output row per input row, in input order, no
/// filtering and no deduplication. Rows with a null cluster id pass
/// through unchanged; bucketing them is the presenter's concern.
pub fn cluster_points(records: &[TransactionRecord]) -> Vec<ClusterPoint> {
    records
        .iter()
        .map(|record| ClusterPoint {
            foot_traffic_count: record.foot_traffic_count,
            revenue: record.revenue,
            quantity_sold: record.quantity_sold,
            cluster_id: record.cluster_id.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn record(traffic: Option<u32>, revenue: Option<f64>, cluster: Option<&str>) -> TransactionRecord {
        let mut record = TransactionRecord::new(
            "T0001",
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            "S001",
            "P001",
        );
        record.foot_traffic_count = traffic;
        record.revenue = revenue;
        record.quantity_sold = Some(2);
        record.cluster_id = cluster.map(String::from);
        record
    }

    #[test]
    fn test_row_count_preserved() {
        let records = vec![
            record(Some(250), Some(250.0), Some("C1")),
            record(Some(180), Some(90.0), Some("C2")),
            record(Some(95), Some(160.0), Some("C3")),
        ];

        assert_eq!(cluster_points(&records).len(), records.len());
    }

    #[test]
    fn test_fields_copied_verbatim_in_order() {
        let records = vec![
            record(Some(250), Some(250.0), Some("C1")),
            record(Some(180), Some(90.0), Some("C2")),
        ];

        let points = cluster_points(&records);

        assert_eq!(points[0].foot_traffic_count, Some(250));
        assert_eq!(points[0].revenue, Some(250.0));
        assert_eq!(points[0].cluster_id.as_deref(), Some("C1"));
        assert_eq!(points[1].cluster_id.as_deref(), Some("C2"));
    }

    #[test]
    fn test_null_cluster_passes_through() {
        let records = vec![record(Some(230), Some(80.0), None)];

        let points = cluster_points(&records);

        assert_eq!(points.len(), 1);
        assert_eq!(points[0].cluster_id, None);
        assert_eq!(points[0].foot_traffic_count, Some(230));
    }

    #[test]
    fn test_duplicate_rows_not_deduplicated() {
        let records = vec![
            record(Some(100), Some(50.0), Some("C1")),
            record(Some(100), Some(50.0), Some("C1")),
        ];

        assert_eq!(cluster_points(&records).len(), 2);
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert!(cluster_points(&[]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let records = vec![record(Some(250), Some(250.0), Some("C1"))];

        assert_eq!(cluster_points(&records), cluster_points(&records));
    }
}
