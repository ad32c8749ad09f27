//! Sales trend aggregation: revenue and quantity sums per date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{TransactionRecord, TrendPoint};

/// Sum revenue and quantity sold over all records sharing a date.
///
/// Null values count as zero (standard sum-ignoring-nulls semantics), so
/// every distinct date in the input produces a point even if all of its
/// values are null. Output is sorted ascending by date, the order the
/// line chart expects.
pub fn sales_trend(records: &[TransactionRecord]) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<NaiveDate, (f64, u64)> = BTreeMap::new();

    for record in records {
        let entry = totals.entry(record.date).or_insert((0.0, 0));
        entry.0 += record.revenue.unwrap_or(0.0);
        entry.1 += u64::from(record.quantity_sold.unwrap_or(0));
    }

    totals
        .into_iter()
        .map(|(date, (total_revenue, total_quantity_sold))| TrendPoint {
            date,
            total_revenue,
            total_quantity_sold,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, revenue: Option<f64>, quantity: Option<u32>) -> TransactionRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        let mut record = TransactionRecord::new("T0001", date, "S001", "P001");
        record.revenue = revenue;
        record.quantity_sold = quantity;
        record
    }

    #[test]
    fn test_sums_per_date() {
        let records = vec![
            record("2023-01-01", Some(100.0), Some(2)),
            record("2023-01-01", Some(50.0), Some(1)),
        ];

        let trend = sales_trend(&records);

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].date.to_string(), "2023-01-01");
        assert!((trend[0].total_revenue - 150.0).abs() < 1e-9);
        assert_eq!(trend[0].total_quantity_sold, 3);
    }

    #[test]
    fn test_null_counts_as_zero() {
        let records = vec![
            record("2023-01-01", Some(100.0), None),
            record("2023-01-01", None, Some(4)),
        ];

        let trend = sales_trend(&records);

        assert!((trend[0].total_revenue - 100.0).abs() < 1e-9);
        assert_eq!(trend[0].total_quantity_sold, 4);
    }

    #[test]
    fn test_all_null_date_still_present() {
        let records = vec![record("2023-01-02", None, None)];

        let trend = sales_trend(&records);

        assert_eq!(trend.len(), 1);
        assert_eq!(trend[0].total_revenue, 0.0);
        assert_eq!(trend[0].total_quantity_sold, 0);
    }

    #[test]
    fn test_chronological_order() {
        let records = vec![
            record("2023-01-05", Some(10.0), Some(1)),
            record("2023-01-01", Some(20.0), Some(2)),
            record("2023-01-03", Some(30.0), Some(3)),
        ];

        let trend = sales_trend(&records);
        let dates: Vec<String> = trend.iter().map(|p| p.date.to_string()).collect();

        assert_eq!(dates, vec!["2023-01-01", "2023-01-03", "2023-01-05"]);
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert!(sales_trend(&[]).is_empty());
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            record("2023-01-01", Some(100.0), Some(2)),
            record("2023-01-02", Some(50.0), Some(1)),
        ];

        assert_eq!(sales_trend(&records), sales_trend(&records));
    }
}
