//! Stockout risk aggregation: mean risk score per SKU.

use std::collections::BTreeMap;

use crate::models::{RiskBySku, TransactionRecord};

/// Average the stockout risk score over all records sharing a SKU.
///
/// Standard mean semantics: records with a null score contribute to
/// neither the sum nor the count. A SKU whose every score is null has no
/// defined mean and is omitted from the output (the JSON output format
/// cannot carry NaN). Output is sorted ascending by SKU for determinism.
pub fn risk_by_sku(records: &[TransactionRecord]) -> Vec<RiskBySku> {
    let mut totals: BTreeMap<&str, (f64, u32)> = BTreeMap::new();

    for record in records {
        let Some(score) = record.stockout_risk_score else {
            continue;
        };
        let entry = totals.entry(record.sku_id.as_str()).or_insert((0.0, 0));
        entry.0 += score;
        entry.1 += 1;
    }

    totals
        .into_iter()
        .map(|(sku_id, (sum, count))| RiskBySku {
            sku_id: sku_id.to_string(),
            average_risk: sum / f64::from(count),
        })
        .collect()
}
