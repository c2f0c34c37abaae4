//! Stock aggregation for the qrtag admin console
//!
//! This crate holds the QR-code record model and turns a party's assigned
//! QR codes into per-type and aggregate total/activated/remaining counts.
//! Everything here is pure computation; fetching the records is left to
//! the caller.

mod types;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use types::*;

/// Stock counts for one party, per type and rolled up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockReport {
    /// Aggregate over every bucket
    pub summary: StockSummary,

    /// One entry per type present in the input
    pub stock: BTreeMap<QrType, StockSummary>,
}

impl StockReport {
    /// Counts for a single type, `None` when no record of that type was seen
    pub fn get(&self, qr_type: QrType) -> Option<&StockSummary> {
        self.stock.get(&qr_type)
    }

    /// Types that have at least one record, in `QrType` order
    pub fn types(&self) -> impl Iterator<Item = QrType> + '_ {
        self.stock.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.stock.is_empty()
    }
}

/// Partition `records` by type and count total/activated/remaining
///
/// Buckets only exist for types that actually occur, and the result does
/// not depend on the order of `records`.
///
/// # Example
///
/// ```
/// use qrtag_admin_stock::{compute_stock_summary, QrType};
///
/// let report = compute_stock_summary(&[]);
/// assert_eq!(report.summary.total, 0);
/// assert!(report.get(QrType::Item).is_none());
/// ```
pub fn compute_stock_summary(records: &[QrCodeRecord]) -> StockReport {
    let mut stock: BTreeMap<QrType, StockSummary> = BTreeMap::new();
    for record in records {
        stock
            .entry(record.qr_type)
            .or_default()
            .record(record.is_activated);
    }

    let mut summary = StockSummary::default();
    for bucket in stock.values() {
        summary.absorb(bucket);
    }

    StockReport { summary, stock }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(code: &str, qr_type: &str, activated: bool) -> QrCodeRecord {
        serde_json::from_value(json!({
            "code": code,
            "type": qr_type,
            "isActivated": activated,
            "status": if activated { "active" } else { "inactive" },
            "scanCount": 0,
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn test_counts_per_type() {
        let records = vec![
            record("A1", "item", true),
            record("A2", "item", false),
            record("P1", "pet", false),
        ];

        let report = compute_stock_summary(&records);

        assert_eq!(
            report.get(QrType::Item),
            Some(&StockSummary {
                total: 2,
                activated: 1,
                remaining: 1,
            })
        );
        assert_eq!(
            report.get(QrType::Pet),
            Some(&StockSummary {
                total: 1,
                activated: 0,
                remaining: 1,
            })
        );
        assert_eq!(
            report.summary,
            StockSummary {
                total: 3,
                activated: 1,
                remaining: 2,
            }
        );
    }

    #[test]
    fn test_absent_type_has_no_bucket() {
        let records = vec![record("A1", "item", true), record("A2", "item", true)];

        let report = compute_stock_summary(&records);

        assert!(report.get(QrType::Pet).is_none());
        assert_eq!(report.types().collect::<Vec<_>>(), vec![QrType::Item]);
    }

    #[test]
    fn test_unrecognized_type_goes_to_unknown_bucket() {
        let records = vec![
            record("E1", "emergency", true),
            record("G1", "general", false),
            record("P1", "pet", true),
        ];

        let report = compute_stock_summary(&records);

        assert_eq!(
            report.get(QrType::Unknown),
            Some(&StockSummary {
                total: 2,
                activated: 1,
                remaining: 1,
            })
        );
        assert_eq!(report.summary.total, 3);
    }

    #[test]
    fn test_empty_input() {
        let report = compute_stock_summary(&[]);

        assert!(report.is_empty());
        assert_eq!(report.summary, StockSummary::default());
    }

    #[test]
    fn test_activation_rate() {
        let empty = StockSummary::default();
        assert_eq!(empty.activation_rate(), None);

        let bucket = StockSummary {
            total: 4,
            activated: 1,
            remaining: 3,
        };
        assert_eq!(bucket.activation_rate(), Some(25.0));
    }

    #[test]
    fn test_report_serializes_with_type_keys() {
        let report = compute_stock_summary(&[record("A1", "item", true)]);

        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["stock"]["item"]["total"], 1);
        assert_eq!(value["summary"]["activated"], 1);
        assert!(value["stock"].get("pet").is_none());
    }
}
