use chrono::{TimeZone, Utc};
use qrtag_admin_stock::{compute_stock_summary, QrCodeRecord, QrStatus, QrType, StockSummary};
use rand::seq::SliceRandom;
use rand::thread_rng;

fn record(code: String, qr_type: QrType, is_activated: bool) -> QrCodeRecord {
    let created = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    QrCodeRecord {
        code,
        qr_type,
        is_activated,
        details: serde_json::Value::Null,
        contact: serde_json::Value::Null,
        status: if is_activated { QrStatus::Active } else { QrStatus::Inactive },
        scan_count: 0,
        last_scanned: None,
        created_at: created,
        updated_at: created,
    }
}

fn batch(prefix: &str, qr_type: QrType, count: usize, activated: usize) -> Vec<QrCodeRecord> {
    (0..count)
        .map(|i| record(format!("{}-{}", prefix, i), qr_type, i < activated))
        .collect()
}

#[test]
fn test_mixed_supplier_stock() {
    let mut records = batch("ITEM", QrType::Item, 6, 4);
    records.extend(batch("PET", QrType::Pet, 4, 1));

    let report = compute_stock_summary(&records);

    assert_eq!(
        report.get(QrType::Item),
        Some(&StockSummary {
            total: 6,
            activated: 4,
            remaining: 2,
        })
    );
    assert_eq!(
        report.get(QrType::Pet),
        Some(&StockSummary {
            total: 4,
            activated: 1,
            remaining: 3,
        })
    );
    assert_eq!(
        report.summary,
        StockSummary {
            total: 10,
            activated: 5,
            remaining: 5,
        }
    );
}

#[test]
fn test_counts_reconcile() {
    let mut records = batch("ITEM", QrType::Item, 17, 9);
    records.extend(batch("PET", QrType::Pet, 3, 3));
    records.extend(batch("X", QrType::Unknown, 5, 0));

    let report = compute_stock_summary(&records);

    let bucket_total: u64 = report.stock.values().map(|b| b.total).sum();
    assert_eq!(report.summary.total, bucket_total);
    for bucket in report.stock.values() {
        assert!(bucket.activated <= bucket.total);
        assert_eq!(bucket.activated + bucket.remaining, bucket.total);
    }
    assert_eq!(
        report.summary.activated + report.summary.remaining,
        report.summary.total
    );
}

#[test]
fn test_order_independent() {
    let mut records = batch("ITEM", QrType::Item, 20, 7);
    records.extend(batch("PET", QrType::Pet, 11, 6));
    let expected = compute_stock_summary(&records);

    let mut rng = thread_rng();
    for _ in 0..10 {
        records.shuffle(&mut rng);
        assert_eq!(compute_stock_summary(&records), expected);
    }
}

#[test]
fn test_only_pet_records() {
    let records = batch("PET", QrType::Pet, 2, 0);

    let report = compute_stock_summary(&records);

    assert!(report.get(QrType::Item).is_none());
    assert!(report.get(QrType::Unknown).is_none());
    assert_eq!(report.types().count(), 1);
    assert_eq!(report.get(QrType::Pet).and_then(|b| b.activation_rate()), Some(0.0));
}
