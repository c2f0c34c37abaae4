//! Types for QR-code records as returned by the admin backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// QR code category
///
/// The set is closed: any wire value other than `item` or `pet` lands in
/// `Unknown` so it still gets counted, in its own bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum QrType {
    Item,
    Pet,
    Unknown,
}

impl QrType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Pet => "pet",
            Self::Unknown => "unknown",
        }
    }
}

impl From<String> for QrType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<&str> for QrType {
    fn from(value: &str) -> Self {
        match value {
            "item" => Self::Item,
            "pet" => Self::Pet,
            _ => Self::Unknown,
        }
    }
}

impl From<QrType> for String {
    fn from(value: QrType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for QrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a QR code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrStatus {
    Active,
    Inactive,
    Suspended,
    Found,
}

impl Default for QrStatus {
    fn default() -> Self {
        Self::Inactive
    }
}

/// A QR code record owned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeRecord {
    /// Unique code printed on the tag
    pub code: String,

    /// Category of the tagged asset
    #[serde(rename = "type")]
    pub qr_type: QrType,

    /// Whether an end user has claimed the code
    #[serde(default)]
    pub is_activated: bool,

    /// Free-form asset details entered on activation
    #[serde(default)]
    pub details: serde_json::Value,

    /// Owner contact info entered on activation
    #[serde(default)]
    pub contact: serde_json::Value,

    #[serde(default)]
    pub status: QrStatus,

    #[serde(default)]
    pub scan_count: u64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_scanned: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Derived stock counts for one bucket or for a whole party
///
/// `remaining` is always `total - activated`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockSummary {
    pub total: u64,
    pub activated: u64,
    pub remaining: u64,
}

impl StockSummary {
    /// Count one record
    pub(crate) fn record(&mut self, activated: bool) {
        self.total += 1;
        if activated {
            self.activated += 1;
        } else {
            self.remaining += 1;
        }
    }

    pub(crate) fn absorb(&mut self, other: &StockSummary) {
        self.total += other.total;
        self.activated += other.activated;
        self.remaining += other.remaining;
    }

    /// Activated share in percent, `None` for an empty bucket
    pub fn activation_rate(&self) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        Some(self.activated as f64 / self.total as f64 * 100.0)
    }
}
