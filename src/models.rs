//! Records exchanged with the `/admin/*` endpoints

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use qrtag_admin_stock::{QrCodeRecord, QrStatus, QrType, StockReport};

/// Which side of the supply chain a party sits on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyKind {
    Supplier,
    Client,
}

impl PartyKind {
    /// Collection segment under `/admin`
    pub fn collection(&self) -> &'static str {
        match self {
            Self::Supplier => "suppliers",
            Self::Client => "clients",
        }
    }
}

impl fmt::Display for PartyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supplier => f.write_str("supplier"),
            Self::Client => f.write_str("client"),
        }
    }
}

fn default_true() -> bool {
    true
}

/// A supplier or client that QR codes get assigned to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Fields for creating a supplier or client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewParty {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Headline numbers for the dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default, rename = "totalQRCodes", alias = "totalQrCodes")]
    pub total_qr_codes: u64,
    #[serde(default, rename = "activatedQRCodes", alias = "activatedQrCodes")]
    pub activated_qr_codes: u64,
    #[serde(default, rename = "totalUsers")]
    pub total_users: u64,
    #[serde(default, rename = "totalScans")]
    pub total_scans: u64,
    /// Anything else the backend reports
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// Filters for `GET /admin/qr-codes`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QrCodeQuery {
    pub qr_type: Option<QrType>,
    pub status: Option<QrStatus>,
    pub is_activated: Option<bool>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl QrCodeQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn qr_type(mut self, qr_type: QrType) -> Self {
        self.qr_type = Some(qr_type);
        self
    }

    pub fn status(mut self, status: QrStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn activated(mut self, is_activated: bool) -> Self {
        self.is_activated = Some(is_activated);
        self
    }

    pub fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Query string pairs, skipping unset filters
    pub(crate) fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(qr_type) = self.qr_type {
            pairs.push(("type".to_string(), qr_type.to_string()));
        }
        if let Some(status) = self.status {
            let status = serde_json::to_value(status)
                .ok()
                .and_then(|v| v.as_str().map(str::to_string));
            if let Some(status) = status {
                pairs.push(("status".to_string(), status));
            }
        }
        if let Some(is_activated) = self.is_activated {
            pairs.push(("isActivated".to_string(), is_activated.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pages: u32,
}

/// One page of QR codes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrCodePage {
    pub qr_codes: Vec<QrCodeRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Stock report tagged with the supplier it was computed for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierStock {
    pub supplier_id: String,
    #[serde(flatten)]
    pub report: StockReport,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_party_defaults_to_active() {
        let party: Party = serde_json::from_value(json!({
            "_id": "s1",
            "name": "Acme Tags",
            "contactName": "Jo"
        }))
        .unwrap();

        assert_eq!(party.id, "s1");
        assert_eq!(party.contact_name.as_deref(), Some("Jo"));
        assert!(party.is_active);
    }

    #[test]
    fn test_query_pairs() {
        let query = QrCodeQuery::new()
            .qr_type(QrType::Pet)
            .status(QrStatus::Found)
            .page(2, 50);

        assert_eq!(
            query.to_pairs(),
            vec![
                ("type".to_string(), "pet".to_string()),
                ("status".to_string(), "found".to_string()),
                ("page".to_string(), "2".to_string()),
                ("limit".to_string(), "50".to_string()),
            ]
        );
        assert!(QrCodeQuery::new().to_pairs().is_empty());
    }

    #[test]
    fn test_stats_keep_unknown_fields() {
        let stats: DashboardStats = serde_json::from_value(json!({
            "totalQRCodes": 120,
            "activatedQRCodes": 45,
            "totalUsers": 30,
            "recentScans": 7
        }))
        .unwrap();

        assert_eq!(stats.total_qr_codes, 120);
        assert_eq!(stats.activated_qr_codes, 45);
        assert_eq!(stats.total_scans, 0);
        assert_eq!(stats.extra.get("recentScans"), Some(&json!(7)));
    }
}
