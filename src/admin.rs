//! Typed access to the `/admin/*` endpoints
//!
//! Every call goes through the gateway client. A 401 from any of them
//! means the token is no longer accepted, so the session is dropped via
//! the auth controller before the error is handed back unchanged.

use serde::de::DeserializeOwned;
use serde_json::json;

use log::debug;

use qrtag_admin_stock::{compute_stock_summary, QrCodeRecord};

use crate::auth::AuthController;
use crate::error::{Error, Result};
use crate::fetch::{ApiClient, ApiResponse, RequestOptions};
use crate::models::{
    DashboardStats, NewParty, Party, PartyKind, QrCodePage, QrCodeQuery, SupplierStock,
};

/// Client for the admin dashboard endpoints
#[derive(Debug, Clone)]
pub struct AdminApi {
    api: ApiClient,
    auth: AuthController,
}

impl AdminApi {
    pub fn new(api: ApiClient, auth: AuthController) -> Self {
        Self { api, auth }
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T> {
        let result = self
            .api
            .request::<T>(endpoint, options)
            .await
            .and_then(ApiResponse::into_data);

        if let Err(err) = &result {
            if err.is_unauthorized() {
                self.auth.invalidate();
            }
        }
        result
    }

    /// Dashboard headline numbers
    pub async fn stats(&self) -> Result<DashboardStats> {
        self.fetch("/admin/stats", RequestOptions::get()).await
    }

    /// List QR codes matching `query`
    pub async fn qr_codes(&self, query: &QrCodeQuery) -> Result<QrCodePage> {
        let mut options = RequestOptions::get();
        for (key, value) in query.to_pairs() {
            options = options.query(&key, &value);
        }
        self.fetch("/admin/qr-codes", options).await
    }

    pub async fn users(&self) -> Result<Vec<serde_json::Value>> {
        self.fetch("/admin/users", RequestOptions::get()).await
    }

    pub async fn analytics(&self) -> Result<serde_json::Value> {
        self.fetch("/admin/analytics", RequestOptions::get()).await
    }

    pub async fn suppliers(&self) -> Result<Vec<Party>> {
        self.parties(PartyKind::Supplier).await
    }

    pub async fn clients(&self) -> Result<Vec<Party>> {
        self.parties(PartyKind::Client).await
    }

    async fn parties(&self, kind: PartyKind) -> Result<Vec<Party>> {
        let endpoint = format!("/admin/{}", kind.collection());
        self.fetch(&endpoint, RequestOptions::get()).await
    }

    /// Create a supplier or client; the name must not be blank
    pub async fn create_party(&self, kind: PartyKind, party: &NewParty) -> Result<Party> {
        if party.name.trim().is_empty() {
            return Err(Error::validation(format!("{} name is required", kind)));
        }

        let endpoint = format!("/admin/{}", kind.collection());
        self.fetch(&endpoint, RequestOptions::post().json(party)?).await
    }

    /// QR codes currently assigned to a party
    pub async fn assigned_qr_codes(
        &self,
        kind: PartyKind,
        id: &str,
    ) -> Result<Vec<QrCodeRecord>> {
        let endpoint = format!("/admin/{}/{}/qr-codes", kind.collection(), id);
        self.fetch(&endpoint, RequestOptions::get()).await
    }

    /// Assign `codes` to a party, returning the updated records
    pub async fn assign_qr_codes(
        &self,
        kind: PartyKind,
        id: &str,
        codes: &[String],
    ) -> Result<Vec<QrCodeRecord>> {
        if codes.is_empty() {
            return Err(Error::validation("at least one QR code is required"));
        }

        let endpoint = format!("/admin/{}/{}/assign", kind.collection(), id);
        let body = json!({ "qrCodes": codes });
        self.fetch(&endpoint, RequestOptions::post().json(&body)?).await
    }

    /// Stock balance for one supplier
    ///
    /// The result carries the supplier id, so callers can key concurrent
    /// fetches for different suppliers by it.
    pub async fn stock_balance(&self, supplier_id: &str) -> Result<SupplierStock> {
        let records = self
            .assigned_qr_codes(PartyKind::Supplier, supplier_id)
            .await?;
        debug!(
            "computing stock for supplier {} over {} records",
            supplier_id,
            records.len()
        );

        Ok(SupplierStock {
            supplier_id: supplier_id.to_string(),
            report: compute_stock_summary(&records),
        })
    }
}
