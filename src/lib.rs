//! qrtag admin console core
//!
//! Session handling, authenticated access to the qrtag backend, and
//! stock/activation aggregation over the QR codes assigned to suppliers
//! and clients.

pub mod admin;
pub mod auth;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod session;

pub use qrtag_admin_stock as stock;

use std::sync::Arc;

use crate::admin::AdminApi;
use crate::auth::AuthController;
use crate::config::ClientOptions;
use crate::error::Result;
use crate::fetch::ApiClient;
use crate::session::{FileStorage, SessionStore, TokenStorage};

/// The main entry point for the admin console core
#[derive(Debug, Clone)]
pub struct QrAdmin {
    /// Client options
    pub options: ClientOptions,
    session: SessionStore,
    api: ApiClient,
    auth: AuthController,
    admin: AdminApi,
}

impl QrAdmin {
    /// Create a client from `options`
    ///
    /// With a storage directory configured, a token persisted by an earlier
    /// run is loaded; call `auth().check_auth()` to verify it.
    ///
    /// # Example
    ///
    /// ```
    /// use qrtag_admin::{QrAdmin, config::ClientOptions};
    ///
    /// let options = ClientOptions::default().with_base_url("https://qrtag.example.com/api");
    /// let console = QrAdmin::new(options).unwrap();
    /// assert!(!console.auth().is_authenticated());
    /// ```
    pub fn new(options: ClientOptions) -> Result<Self> {
        let session = match &options.storage_dir {
            Some(dir) => {
                let storage: Arc<dyn TokenStorage> = Arc::new(FileStorage::new(dir));
                SessionStore::open(storage, &options.token_key)?
            }
            None => SessionStore::in_memory(&options.token_key),
        };
        Self::with_session(options, session)
    }

    /// Create a client around an existing session store
    pub fn with_session(options: ClientOptions, session: SessionStore) -> Result<Self> {
        let api = ApiClient::new(&options, session.clone())?;
        let auth = AuthController::new(api.clone());
        let admin = AdminApi::new(api.clone(), auth.clone());

        Ok(Self {
            options,
            session,
            api,
            auth,
            admin,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    /// Raw gateway client for endpoints without a typed wrapper
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn auth(&self) -> &AuthController {
        &self.auth
    }

    pub fn admin(&self) -> &AdminApi {
        &self.admin
    }
}

/// A convenience module for common imports
pub mod prelude {
    pub use crate::auth::{AdminIdentity, AuthState};
    pub use crate::config::ClientOptions;
    pub use crate::error::Error;
    pub use crate::models::{Party, PartyKind, SupplierStock};
    pub use crate::stock::{compute_stock_summary, QrCodeRecord, QrType, StockReport, StockSummary};
    pub use crate::QrAdmin;
}
