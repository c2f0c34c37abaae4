//! Admin authentication: login, logout and identity verification

mod types;

use std::sync::{Arc, PoisonError, RwLock};

use log::{info, warn};

use crate::error::Result;
use crate::fetch::{ApiClient, ApiResponse};
use crate::session::SessionStore;

pub use types::*;

#[derive(Debug)]
struct Inner {
    state: AuthState,
    identity: Option<AdminIdentity>,
}

/// Drives the Unauthenticated / Verifying / Authenticated lifecycle
///
/// Clones share state. Concurrent calls are not serialized: whichever
/// completes last decides the state and identity.
#[derive(Debug, Clone)]
pub struct AuthController {
    api: ApiClient,
    session: SessionStore,
    inner: Arc<RwLock<Inner>>,
}

impl AuthController {
    /// Create a controller
    ///
    /// A token already in the session puts the controller in Verifying
    /// until [`AuthController::check_auth`] confirms or rejects it.
    pub fn new(api: ApiClient) -> Self {
        let session = api.session().clone();
        let state = if session.is_present() {
            AuthState::Verifying
        } else {
            AuthState::Unauthenticated
        };
        Self {
            api,
            session,
            inner: Arc::new(RwLock::new(Inner {
                state,
                identity: None,
            })),
        }
    }

    fn update(&self, state: AuthState, identity: Option<AdminIdentity>) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.state = state;
        inner.identity = identity;
    }

    fn set_state(&self, state: AuthState) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.state = state;
    }

    /// Drop identity and token, ending in Unauthenticated
    fn reset(&self) {
        if let Err(err) = self.session.clear() {
            warn!("session cleared in memory only: {}", err);
        }
        self.update(AuthState::Unauthenticated, None);
    }

    pub fn state(&self) -> AuthState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == AuthState::Authenticated
    }

    /// The admin confirmed by the last successful login or verification
    pub fn current_user(&self) -> Option<AdminIdentity> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .identity
            .clone()
    }

    /// Whether the current admin holds `permission`
    pub fn has_permission(&self, permission: &str) -> bool {
        self.current_user()
            .map(|user| user.has_permission(permission))
            .unwrap_or(false)
    }

    /// Fetch `GET /auth/me` with the current token
    pub async fn fetch_identity(&self) -> Result<AdminIdentity> {
        let me: MeData = self.api.get_data("/auth/me").await?;
        Ok(me.user)
    }

    /// Verify a persisted token against the backend
    ///
    /// Without a token this ends in Unauthenticated with no network call.
    /// Any failure (unreachable backend or rejected token) clears the
    /// session.
    pub async fn check_auth(&self) -> AuthState {
        if !self.session.is_present() {
            self.update(AuthState::Unauthenticated, None);
            return AuthState::Unauthenticated;
        }

        self.set_state(AuthState::Verifying);
        match self.fetch_identity().await {
            Ok(user) => {
                info!("session verified for {}", user.email);
                self.update(AuthState::Authenticated, Some(user));
            }
            Err(err) => {
                warn!("stored token rejected, signing out: {}", err);
                self.reset();
            }
        }
        self.state()
    }

    /// Sign in with email and password
    ///
    /// Failures are returned as `success: false` with a message rather
    /// than as an error.
    pub async fn login(&self, email: &str, password: &str) -> ApiResponse<LoginData> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return ApiResponse::failure("Email and password are required");
        }

        match self.request_login(email, password).await {
            Ok(data) => {
                info!("logged in as {}", data.user.email);
                self.update(AuthState::Authenticated, Some(data.user.clone()));
                ApiResponse {
                    success: true,
                    data: Some(data),
                    message: None,
                }
            }
            Err(err) => {
                warn!("login failed for {}: {}", email, err);
                self.reset();
                ApiResponse::failure(err.to_string())
            }
        }
    }

    async fn request_login(&self, email: &str, password: &str) -> Result<LoginData> {
        let credentials = LoginCredentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        let data: LoginData = self.api.post_data("/auth/login", &credentials).await?;

        self.session.set(&data.token)?;
        Ok(data)
    }

    /// Sign out locally; no backend call is needed
    pub fn logout(&self) {
        self.reset();
        info!("logged out");
    }

    /// Drop the session after the backend rejected the token on some other request
    pub fn invalidate(&self) {
        if self.session.is_present() {
            warn!("token rejected by backend, signing out");
        }
        self.reset();
    }
}
