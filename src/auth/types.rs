//! Types for admin authentication

use serde::{Deserialize, Serialize};

/// Role that implicitly holds every permission
pub const SUPER_ADMIN_ROLE: &str = "super_admin";

/// The signed-in administrator, as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminIdentity {
    #[serde(alias = "_id")]
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl AdminIdentity {
    /// Whether this admin may perform `permission`
    pub fn has_permission(&self, permission: &str) -> bool {
        self.role == SUPER_ADMIN_ROLE || self.permissions.iter().any(|p| p == permission)
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

/// `data` of a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginData {
    pub user: AdminIdentity,
    pub token: String,
}

/// `data` of `GET /auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeData {
    pub user: AdminIdentity,
}

/// Where the controller is in the sign-in lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No token
    Unauthenticated,
    /// Token present, identity not yet confirmed by the backend
    Verifying,
    /// Identity confirmed
    Authenticated,
}
