//! User and Authentication Types
//!
//! User profiles as stored in the session, plus the request and response
//! payloads of the authentication endpoints.

use serde::{Deserialize, Serialize};

/// A platform user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID
    pub id: i64,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// First name, empty when the backend did not supply one
    #[serde(default)]
    pub first_name: String,
    /// Last name, empty when the backend did not supply one
    #[serde(default)]
    pub last_name: String,
    /// Role name, e.g. "USER" or "ADMIN"
    pub role: String,
}

/// Body of a login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Body of a registration request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Successful response of the login and register endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    /// ID of the authenticated user
    pub user_id: i64,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Role name
    pub role: String,
}

/// The auth endpoints do not return name fields, so a profile built from
/// their response carries empty names until refreshed from the backend.
impl From<&AuthResponse> for User {
    fn from(auth: &AuthResponse) -> Self {
        Self {
            id: auth.user_id,
            username: auth.username.clone(),
            email: auth.email.clone(),
            first_name: String::new(),
            last_name: String::new(),
            role: auth.role.clone(),
        }
    }
}
