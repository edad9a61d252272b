/**
 * Authentication Client
 *
 * Login and registration against the backend auth endpoints. Successful
 * credentials are written to the shared session, so the notification
 * stream and every REST call pick them up without further wiring.
 */
use crate::client::api::{read_json, ApiClient};
use crate::shared::error::ClientError;
use crate::shared::user::{AuthResponse, LoginRequest, RegisterRequest, User};

/// Authentication service
#[derive(Debug, Clone)]
pub struct AuthClient {
    api: ApiClient,
}

impl AuthClient {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// Log in with username and password
    ///
    /// On success the bearer token and user profile are stored in the
    /// session before the response is returned.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let url = self.api.config().api_url("/auth/login");
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self.api.http().post(&url).json(&request).send().await?;
        let auth: AuthResponse = read_json(response).await?;

        self.api.session().set_credentials(&auth)?;
        tracing::info!("[Auth] logged in as {}", auth.username);
        Ok(auth)
    }

    /// Register a new account
    ///
    /// The backend signs the new user in immediately; the returned
    /// credentials are stored in the session like a login.
    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let url = self.api.config().api_url("/auth/register");

        let response = self.api.http().post(&url).json(request).send().await?;
        let auth: AuthResponse = read_json(response).await?;

        self.api.session().set_credentials(&auth)?;
        tracing::info!("[Auth] registered {}", auth.username);
        Ok(auth)
    }

    /// Log out: drop the stored credentials
    pub fn logout(&self) -> Result<(), ClientError> {
        self.api.session().clear()?;
        tracing::info!("[Auth] logged out");
        Ok(())
    }

    /// Whether a bearer token is stored
    pub fn is_authenticated(&self) -> bool {
        self.api.session().is_authenticated()
    }

    /// Cached profile of the signed-in user
    pub fn current_user(&self) -> Option<User> {
        self.api.session().current_user()
    }
}
