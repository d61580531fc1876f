//! Authentication and profile operations

use reqwest::StatusCode;

use super::{ApiClient, ApiError, RequestOptions};
use crate::models::{AuthResponse, LoginRequest, ProfileUpdate, RegisterRequest, User, UserEnvelope};

impl ApiClient {
    /// Probe the backend (`GET /test`)
    pub async fn test_connection(&self) -> Result<serde_json::Value, ApiError> {
        self.call("/test", RequestOptions::get()).await
    }

    /// Log in and store the returned token
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        require("email", email)?;
        require("password", password)?;

        let body = LoginRequest {
            email: email.trim(),
            password,
        };
        let response: AuthResponse = self
            .call("/login", RequestOptions::post().json(&body)?)
            .await?;

        self.session().set_credential(&response.token)?;
        tracing::info!("Logged in as {}", response.user.username);
        Ok(response)
    }

    /// Register a new account and store the returned token
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ApiError> {
        require("username", username)?;
        require("email", email)?;
        require("password", password)?;

        let body = RegisterRequest {
            username: username.trim(),
            email: email.trim(),
            password,
        };
        let response: AuthResponse = self
            .call("/register", RequestOptions::post().json(&body)?)
            .await?;

        self.session().set_credential(&response.token)?;
        tracing::info!("Registered as {}", response.user.username);
        Ok(response)
    }

    /// Forget the stored token
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session().clear()?;
        Ok(())
    }

    /// Get the current user's profile (`GET /users/profile`)
    pub async fn get_profile(&self) -> Result<User, ApiError> {
        self.call("/users/profile", RequestOptions::get()).await
    }

    /// Verify the session against the backend
    ///
    /// Restores a persisted token if none is held, then fetches the profile.
    /// Any failure clears the token and is reported as a 401.
    pub async fn check_auth(&self) -> Result<User, ApiError> {
        if !self.session().is_authenticated() {
            if let Err(e) = self.session().restore() {
                tracing::warn!("Could not restore session: {e}");
            }
        }

        match self.get_profile().await {
            Ok(user) => Ok(user),
            Err(e) => {
                tracing::warn!("Authentication check failed: {e}");
                self.session().clear()?;
                Err(ApiError::Http {
                    status: StatusCode::UNAUTHORIZED,
                    message: "Not authenticated".to_string(),
                })
            }
        }
    }

    /// Update the current user's profile (`PUT /users/profile`)
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        if let Some(field) = update.missing_field() {
            return Err(ApiError::MissingField(field));
        }

        let envelope: UserEnvelope = self
            .call("/users/profile", RequestOptions::put().json(update)?)
            .await?;
        Ok(envelope.user)
    }
}

/// Reject a blank required field before anything is sent
pub(super) fn require(field: &'static str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        Err(ApiError::MissingField(field))
    } else {
        Ok(())
    }
}
