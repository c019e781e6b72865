use reqwest::Client;

use crate::auth::{AuthUser, IdentityProvider};

/// REST client for the hosted auth service's session-introspection endpoint.
#[derive(Debug, Clone)]
pub struct AuthApiClient {
    client: Client,
    base_url: String,
    service_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

impl AuthApiClient {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            service_key: service_key.into(),
        }
    }
}

impl IdentityProvider for AuthApiClient {
    async fn verify_session(&self, bearer_token: &str) -> Result<AuthUser, AuthError> {
        let resp = self
            .client
            .get(format!("{}/user", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(bearer_token)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            return Err(AuthError::Api { status, message });
        }

        Ok(resp.json::<AuthUser>().await?)
    }
}
