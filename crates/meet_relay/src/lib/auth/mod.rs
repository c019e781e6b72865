//! Session identity checks.
//!
//! Authentication itself is delegated to the hosted auth service; the relay
//! only forwards the caller's bearer token and reads back who it belongs to.

pub mod client;

use std::future::Future;

use serde::{Deserialize, Serialize};

pub use client::{AuthApiClient, AuthError};

pub trait IdentityProvider {
    /// Resolve a bearer token to the user it identifies. Any failure means
    /// "no session" to callers.
    fn verify_session(
        &self,
        bearer_token: &str,
    ) -> impl Future<Output = Result<AuthUser, AuthError>> + Send;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl AuthUser {
    /// Display name used in issued meeting tokens: the local part of the
    /// email, falling back to "Guest".
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|s| !s.is_empty())
            .unwrap_or("Guest")
    }
}
