use std::collections::HashMap;
use std::sync::Arc;

use meet_relay::auth::{AuthError, AuthUser, IdentityProvider};

/// Maps bearer tokens to users; everything else is rejected.
#[derive(Clone, Default)]
pub struct MockIdentityProvider {
    pub sessions: Arc<HashMap<String, AuthUser>>,
}

impl MockIdentityProvider {
    pub fn with_session(token: &str, user_id: &str, email: Option<&str>) -> Self {
        let mut sessions = HashMap::new();
        sessions.insert(
            token.to_string(),
            AuthUser {
                id: user_id.to_string(),
                email: email.map(str::to_string),
            },
        );
        Self {
            sessions: Arc::new(sessions),
        }
    }
}

impl IdentityProvider for MockIdentityProvider {
    async fn verify_session(&self, bearer_token: &str) -> Result<AuthUser, AuthError> {
        self.sessions
            .get(bearer_token)
            .cloned()
            .ok_or(AuthError::Api {
                status: 401,
                message: "invalid token".to_string(),
            })
    }
}
