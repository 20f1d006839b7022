//! Source of the bearer token attached to API calls.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// Supplies the current bearer token, or None when nobody is signed in.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn bearer_token(&self) -> Option<String>;
}

/// Token held in memory for the current session.
#[derive(Clone, Debug, Default)]
pub struct SessionCredentials {
    token: Arc<RwLock<Option<String>>>,
}

impl SessionCredentials {
    pub fn signed_in(token: impl Into<String>) -> Self {
        let creds = Self::default();
        creds.sign_in(token);
        creds
    }

    pub fn sign_in(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.into());
    }

    pub fn sign_out(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

#[async_trait]
impl CredentialProvider for SessionCredentials {
    async fn bearer_token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
            .filter(|t| !t.is_empty())
    }
}
