//! Bearer-token verification seam. Identity comes from an external provider; the portal
//! only needs the verified login email.

use async_trait::async_trait;
use std::collections::HashMap;

/// Verifies a bearer token and returns the login email it belongs to.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn verify(&self, token: &str) -> Option<String>;
}

/// Fixed token table, loaded from `AUTH_TOKENS`.
#[derive(Clone, Debug, Default)]
pub struct StaticTokenProvider {
    by_token: HashMap<String, String>,
}

impl StaticTokenProvider {
    pub fn new(by_token: HashMap<String, String>) -> Self {
        StaticTokenProvider { by_token }
    }

    pub fn is_empty(&self) -> bool {
        self.by_token.is_empty()
    }
}

#[async_trait]
impl AuthProvider for StaticTokenProvider {
    async fn verify(&self, token: &str) -> Option<String> {
        self.by_token.get(token).cloned()
    }
}

/// Strip the `Bearer ` scheme (case-insensitive). Returns None for other schemes or empty tokens.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_bearer_header() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("bearer   abc "), Some("abc"));
        assert_eq!(bearer_token("Basic abc"), None);
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("abc"), None);
    }

    #[tokio::test]
    async fn static_provider_resolves_known_tokens_only() {
        let provider = StaticTokenProvider::new(HashMap::from([(
            "t1".to_string(),
            "admin@example.org".to_string(),
        )]));
        assert_eq!(provider.verify("t1").await.as_deref(), Some("admin@example.org"));
        assert_eq!(provider.verify("t2").await, None);
    }
}
