//! Load settings from the process environment (after `.env`, when present).

use crate::config::types::*;
use crate::config::validate;
use crate::error::ConfigError;
use std::collections::HashMap;
use std::net::SocketAddr;

impl AppConfig {
    /// Read `.env` if present, then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unset keys fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = AppConfig::default();

        let database_url = lookup("DATABASE_URL").unwrap_or(defaults.database_url);
        let bind_addr = match lookup("BIND_ADDR") {
            Some(s) => s.parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
                key: "BIND_ADDR",
                reason: e.to_string(),
            })?,
            None => defaults.bind_addr,
        };
        let db_schema = lookup("DB_SCHEMA").unwrap_or(defaults.db_schema);
        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: format!("'{}' is not a positive integer", s),
            })?,
            None => defaults.max_connections,
        };
        let body_limit_bytes = match lookup("BODY_LIMIT_BYTES") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid {
                key: "BODY_LIMIT_BYTES",
                reason: format!("'{}' is not a byte count", s),
            })?,
            None => defaults.body_limit_bytes,
        };
        let auth_tokens = match lookup("AUTH_TOKENS") {
            Some(s) => parse_auth_tokens(&s)?,
            None => HashMap::new(),
        };

        let config = AppConfig {
            database_url,
            bind_addr,
            db_schema,
            max_connections,
            body_limit_bytes,
            auth_tokens,
        };
        validate(&config)?;
        Ok(config)
    }
}

/// Parse `token=email,token=email`. Emails are normalized like stored login emails.
fn parse_auth_tokens(raw: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut out = HashMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (token, email) = pair.split_once('=').ok_or_else(|| ConfigError::Invalid {
            key: "AUTH_TOKENS",
            reason: format!("expected token=email, got '{}'", pair),
        })?;
        let token = token.trim();
        let email = email.trim().to_lowercase();
        if token.is_empty() || email.is_empty() {
            return Err(ConfigError::Invalid {
                key: "AUTH_TOKENS",
                reason: "token and email must be non-empty".into(),
            });
        }
        out.insert(token.to_string(), email);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = AppConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(config.db_schema, "public");
        assert_eq!(config.max_connections, 5);
        assert!(config.auth_tokens.is_empty());
    }

    #[test]
    fn parses_auth_tokens() {
        let config = AppConfig::from_lookup(lookup_from(&[(
            "AUTH_TOKENS",
            "abc=Admin@Example.org, def = member@example.org",
        )]))
        .unwrap();
        assert_eq!(config.auth_tokens.get("abc").map(String::as_str), Some("admin@example.org"));
        assert_eq!(config.auth_tokens.get("def").map(String::as_str), Some("member@example.org"));
    }

    #[test]
    fn rejects_malformed_token_pair() {
        let err = AppConfig::from_lookup(lookup_from(&[("AUTH_TOKENS", "no-separator")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "AUTH_TOKENS", .. }));
    }

    #[test]
    fn rejects_bad_bind_addr() {
        let err = AppConfig::from_lookup(lookup_from(&[("BIND_ADDR", "localhost")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "BIND_ADDR", .. }));
    }
}
