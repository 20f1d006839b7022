//! Settings validation.

use crate::config::AppConfig;
use crate::error::ConfigError;

/// True for identifiers safe to splice into DDL unquoted.
pub fn is_plain_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() || c == '_' => {}
        _ => return false,
    }
    s.len() <= 63 && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

pub fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    if config.database_url.trim().is_empty() {
        return Err(ConfigError::Missing("DATABASE_URL"));
    }
    if !is_plain_identifier(&config.db_schema) {
        return Err(ConfigError::Invalid {
            key: "DB_SCHEMA",
            reason: format!("'{}' is not a lowercase identifier", config.db_schema),
        });
    }
    if config.max_connections == 0 {
        return Err(ConfigError::Invalid {
            key: "DB_MAX_CONNECTIONS",
            reason: "must be at least 1".into(),
        });
    }
    if config.body_limit_bytes == 0 {
        return Err(ConfigError::Invalid {
            key: "BODY_LIMIT_BYTES",
            reason: "must be at least 1".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers() {
        assert!(is_plain_identifier("public"));
        assert!(is_plain_identifier("portal_v2"));
        assert!(!is_plain_identifier("Public"));
        assert!(!is_plain_identifier("1abc"));
        assert!(!is_plain_identifier("x; DROP TABLE account"));
        assert!(!is_plain_identifier(""));
    }

    #[test]
    fn rejects_unsafe_schema() {
        let config = AppConfig {
            db_schema: "bad-schema".into(),
            ..AppConfig::default()
        };
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Invalid { key: "DB_SCHEMA", .. })
        ));
    }
}
