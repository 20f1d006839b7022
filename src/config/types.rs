//! Runtime settings for the API server.

use std::collections::HashMap;
use std::net::SocketAddr;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/membership";
pub const DEFAULT_DB_SCHEMA: &str = "public";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    /// Schema holding the portal tables. Must be a plain PostgreSQL identifier.
    pub db_schema: String,
    pub max_connections: u32,
    pub body_limit_bytes: usize,
    /// Bearer token -> login email, consumed by `StaticTokenProvider`.
    pub auth_tokens: HashMap<String, String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_url: DEFAULT_DATABASE_URL.into(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            db_schema: DEFAULT_DB_SCHEMA.into(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            body_limit_bytes: DEFAULT_BODY_LIMIT_BYTES,
            auth_tokens: HashMap::new(),
        }
    }
}
