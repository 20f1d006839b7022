//! Shared application state for all routes.

use crate::auth::AuthProvider;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    /// Verifies bearer tokens for the `CurrentAccount` extractor.
    pub auth: Arc<dyn AuthProvider>,
}

impl AppState {
    pub fn new(pool: PgPool, auth: Arc<dyn AuthProvider>) -> Self {
        AppState { pool, auth }
    }
}
