//! Membership portal API server.
//!
//! Run from repo root: `cargo run -p membership-server`

use membership_portal::{
    app, apply_migrations, connect_pool, ensure_database_exists, AppConfig, AppState, StaticTokenProvider,
};
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("membership_portal=info,membership_server=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    ensure_database_exists(&config.database_url).await?;
    let pool = connect_pool(&config).await?;
    apply_migrations(&pool, &config.db_schema).await?;

    let auth = StaticTokenProvider::new(config.auth_tokens.clone());
    if auth.is_empty() {
        tracing::warn!("AUTH_TOKENS is empty; every authenticated route will answer 401");
    }
    let state = AppState::new(pool, Arc::new(auth));

    let router = app(state, config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Membership portal listening on http://{}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
