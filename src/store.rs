//! Database bootstrap: create the database when missing and open a pool bound to the portal schema.

use crate::config::AppConfig;
use crate::error::{AppError, ConfigError};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Connection options with `search_path` pinned to the configured schema, so queries use bare table names.
pub fn connect_options(config: &AppConfig) -> Result<PgConnectOptions, AppError> {
    let opts = PgConnectOptions::from_str(&config.database_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    Ok(opts.options([("search_path", config.db_schema.as_str())]))
}

/// Open the shared pool. The schema itself is created by `apply_migrations`.
pub async fn connect_pool(config: &AppConfig) -> Result<PgPool, AppError> {
    let opts = connect_options(config)?;
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(opts)
        .await?;
    tracing::info!(schema = %config.db_schema, "database pool ready");
    Ok(pool)
}

/// Pool that connects on first use. Lets routes that never touch the database run without one.
pub fn connect_pool_lazy(config: &AppConfig) -> Result<PgPool, AppError> {
    let opts = connect_options(config)?;
    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect_lazy_with(opts))
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = PgConnectOptions::from_str(&admin_url)
        .map_err(|e| invalid_url(e.to_string()))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await
        .map_err(AppError::Db)?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url.rfind('/').ok_or_else(|| invalid_url("no database path".into()))? + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn invalid_url(reason: String) -> AppError {
    AppError::Config(ConfigError::Invalid {
        key: "DATABASE_URL",
        reason,
    })
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_database_name() {
        let (admin, name) = parse_db_name_from_url("postgres://u:p@db:5432/membership?sslmode=disable").unwrap();
        assert_eq!(admin, "postgres://u:p@db:5432/postgres");
        assert_eq!(name, "membership");
    }

    #[test]
    fn quotes_identifiers() {
        assert_eq!(quote_ident("my\"db"), "\"my\"\"db\"");
    }
}
