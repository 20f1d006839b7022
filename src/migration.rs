//! Idempotent DDL for the portal tables. Safe to run on every startup.

use crate::config::is_plain_identifier;
use crate::error::{AppError, ConfigError};
use sqlx::PgPool;

/// Tables in creation order; later entries reference earlier ones.
const TABLES: &[(&str, &str)] = &[
    (
        "faculty",
        r#"
        CREATE TABLE IF NOT EXISTS faculty (
            id SERIAL PRIMARY KEY,
            name_en TEXT NOT NULL,
            name_fr TEXT NOT NULL
        )
        "#,
    ),
    (
        "member_type",
        r#"
        CREATE TABLE IF NOT EXISTS member_type (
            id SERIAL PRIMARY KEY,
            name_en TEXT NOT NULL,
            name_fr TEXT NOT NULL
        )
        "#,
    ),
    (
        "org_type",
        r#"
        CREATE TABLE IF NOT EXISTS org_type (
            id SERIAL PRIMARY KEY,
            name_en TEXT NOT NULL,
            name_fr TEXT NOT NULL
        )
        "#,
    ),
    (
        "org_scope",
        r#"
        CREATE TABLE IF NOT EXISTS org_scope (
            id SERIAL PRIMARY KEY,
            name_en TEXT NOT NULL,
            name_fr TEXT NOT NULL
        )
        "#,
    ),
    (
        "keyword",
        r#"
        CREATE TABLE IF NOT EXISTS keyword (
            id SERIAL PRIMARY KEY,
            name_en TEXT NOT NULL DEFAULT '',
            name_fr TEXT NOT NULL DEFAULT ''
        )
        "#,
    ),
    (
        "member",
        r#"
        CREATE TABLE IF NOT EXISTS member (
            id SERIAL PRIMARY KEY,
            about_me TEXT,
            work_email TEXT,
            work_phone TEXT,
            website TEXT,
            faculty_id INT REFERENCES faculty (id) ON DELETE SET NULL,
            member_type_id INT REFERENCES member_type (id) ON DELETE SET NULL,
            address TEXT,
            city TEXT,
            province TEXT,
            country TEXT,
            postal_code TEXT,
            mobile_phone TEXT,
            date_joined TIMESTAMPTZ DEFAULT NOW(),
            is_active BOOLEAN NOT NULL DEFAULT TRUE,
            last_active TIMESTAMPTZ,
            notes TEXT
        )
        "#,
    ),
    (
        "account",
        r#"
        CREATE TABLE IF NOT EXISTS account (
            id SERIAL PRIMARY KEY,
            login_email TEXT NOT NULL,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            is_admin BOOLEAN NOT NULL DEFAULT FALSE,
            last_login TIMESTAMPTZ,
            member_id INT UNIQUE REFERENCES member (id) ON DELETE SET NULL,
            CONSTRAINT account_login_email_key UNIQUE (login_email)
        )
        "#,
    ),
    (
        "partner",
        r#"
        CREATE TABLE IF NOT EXISTS partner (
            id SERIAL PRIMARY KEY,
            account_id INT NOT NULL UNIQUE REFERENCES account (id) ON DELETE CASCADE,
            org_name TEXT NOT NULL,
            org_type_id INT REFERENCES org_type (id) ON DELETE SET NULL,
            org_scope_id INT REFERENCES org_scope (id) ON DELETE SET NULL
        )
        "#,
    ),
    (
        "member_keyword",
        r#"
        CREATE TABLE IF NOT EXISTS member_keyword (
            member_id INT NOT NULL REFERENCES member (id) ON DELETE CASCADE,
            keyword_id INT NOT NULL REFERENCES keyword (id) ON DELETE CASCADE,
            PRIMARY KEY (member_id, keyword_id)
        )
        "#,
    ),
    (
        "problem",
        r#"
        CREATE TABLE IF NOT EXISTS problem (
            id SERIAL PRIMARY KEY,
            member_id INT NOT NULL REFERENCES member (id) ON DELETE CASCADE,
            name_en TEXT NOT NULL DEFAULT '',
            name_fr TEXT NOT NULL DEFAULT ''
        )
        "#,
    ),
];

/// Create the schema and every portal table if missing. Runs on one connection so the
/// `search_path` set here applies to all DDL statements.
pub async fn apply_migrations(pool: &PgPool, schema: &str) -> Result<(), AppError> {
    if !is_plain_identifier(schema) {
        return Err(ConfigError::Invalid {
            key: "DB_SCHEMA",
            reason: format!("'{}' is not a plain identifier", schema),
        }
        .into());
    }
    let mut conn = pool.acquire().await?;
    sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
        .execute(&mut *conn)
        .await?;
    sqlx::query(&format!("SET search_path TO {}", schema))
        .execute(&mut *conn)
        .await?;
    for (name, ddl) in TABLES {
        tracing::debug!(table = %name, "ensure table");
        sqlx::query(ddl).execute(&mut *conn).await?;
    }
    tracing::info!(schema = %schema, tables = TABLES.len(), "migrations applied");
    Ok(())
}
