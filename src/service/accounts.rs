//! Account reads and single-concern writes.

use crate::error::AppError;
use crate::models::{
    Account, RegisterAccountParams, RegisterPartnerParams, UpdateAccountEmailParams,
    UpdateAccountNameParams,
};
use sqlx::PgPool;

const ACCOUNT_SELECT: &str = r#"
    SELECT a.id, a.login_email, a.first_name, a.last_name, a.is_admin,
           a.member_id, p.id AS partner_id, a.last_login
    FROM account a
    LEFT JOIN partner p ON p.account_id = a.id
"#;

/// Holds the account row until the registering transaction ends.
const LOCK_ACCOUNT_MEMBER: &str = "SELECT member_id FROM account WHERE id = $1 FOR UPDATE";

pub struct AccountService;

impl AccountService {
    pub async fn list(pool: &PgPool) -> Result<Vec<Account>, AppError> {
        let sql = format!("{} ORDER BY a.last_name, a.first_name, a.id", ACCOUNT_SELECT);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Account>(&sql).fetch_all(pool).await?)
    }

    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<Account>, AppError> {
        let sql = format!("{} WHERE a.id = $1", ACCOUNT_SELECT);
        tracing::debug!(sql = %sql, id, "query");
        Ok(sqlx::query_as::<_, Account>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await?)
    }

    pub async fn get(pool: &PgPool, id: i32) -> Result<Account, AppError> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("account {}", id)))
    }

    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Account>, AppError> {
        let sql = format!("{} WHERE a.login_email = $1", ACCOUNT_SELECT);
        tracing::debug!(sql = %sql, "query");
        Ok(sqlx::query_as::<_, Account>(&sql)
            .bind(email.trim().to_lowercase())
            .fetch_optional(pool)
            .await?)
    }

    /// Create an account, with an empty member profile when `is_member` is set.
    pub async fn register(pool: &PgPool, params: &RegisterAccountParams) -> Result<Account, AppError> {
        let mut tx = pool.begin().await?;
        let member_id: Option<i32> = if params.is_member {
            let (id,): (i32,) = sqlx::query_as("INSERT INTO member DEFAULT VALUES RETURNING id")
                .fetch_one(&mut *tx)
                .await?;
            Some(id)
        } else {
            None
        };
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO account (login_email, first_name, last_name, is_admin, member_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id",
        )
        .bind(&params.login_email)
        .bind(&params.first_name)
        .bind(&params.last_name)
        .bind(params.is_admin)
        .bind(member_id)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        tracing::info!(account_id = id, member = params.is_member, admin = params.is_admin, "account registered");
        Self::get(pool, id).await
    }

    /// Create a non-member account with its partner organisation.
    pub async fn register_partner(pool: &PgPool, params: &RegisterPartnerParams) -> Result<Account, AppError> {
        let mut tx = pool.begin().await?;
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO account (login_email, first_name, last_name) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(&params.login_email)
        .bind(&params.first_name)
        .bind(&params.last_name)
        .fetch_one(&mut *tx)
        .await?;
        sqlx::query(
            "INSERT INTO partner (account_id, org_name, org_type_id, org_scope_id) VALUES ($1, $2, $3, $4)",
        )
        .bind(id)
        .bind(&params.org_name)
        .bind(params.org_type_id)
        .bind(params.org_scope_id)
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        tracing::info!(account_id = id, "partner registered");
        Self::get(pool, id).await
    }

    pub async fn update_last_login(pool: &PgPool, id: i32) -> Result<Account, AppError> {
        Self::update_returning_id(pool, "UPDATE account SET last_login = NOW() WHERE id = $1 RETURNING id", id).await?;
        Self::get(pool, id).await
    }

    pub async fn update_name(pool: &PgPool, id: i32, params: &UpdateAccountNameParams) -> Result<Account, AppError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE account SET first_name = $2, last_name = $3 WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(&params.first_name)
        .bind(&params.last_name)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("account {}", id)))?;
        tracing::info!(account_id = id, "account name updated");
        Self::get(pool, id).await
    }

    pub async fn update_email(pool: &PgPool, id: i32, params: &UpdateAccountEmailParams) -> Result<Account, AppError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE account SET login_email = $2 WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(&params.login_email)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("account {}", id)))?;
        tracing::info!(account_id = id, "account email updated");
        Self::get(pool, id).await
    }

    pub async fn set_admin(pool: &PgPool, id: i32, is_admin: bool) -> Result<Account, AppError> {
        let row: Option<(i32,)> = sqlx::query_as(
            "UPDATE account SET is_admin = $2 WHERE id = $1 RETURNING id",
        )
        .bind(id)
        .bind(is_admin)
        .fetch_optional(pool)
        .await?;
        row.ok_or_else(|| AppError::NotFound(format!("account {}", id)))?;
        tracing::info!(account_id = id, is_admin, "admin flag changed");
        Self::get(pool, id).await
    }

    /// Attach a fresh member profile. Conflict when one already exists.
    pub async fn register_member(pool: &PgPool, id: i32) -> Result<Account, AppError> {
        let mut tx = pool.begin().await?;
        let existing: Option<(Option<i32>,)> = sqlx::query_as(LOCK_ACCOUNT_MEMBER)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        match existing {
            None => return Err(AppError::NotFound(format!("account {}", id))),
            Some((Some(_),)) => return Err(AppError::Conflict(format!("account {} is already a member", id))),
            Some((None,)) => {}
        }
        let (member_id,): (i32,) = sqlx::query_as("INSERT INTO member DEFAULT VALUES RETURNING id")
            .fetch_one(&mut *tx)
            .await?;
        sqlx::query("UPDATE account SET member_id = $2 WHERE id = $1")
            .bind(id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(account_id = id, member_id, "member profile created");
        Self::get(pool, id).await
    }

    /// Drop the member profile (keywords and problems cascade). The account stays.
    pub async fn delete_member(pool: &PgPool, id: i32) -> Result<Account, AppError> {
        let account = Self::get(pool, id).await?;
        let member_id = account
            .member_id
            .ok_or_else(|| AppError::NotFound(format!("account {} has no member profile", id)))?;
        sqlx::query("DELETE FROM member WHERE id = $1")
            .bind(member_id)
            .execute(pool)
            .await?;
        tracing::info!(account_id = id, member_id, "member profile deleted");
        Self::get(pool, id).await
    }

    /// Delete the account and its member profile. Returns the deleted account.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<Account, AppError> {
        let account = Self::get(pool, id).await?;
        let mut tx = pool.begin().await?;
        sqlx::query("DELETE FROM account WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if let Some(member_id) = account.member_id {
            sqlx::query("DELETE FROM member WHERE id = $1")
                .bind(member_id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        tracing::info!(account_id = id, "account deleted");
        Ok(account)
    }

    async fn update_returning_id(pool: &PgPool, sql: &str, id: i32) -> Result<(), AppError> {
        tracing::debug!(sql = %sql, id, "query");
        let row: Option<(i32,)> = sqlx::query_as(sql).bind(id).fetch_optional(pool).await?;
        row.map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("account {}", id)))
    }
}
