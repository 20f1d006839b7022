//! Resolve the calling account from the `Authorization: Bearer` header.

use crate::auth::bearer_token;
use crate::error::AppError;
use crate::models::Account;
use crate::service::AccountService;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Signed-in account. Rejects with 401 when the header is missing or the token is unknown,
/// and with 403 when the verified email has no account.
#[derive(Clone, Debug)]
pub struct CurrentAccount(pub Account);

/// Like `CurrentAccount`, but anonymous callers get `None` instead of a rejection.
#[derive(Clone, Debug)]
pub struct MaybeAccount(pub Option<Account>);

fn header_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(bearer_token)
}

async fn resolve(state: &AppState, token: &str) -> Result<Account, AppError> {
    let email = state
        .auth
        .verify(token)
        .await
        .ok_or_else(|| AppError::Unauthorized("invalid credentials".into()))?;
    AccountService::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Forbidden(format!("no account registered for {}", email)))
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentAccount {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = header_token(parts)
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".into()))?;
        resolve(state, token).await.map(CurrentAccount)
    }
}

#[async_trait]
impl FromRequestParts<AppState> for MaybeAccount {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(token) = header_token(parts) else {
            return Ok(MaybeAccount(None));
        };
        match resolve(state, token).await {
            Ok(account) => Ok(MaybeAccount(Some(account))),
            Err(AppError::Unauthorized(_)) | Err(AppError::Forbidden(_)) => Ok(MaybeAccount(None)),
            Err(e) => Err(e),
        }
    }
}

impl CurrentAccount {
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.0.is_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden("administrator access required".into()))
        }
    }

    /// Admins, or the account itself.
    pub fn require_admin_or_self(&self, account_id: i32) -> Result<(), AppError> {
        if self.0.is_admin || self.0.id == account_id {
            Ok(())
        } else {
            Err(AppError::Forbidden("not allowed to access this account".into()))
        }
    }

    /// Admins, or the account owning the member profile.
    pub fn require_admin_or_owner(&self, member_id: i32) -> Result<(), AppError> {
        if self.0.is_admin || self.0.member_id == Some(member_id) {
            Ok(())
        } else {
            Err(AppError::Forbidden("not allowed to access this member".into()))
        }
    }
}
