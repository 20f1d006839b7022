//! Account handlers: registration, the signed-in account, and per-field account updates.

use crate::error::AppError;
use crate::extractors::CurrentAccount;
use crate::handlers::parse_id;
use crate::models::{
    RegisterAccountParams, RegisterPartnerParams, UpdateAccountEmailParams, UpdateAccountNameParams,
};
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{AccountService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// GET /api/all-accounts
pub async fn all_accounts(
    current: CurrentAccount,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    current.require_admin()?;
    let accounts = AccountService::list(&state.pool).await?;
    Ok(success_many(accounts))
}

/// POST /api/register-account
pub async fn register_account(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(mut params): Json<RegisterAccountParams>,
) -> Result<impl IntoResponse, AppError> {
    current.require_admin()?;
    RequestValidator::register_account(&mut params)?;
    let account = AccountService::register(&state.pool, &params).await?;
    Ok(success_one(account))
}

/// POST /api/register-partner
pub async fn register_partner(
    current: CurrentAccount,
    State(state): State<AppState>,
    Json(mut params): Json<RegisterPartnerParams>,
) -> Result<impl IntoResponse, AppError> {
    current.require_admin()?;
    RequestValidator::register_partner(&mut params)?;
    let account = AccountService::register_partner(&state.pool, &params).await?;
    Ok(success_one(account))
}

/// GET /api/active-account
pub async fn active_account(CurrentAccount(account): CurrentAccount) -> impl IntoResponse {
    success_one_ok(account)
}

/// PUT /api/active-account/update-last-login
pub async fn update_last_login(
    CurrentAccount(account): CurrentAccount,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let account = AccountService::update_last_login(&state.pool, account.id).await?;
    Ok(success_one_ok(account))
}

/// GET /api/account/:id
pub async fn get_account(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin_or_self(id)?;
    let account = AccountService::get(&state.pool, id).await?;
    Ok(success_one_ok(account))
}

/// DELETE /api/delete-account/:id
pub async fn delete_account(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    if current.0.id == id {
        return Err(AppError::Conflict("administrators cannot delete their own account".into()));
    }
    let account = AccountService::delete(&state.pool, id).await?;
    Ok(success_one_ok(account))
}

/// PUT /api/update-account/:id/name
pub async fn update_name(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(mut params): Json<UpdateAccountNameParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin_or_self(id)?;
    RequestValidator::account_name(&mut params)?;
    let account = AccountService::update_name(&state.pool, id, &params).await?;
    Ok(success_one_ok(account))
}

/// PUT /api/update-account/:id/email
pub async fn update_email(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(mut params): Json<UpdateAccountEmailParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    RequestValidator::account_email(&mut params)?;
    let account = AccountService::update_email(&state.pool, id, &params).await?;
    Ok(success_one_ok(account))
}

/// PUT /api/update-account/:id/grant-admin
pub async fn grant_admin(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    let account = AccountService::set_admin(&state.pool, id, true).await?;
    Ok(success_one_ok(account))
}

/// PUT /api/update-account/:id/remove-admin
pub async fn remove_admin(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    if current.0.id == id {
        return Err(AppError::Conflict("administrators cannot remove their own admin flag".into()));
    }
    let account = AccountService::set_admin(&state.pool, id, false).await?;
    Ok(success_one_ok(account))
}

/// POST /api/update-account/:id/register-member
pub async fn register_member(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    let account = AccountService::register_member(&state.pool, id).await?;
    Ok(success_one_ok(account))
}

/// DELETE /api/update-account/:id/delete-member
pub async fn delete_member(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    let account = AccountService::delete_member(&state.pool, id).await?;
    Ok(success_one_ok(account))
}
