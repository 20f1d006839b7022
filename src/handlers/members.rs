//! Member profile handlers.

use crate::error::AppError;
use crate::extractors::{CurrentAccount, MaybeAccount};
use crate::handlers::parse_id;
use crate::models::{UpdateMemberInsightParams, UpdateMemberPrivateParams, UpdateMemberPublicParams};
use crate::response::{success_many, success_one_ok};
use crate::service::{MemberService, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

/// GET /api/all-members. Administrators also see inactive members.
pub async fn all_members(
    MaybeAccount(account): MaybeAccount,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let include_inactive = account.map(|a| a.is_admin).unwrap_or(false);
    let members = MemberService::list_public(&state.pool, include_inactive).await?;
    Ok(success_many(members))
}

/// GET /api/member/:id/public. Inactive profiles are only visible to administrators and their owner.
pub async fn public_info(
    MaybeAccount(account): MaybeAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    let member = MemberService::public_info(&state.pool, id).await?;
    let privileged = account
        .map(|a| a.is_admin || a.member_id == Some(id))
        .unwrap_or(false);
    if !member.is_active && !privileged {
        return Err(AppError::NotFound(format!("member {}", id)));
    }
    Ok(success_one_ok(member))
}

/// GET /api/member/:id/private
pub async fn private_info(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin_or_owner(id)?;
    let member = MemberService::private_info(&state.pool, id).await?;
    Ok(success_one_ok(member))
}

/// GET /api/member/:id/insight
pub async fn insight(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    let insight = MemberService::insight(&state.pool, id).await?;
    Ok(success_one_ok(insight))
}

/// PUT /api/update-member/:id/public
pub async fn update_public(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(mut params): Json<UpdateMemberPublicParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin_or_owner(id)?;
    RequestValidator::member_public(&mut params)?;
    let member = MemberService::update_public(&state.pool, id, params).await?;
    Ok(success_one_ok(member))
}

/// PUT /api/update-member/:id/private
pub async fn update_private(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(params): Json<UpdateMemberPrivateParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin_or_owner(id)?;
    RequestValidator::member_private(&params)?;
    let member = MemberService::update_private(&state.pool, id, params).await?;
    Ok(success_one_ok(member))
}

/// PUT /api/update-member/:id/insight
pub async fn update_insight(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(params): Json<UpdateMemberInsightParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    let insight = MemberService::update_insight(&state.pool, id, params).await?;
    Ok(success_one_ok(insight))
}
