//! Reference data and keyword handlers.

use crate::error::AppError;
use crate::extractors::CurrentAccount;
use crate::handlers::parse_id;
use crate::models::KeywordParams;
use crate::response::{success_many, success_one, success_one_ok};
use crate::service::{LookupService, LookupTable, RequestValidator};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};

async fn list(state: &AppState, table: LookupTable) -> Result<impl IntoResponse, AppError> {
    let rows = LookupService::list(&state.pool, table).await?;
    Ok(success_many(rows))
}

pub async fn all_faculties(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list(&state, LookupTable::Faculty).await
}

pub async fn all_member_types(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list(&state, LookupTable::MemberType).await
}

pub async fn all_org_types(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list(&state, LookupTable::OrgType).await
}

pub async fn all_org_scopes(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list(&state, LookupTable::OrgScope).await
}

pub async fn all_keywords(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    list(&state, LookupTable::Keyword).await
}

/// POST /api/register-keyword. Any signed-in account may add keywords.
pub async fn register_keyword(
    _current: CurrentAccount,
    State(state): State<AppState>,
    Json(mut params): Json<KeywordParams>,
) -> Result<impl IntoResponse, AppError> {
    RequestValidator::keyword(&mut params)?;
    let keyword = LookupService::register_keyword(&state.pool, &params).await?;
    Ok(success_one(keyword))
}

/// PUT /api/update-keyword/:id
pub async fn update_keyword(
    current: CurrentAccount,
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(mut params): Json<KeywordParams>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id_str)?;
    current.require_admin()?;
    RequestValidator::keyword(&mut params)?;
    let keyword = LookupService::update_keyword(&state.pool, id, &params).await?;
    Ok(success_one_ok(keyword))
}
