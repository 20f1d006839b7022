//! Portal API routes, mounted from the route table templates.

use crate::handlers::{accounts, lookups, members};
use crate::routing::api_routes as r;
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;

pub fn api_routes(state: AppState, body_limit_bytes: usize) -> Router {
    Router::new()
        .route(r::ALL_MEMBERS, get(members::all_members))
        .route(r::ALL_ACCOUNTS, get(accounts::all_accounts))
        .route(r::REGISTER_ACCOUNT, post(accounts::register_account))
        .route(r::REGISTER_PARTNER, post(accounts::register_partner))
        .route(r::ACTIVE_ACCOUNT, get(accounts::active_account))
        .route(r::ACTIVE_ACCOUNT_UPDATE_LAST_LOGIN, put(accounts::update_last_login))
        .route(r::ACCOUNT, get(accounts::get_account))
        .route(r::PUBLIC_MEMBER_INFO, get(members::public_info))
        .route(r::PRIVATE_MEMBER_INFO, get(members::private_info))
        .route(r::MEMBER_INSIGHT, get(members::insight))
        .route(r::DELETE_ACCOUNT, delete(accounts::delete_account))
        .route(r::UPDATE_ACCOUNT_NAME, put(accounts::update_name))
        .route(r::UPDATE_ACCOUNT_EMAIL, put(accounts::update_email))
        .route(r::UPDATE_ACCOUNT_GRANT_ADMIN, put(accounts::grant_admin))
        .route(r::UPDATE_ACCOUNT_REMOVE_ADMIN, put(accounts::remove_admin))
        .route(r::UPDATE_ACCOUNT_REGISTER_MEMBER, post(accounts::register_member))
        .route(r::UPDATE_ACCOUNT_DELETE_MEMBER, delete(accounts::delete_member))
        .route(r::UPDATE_MEMBER_PUBLIC, put(members::update_public))
        .route(r::UPDATE_MEMBER_PRIVATE, put(members::update_private))
        .route(r::UPDATE_MEMBER_INSIGHT, put(members::update_insight))
        .route(r::UPDATE_KEYWORD, put(lookups::update_keyword))
        .route(r::REGISTER_KEYWORD, post(lookups::register_keyword))
        .route(r::ALL_KEYWORDS, get(lookups::all_keywords))
        .route(r::ALL_FACULTIES, get(lookups::all_faculties))
        .route(r::ALL_MEMBER_TYPES, get(lookups::all_member_types))
        .route(r::ALL_ORG_TYPES, get(lookups::all_org_types))
        .route(r::ALL_ORG_SCOPES, get(lookups::all_org_scopes))
        .layer(RequestBodyLimitLayer::new(body_limit_bytes))
        .with_state(state)
}
