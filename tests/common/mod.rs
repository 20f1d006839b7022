//! Stand-in portal API on an ephemeral port, recording what it receives.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use membership_portal::client::{LanguageCtx, NotificationLog, ServiceClient, SessionCredentials};
use membership_portal::routing::api_routes as r;
use serde_json::{json, Value};

#[derive(Clone, Default)]
pub struct MockApi {
    pub hits: Arc<AtomicUsize>,
    pub fail: Arc<AtomicBool>,
    pub private_bodies: Arc<Mutex<Vec<Value>>>,
    /// Route template and body of every account or public-profile call, in order.
    pub requests: Arc<Mutex<Vec<(&'static str, Value)>>>,
    pub failing_routes: Arc<Mutex<HashSet<&'static str>>>,
    pub account: Arc<Mutex<Value>>,
}

impl MockApi {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn private_bodies(&self) -> Vec<Value> {
        self.private_bodies.lock().unwrap().clone()
    }

    pub fn fail_route(&self, route: &'static str) {
        self.failing_routes.lock().unwrap().insert(route);
    }

    pub fn requests(&self) -> Vec<(&'static str, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn routes_called(&self) -> Vec<&'static str> {
        self.requests().into_iter().map(|(route, _)| route).collect()
    }

    pub fn set_account(&self, account: Value) {
        *self.account.lock().unwrap() = account;
    }

    /// Records the call and reports whether the route is switched to fail.
    fn record(&self, route: &'static str, body: Value) -> bool {
        self.hits.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push((route, body));
        self.failing_routes.lock().unwrap().contains(route)
    }
}

fn failure() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": { "code": "database_error", "message": "database operation failed" } })),
    )
        .into_response()
}

fn edit_account(mock: &MockApi, route: &'static str, body: Value, edit: impl FnOnce(&mut Value, &Value)) -> Response {
    if mock.record(route, body.clone()) {
        return failure();
    }
    let mut account = mock.account.lock().unwrap();
    edit(&mut *account, &body);
    Json(json!({ "data": account.clone() })).into_response()
}

async fn update_name(State(mock): State<MockApi>, Json(body): Json<Value>) -> Response {
    edit_account(&mock, r::UPDATE_ACCOUNT_NAME, body, |a, b| {
        a["first_name"] = b["first_name"].clone();
        a["last_name"] = b["last_name"].clone();
    })
}

async fn update_email(State(mock): State<MockApi>, Json(body): Json<Value>) -> Response {
    edit_account(&mock, r::UPDATE_ACCOUNT_EMAIL, body, |a, b| {
        a["login_email"] = b["login_email"].clone();
    })
}

async fn grant_admin(State(mock): State<MockApi>) -> Response {
    edit_account(&mock, r::UPDATE_ACCOUNT_GRANT_ADMIN, Value::Null, |a, _| a["is_admin"] = json!(true))
}

async fn register_member(State(mock): State<MockApi>) -> Response {
    edit_account(&mock, r::UPDATE_ACCOUNT_REGISTER_MEMBER, Value::Null, |a, _| a["member_id"] = json!(40))
}

async fn update_public(State(mock): State<MockApi>, Path(id): Path<i32>, Json(body): Json<Value>) -> Response {
    if mock.record(r::UPDATE_MEMBER_PUBLIC, body.clone()) {
        return failure();
    }
    Json(json!({
        "data": {
            "id": id,
            "account_id": 8,
            "first_name": "Grace",
            "last_name": "Hopper",
            "about_me": "Compilers",
            "work_email": null,
            "work_phone": null,
            "website": null,
            "faculty_id": null,
            "member_type_id": null,
            "is_active": true,
            "keywords": [
                { "id": 2, "name_en": "Energy", "name_fr": "Énergie" },
                { "id": 5, "name_en": "Water", "name_fr": "Eau" }
            ],
            "problems": []
        }
    }))
    .into_response()
}

async fn all_keywords(State(mock): State<MockApi>) -> Json<Value> {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "data": [{ "id": 1, "name_en": "Water", "name_fr": "Eau" }],
        "meta": { "count": 1 }
    }))
}

async fn update_keyword(State(mock): State<MockApi>) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    (StatusCode::CONFLICT, "keyword name taken").into_response()
}

async fn update_private(State(mock): State<MockApi>, Path(id): Path<i32>, Json(body): Json<Value>) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    mock.private_bodies.lock().unwrap().push(body.clone());
    if mock.fail.load(Ordering::SeqCst) {
        return failure();
    }
    let is_active = !body["deactivate"].as_bool().unwrap_or(false);
    Json(json!({
        "data": {
            "id": id,
            "address": body["address"],
            "city": body["city"],
            "province": body["province"],
            "country": body["country"],
            "postal_code": body["postal_code"],
            "mobile_phone": body["mobile_phone"],
            "date_joined": body["date_joined"],
            "is_active": is_active,
            "last_active": null
        }
    }))
    .into_response()
}

pub async fn spawn(mock: MockApi) -> String {
    let router = Router::new()
        .route(r::ALL_KEYWORDS, get(all_keywords))
        .route(r::UPDATE_KEYWORD, put(update_keyword))
        .route(r::UPDATE_MEMBER_PRIVATE, put(update_private))
        .route(r::UPDATE_MEMBER_PUBLIC, put(update_public))
        .route(r::UPDATE_ACCOUNT_NAME, put(update_name))
        .route(r::UPDATE_ACCOUNT_EMAIL, put(update_email))
        .route(r::UPDATE_ACCOUNT_GRANT_ADMIN, put(grant_admin))
        .route(r::UPDATE_ACCOUNT_REGISTER_MEMBER, post(register_member))
        .with_state(mock);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

pub fn client(base: &str, credentials: SessionCredentials, log: &NotificationLog) -> Arc<ServiceClient> {
    Arc::new(
        ServiceClient::new(base, Arc::new(credentials), Arc::new(log.clone()), LanguageCtx::default()).unwrap(),
    )
}
